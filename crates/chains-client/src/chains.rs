//! Option chains endpoint.

use crate::context::Context;
use crate::error::Error;
use crate::transport::{ResponseMeta, Transport};
use crate::types::Chains;
use reqwest::Method;
use serde::Serialize;


/// Path of the chains endpoint, relative to the API base URL.
pub const CHAINS_PATH: &str = "marketdata/chains";

/// Handles the option chains methods of the brokerage API.
#[derive(Debug)]
pub struct ChainsService<'a, T> {
    transport: &'a T,
}

impl<T> Clone for ChainsService<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ChainsService<'_, T> {}

impl<'a, T: Transport> ChainsService<'a, T> {
    /// Creates the service on top of a shared transport.
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetches one option chain snapshot.
    ///
    /// `query` is URL-encoded as given (a [`ChainsQuery`](crate::ChainsQuery),
    /// a slice of pairs, a map) and is neither validated nor defaulted. Exactly
    /// one request is sent; nothing is retried.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] or [`Error::DeadlineExceeded`] if `ctx` ends
    /// before or during the exchange, [`Error::InvalidUrl`] or
    /// [`Error::InvalidRequest`] if the request cannot be built, the transport's
    /// error if the exchange fails, and [`Error::Json`] if the body does not
    /// decode.
    pub async fn get_chains<Q>(
        &self,
        ctx: &Context,
        query: &Q,
    ) -> Result<(Chains, ResponseMeta), Error>
    where
        Q: Serialize + ?Sized,
    {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        let params =
            serde_urlencoded::to_string(query).map_err(|e| Error::InvalidRequest(e.to_string()))?;
        let path = if params.is_empty() {
            CHAINS_PATH.to_string()
        } else {
            format!("{CHAINS_PATH}?{params}")
        };
        let request = self.transport.new_request(Method::GET, &path)?;

        let raw = tokio::select! {
            biased;
            err = ctx.done() => return Err(err),
            result = self.transport.execute(request) => result?,
        };

        let chains = serde_json::from_slice(&raw.body)?;
        Ok((chains, raw.meta))
    }
}
