//! Transport abstraction used by the endpoint services.

use crate::error::Error;
use reqwest::header::HeaderMap;
use reqwest::{Method, Request};

/// Status and headers captured from an HTTP response.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
}

impl ResponseMeta {
    /// Captures the metadata of a reqwest response.
    #[must_use]
    pub fn from_response(response: &reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            headers: response.headers().clone(),
        }
    }
}

/// Successful response whose body has not been decoded yet.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// Response metadata.
    pub meta: ResponseMeta,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Shared HTTP transport.
///
/// Implementations own the base URL, authentication and response envelope
/// handling. Services only build a relative path and decode the body.
pub trait Transport: Send + Sync {
    /// Builds a request for `path`, resolved against the transport's base URL.
    ///
    /// # Errors
    /// Returns error if the URL cannot be resolved or a header cannot be built.
    fn new_request(&self, method: Method, path: &str) -> Result<Request, Error>;

    /// Sends a request and returns the body of a successful response.
    ///
    /// # Errors
    /// Returns error on network failure or a non-success status.
    fn execute(&self, request: Request) -> impl Future<Output = Result<RawResponse, Error>> + Send;
}
