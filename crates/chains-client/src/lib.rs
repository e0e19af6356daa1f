//! Typed HTTP client for brokerage option chain snapshots.
//!
//! This crate wraps the `marketdata/chains` endpoint: it builds the query,
//! hands the request to a [`Transport`], and decodes the JSON body into
//! [`Chains`]. Greek fields are decoded through [`SpecialFloat`], which accepts
//! bare numbers as well as quoted values such as `"NaN"` or `"Infinity"`.
//!
//! # Example
//!
//! ```no_run
//! use chains_client::{ChainsQuery, Client, ClientConfig, ContractType, Context};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chains_client::Error> {
//!     let client = Client::new(ClientConfig {
//!         base_url: "https://api.tdameritrade.com/v1/".into(),
//!         access_token: Some("token".into()),
//!         ..Default::default()
//!     })?;
//!
//!     let ctx = Context::background().with_timeout(Duration::from_secs(10));
//!     let query = ChainsQuery::new("AAPL")
//!         .contract_type(ContractType::Call)
//!         .strike_count(5);
//!
//!     let (chains, response) = client.chains().get_chains(&ctx, &query).await?;
//!     println!("{} -> {} contracts (HTTP {})", chains.symbol, chains.contracts().count(), response.status);
//!
//!     Ok(())
//! }
//! ```

mod chains;
mod client;
mod context;
mod error;
mod special_float;
mod transport;
mod types;

pub use chains::{CHAINS_PATH, ChainsService};
pub use client::{Client, ClientConfig};
pub use context::{CancelHandle, Context};
pub use error::Error;
pub use special_float::SpecialFloat;
pub use transport::{RawResponse, ResponseMeta, Transport};
pub use types::*;
