//! # Option Chains
//!
//! Command line fetcher for brokerage option chain snapshots, built on the
//! [`chains_client`] crate.
//!
//! ## Configuration
//!
//! The binary reads a TOML file named by `CHAINS_CONFIG` (default
//! `chains.toml`). A missing file means defaults.
//!
//! ```toml
//! [api]
//! base_url = "https://api.tdameritrade.com/v1/"
//! timeout_secs = 30
//! access_token = "..."
//!
//! [query]
//! symbol = "AAPL"
//! contract_type = "CALL"
//! strike_count = 5
//! strategy = "SINGLE"
//! range = "NTM"
//! ```
//!
//! `CHAINS_BASE_URL`, `CHAINS_ACCESS_TOKEN` and `CHAINS_SYMBOL` override the
//! file. Log verbosity follows `RUST_LOG` (default `info`).
//!
//! ## Output
//!
//! The chain is written to stdout as pretty-printed JSON. Greeks the broker
//! could not compute come out as `"NaN"`, and infinities as `"Infinity"` or
//! `"-Infinity"`.
//!
//! ```bash
//! CHAINS_ACCESS_TOKEN=... CHAINS_SYMBOL=MSFT cargo run > msft.json
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML configuration and environment overrides |
//! | [`summary`] | Per-expiration contract counts for logging |

pub mod config;
pub mod summary;
