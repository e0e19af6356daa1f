//! Integration tests for the option chains client.
//!
//! Tests run against an in-process mock of the broker API, so no network
//! access or credentials are needed.

use chains_client::{CHAINS_PATH, Client, ClientConfig};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Chain with calls and puts across two expirations, mixing bare, quoted and
/// special greek values.
pub const AAPL_CHAINS: &str = include_str!("../fixtures/chains_aapl.json");

/// Chain the broker returns for an unknown symbol.
pub const FAILED_CHAINS: &str = include_str!("../fixtures/chains_failed.json");

/// Version prefix the mock server serves under.
pub const API_PREFIX: &str = "/v1";

/// Bearer token the test client sends.
pub const TEST_TOKEN: &str = "test-token";

/// Full path of the chains endpoint on the mock server.
#[must_use]
pub fn chains_path() -> String {
    format!("{API_PREFIX}/{CHAINS_PATH}")
}

/// Creates a test client pointed at the mock server.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_test_client(server: &MockServer) -> Result<Client, chains_client::Error> {
    Client::new(ClientConfig {
        base_url: format!("{}{API_PREFIX}", server.uri()),
        timeout: Duration::from_secs(10),
        access_token: Some(TEST_TOKEN.to_string()),
        ..Default::default()
    })
}

/// Starts a mock server answering the chains endpoint with `body`.
pub async fn serve_chains(body: &'static str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(chains_path()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;
    server
}
