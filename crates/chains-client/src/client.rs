//! reqwest-backed HTTP transport.

use crate::chains::ChainsService;
use crate::error::Error;
use crate::transport::{RawResponse, ResponseMeta, Transport};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Method, Request, StatusCode, Url};
use std::time::Duration;
use tracing::debug;


/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://api.tdameritrade.com/v1/").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Bearer token sent with every request, if any.
    pub access_token: Option<String>,
    /// User agent header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tdameritrade.com/v1/".to_string(),
            timeout: Duration::from_secs(30),
            access_token: None,
            user_agent: concat!("chains-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for the brokerage API.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl Client {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is malformed or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        // Relative paths join below the base only when its path ends in a slash.
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.cannot_be_a_base() && !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token,
        })
    }

    /// Creates a new client with default configuration and the given base URL.
    ///
    /// # Errors
    /// Returns error if the base URL is malformed or the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the option chains endpoint.
    #[must_use]
    pub fn chains(&self) -> ChainsService<'_, Self> {
        ChainsService::new(self)
    }
}

impl Transport for Client {
    fn new_request(&self, method: Method, path: &str) -> Result<Request, Error> {
        let url = self.base_url.join(path)?;
        let mut request = Request::new(method, url);

        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::InvalidRequest(format!("invalid access token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(request)
    }

    async fn execute(&self, request: Request) -> Result<RawResponse, Error> {
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let resp = self.client.execute(request).await?;
        let meta = ResponseMeta::from_response(&resp);
        let status = resp.status();
        debug!(status = meta.status, "received response");

        if status.is_success() {
            let body = resp.bytes().await?.to_vec();
            Ok(RawResponse { meta, body })
        } else if status == StatusCode::NOT_FOUND {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::NotFound {
                message: text,
                response: meta,
            })
        } else {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
                response: meta,
            })
        }
    }
}
