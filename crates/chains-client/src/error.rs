//! Error types for the chains client.

use crate::transport::ResponseMeta;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Client error types.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization of the response body failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request could not be built from the supplied parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API returned a non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body returned by the API.
        message: String,
        /// Metadata captured from the failed response.
        response: ResponseMeta,
    },

    /// Resource not found.
    #[error("Not found: {message}")]
    NotFound {
        /// Response body returned by the API.
        message: String,
        /// Metadata captured from the failed response.
        response: ResponseMeta,
    },

    /// The caller cancelled the request context.
    #[error("request cancelled")]
    Cancelled,

    /// The request context deadline elapsed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    /// Returns the response metadata captured before the failure, if any.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Api { response, .. } | Self::NotFound { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns `true` if the error came from the request context ending.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
