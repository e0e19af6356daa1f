//! Unit tests for error module.

use super::*;
use reqwest::header::{HeaderMap, HeaderValue};

fn meta(status: u16) -> ResponseMeta {
    let mut headers = HeaderMap::new();
    headers.insert("x-request-id", HeaderValue::from_static("req-42"));
    ResponseMeta { status, headers }
}

#[test]
fn test_api_error_display() {
    let error = Error::Api {
        status: 400,
        message: "Bad request".to_string(),
        response: meta(400),
    };

    let display = format!("{}", error);
    assert!(display.contains("400"));
    assert!(display.contains("Bad request"));
}

#[test]
fn test_not_found_error_display() {
    let error = Error::NotFound {
        message: "Symbol not found".to_string(),
        response: meta(404),
    };

    let display = format!("{}", error);
    assert!(display.contains("Not found"));
    assert!(display.contains("Symbol not found"));
}

#[test]
fn test_invalid_request_error_display() {
    let error = Error::InvalidRequest("unsupported query value".to_string());

    let display = format!("{}", error);
    assert!(display.contains("Invalid request"));
    assert!(display.contains("unsupported query value"));
}

#[test]
fn test_invalid_url_from_parse_error() {
    let error: Error = url::Url::parse("not a url").unwrap_err().into();

    assert!(matches!(error, Error::InvalidUrl(_)));
    assert!(format!("{}", error).starts_with("Invalid URL"));
}

#[test]
fn test_json_error_from_serde() {
    let error: Error = serde_json::from_str::<f64>("{").unwrap_err().into();

    assert!(matches!(error, Error::Json(_)));
    assert!(error.response().is_none());
}

#[test]
fn test_response_metadata_kept_on_api_error() {
    let error = Error::Api {
        status: 503,
        message: "unavailable".to_string(),
        response: meta(503),
    };

    let response = error.response().expect("metadata should be captured");
    assert_eq!(response.status, 503);
    assert_eq!(response.headers["x-request-id"], "req-42");
}

#[test]
fn test_cancellation_errors() {
    assert!(Error::Cancelled.is_cancellation());
    assert!(Error::DeadlineExceeded.is_cancellation());
    assert!(!Error::InvalidRequest("x".to_string()).is_cancellation());

    assert_eq!(format!("{}", Error::Cancelled), "request cancelled");
    assert_eq!(
        format!("{}", Error::DeadlineExceeded),
        "request deadline exceeded"
    );
}

#[test]
fn test_error_debug() {
    let error = Error::Api {
        status: 500,
        message: "Internal server error".to_string(),
        response: meta(500),
    };

    let debug = format!("{:?}", error);
    assert!(debug.contains("Api"));
    assert!(debug.contains("500"));
}
