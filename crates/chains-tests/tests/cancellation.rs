//! Cancellation and deadline tests.

use chains_client::{ChainsQuery, Context, Error};
use chains_tests::{AAPL_CHAINS, chains_path, create_test_client};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn slow_server(delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(chains_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(AAPL_CHAINS, "application/json")
                .set_delay(delay),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_cancelled_before_call_sends_nothing() {
    let server = slow_server(Duration::ZERO).await;
    let client = create_test_client(&server).expect("Failed to create client");
    let (ctx, cancel) = Context::with_cancel();
    cancel.cancel();

    let err = client
        .chains()
        .get_chains(&ctx, &ChainsQuery::new("AAPL"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_cancel_in_flight_returns_promptly() {
    let server = slow_server(Duration::from_secs(30)).await;
    let client = create_test_client(&server).expect("Failed to create client");
    let (ctx, cancel) = Context::with_cancel();

    let started = Instant::now();
    let handle = tokio::spawn({
        let client = client.clone();
        async move {
            client
                .chains()
                .get_chains(&ctx, &ChainsQuery::new("AAPL"))
                .await
        }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let result = handle.await.expect("task should not panic");
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_deadline_in_flight() {
    let server = slow_server(Duration::from_secs(30)).await;
    let client = create_test_client(&server).expect("Failed to create client");
    let ctx = Context::background().with_timeout(Duration::from_millis(200));

    let started = Instant::now();
    let err = client
        .chains()
        .get_chains(&ctx, &ChainsQuery::new("AAPL"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded));
    assert!(err.is_cancellation());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_expired_deadline_sends_nothing() {
    let server = slow_server(Duration::ZERO).await;
    let client = create_test_client(&server).expect("Failed to create client");
    let ctx = Context::background().with_timeout(Duration::ZERO);

    let err = client
        .chains()
        .get_chains(&ctx, &ChainsQuery::new("AAPL"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_concurrent_requests() {
    let server = slow_server(Duration::from_millis(50)).await;
    let client = create_test_client(&server).expect("Failed to create client");

    let tasks: Vec<_> = ["AAPL", "MSFT", "SPY", "QQQ"]
        .into_iter()
        .map(|symbol| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .chains()
                    .get_chains(&Context::background(), &ChainsQuery::new(symbol))
                    .await
            })
        })
        .collect();

    for task in tasks {
        let result = task.await.expect("task should not panic");
        assert!(result.is_ok());
    }

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 4);
}
