//! Retry and failure behavior of the HTTP transport against a mock server.

use mockito::Server;
use release_bookkeeper::{ApiError, Credentials, RetryPolicy, Transport};
use serde_json::json;
use std::time::{Duration, Instant};

fn transport(retries: u32, initial_backoff_ms: u64) -> Transport {
    Transport::new(
        Credentials::new("user", "token"),
        RetryPolicy::new(retries, Duration::from_millis(initial_backoff_ms)),
    )
    .expect("client should build")
}

#[tokio::test]
async fn test_success_returns_parsed_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/project/ABC")
        .match_header("authorization", "Basic dXNlcjp0b2tlbg==")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"10000","name":"Alpha"}"#)
        .expect(1)
        .create_async()
        .await;

    let body = transport(3, 1)
        .get(&format!("{}/project/ABC", server.url()))
        .await
        .unwrap();

    assert_eq!(body, json!({"id": "10000", "name": "Alpha"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limited_then_success() {
    let mut server = Server::new_async().await;
    let limited = server
        .mock("GET", "/thing")
        .with_status(429)
        .expect(2)
        .create_async()
        .await;
    let ok = server
        .mock("GET", "/thing")
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create_async()
        .await;

    let body = transport(3, 1)
        .get(&format!("{}/thing", server.url()))
        .await
        .unwrap();

    assert_eq!(body, json!({"ok": true}));
    limited.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
async fn test_retries_exhausted_after_all_attempts_rate_limited() {
    let mut server = Server::new_async().await;
    let limited = server
        .mock("GET", "/thing")
        .with_status(429)
        .expect(4)
        .create_async()
        .await;

    let error = transport(3, 1)
        .get(&format!("{}/thing", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::RetriesExhausted { attempts: 4, .. }));
    assert_eq!(error.status(), None);
    limited.assert_async().await;
}

#[tokio::test]
async fn test_zero_retries_tries_once() {
    let mut server = Server::new_async().await;
    let limited = server
        .mock("GET", "/thing")
        .with_status(429)
        .expect(1)
        .create_async()
        .await;

    let error = transport(0, 1)
        .get(&format!("{}/thing", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::RetriesExhausted { attempts: 1, .. }));
    limited.assert_async().await;
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    for status in [400, 401, 404, 500, 503] {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/version")
            .with_status(status)
            .with_body(r#"{"errorMessages":[],"errors":{"name":"exists"}}"#)
            .expect(1)
            .create_async()
            .await;

        let error = transport(3, 1)
            .post(&format!("{}/version", server.url()), &json!({"name": "x"}))
            .await
            .unwrap_err();

        assert_eq!(error.status(), Some(status as u16));
        assert_eq!(
            error.body(),
            Some(&json!({"errorMessages": [], "errors": {"name": "exists"}}))
        );
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_non_json_error_body_kept_as_text() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/thing")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let error = transport(0, 1)
        .get(&format!("{}/thing", server.url()))
        .await
        .unwrap_err();

    assert_eq!(error.body(), Some(&json!("Bad Gateway")));
}

#[tokio::test]
async fn test_retry_after_hint_overrides_backoff() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/thing")
        .with_status(429)
        .with_header("retry-after", "0")
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/thing")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    // A 60s computed backoff would trip the timeout; the 0s hint must win.
    let result = tokio::time::timeout(
        Duration::from_secs(10),
        transport(3, 60_000).get(&format!("{}/thing", server.url())),
    )
    .await
    .expect("retry-after hint should shorten the wait");

    assert_eq!(result.unwrap(), json!({}));
}

#[tokio::test]
async fn test_backoff_doubles_between_attempts() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/thing")
        .with_status(429)
        .expect(3)
        .create_async()
        .await;

    let started = Instant::now();
    let error = transport(2, 40)
        .get(&format!("{}/thing", server.url()))
        .await
        .unwrap_err();

    // Two waits: 40ms then 80ms
    assert!(started.elapsed() >= Duration::from_millis(120));
    assert!(matches!(error, ApiError::RetriesExhausted { attempts: 3, .. }));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/thing")
        .with_status(204)
        .create_async()
        .await;

    let body = transport(0, 1)
        .post(&format!("{}/thing", server.url()), &json!({}))
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn test_invalid_success_body_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/thing")
        .with_status(200)
        .with_body("<html>")
        .create_async()
        .await;

    let error = transport(0, 1)
        .get(&format!("{}/thing", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::InvalidJson { .. }));
}
