//! Retrying JSON transport shared by the tracker and page clients.

use super::retry::{RetryPolicy, parse_retry_after};
use crate::config::Credentials;
use crate::error::ApiError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Per-request timeout for a single attempt
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues authenticated JSON requests, retrying only on HTTP 429
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    credentials: Credentials,
    policy: RetryPolicy,
}

impl Transport {
    /// Create a transport with the given credentials and retry policy
    pub fn new(credentials: Credentials, policy: RetryPolicy) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::ClientInit)?;

        Ok(Self {
            client,
            credentials,
            policy,
        })
    }

    /// `GET` a JSON resource
    pub async fn get(&self, url: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, url, None).await
    }

    /// `POST` a JSON body and return the JSON response
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::POST, url, Some(body)).await
    }

    /// Issue one logical request.
    ///
    /// A 2xx response returns its parsed body. A 429 sleeps for the
    /// `Retry-After` hint (or the current backoff), doubles the backoff and
    /// tries again while attempts remain. Any other status fails immediately
    /// with [`ApiError::Status`]; a 429 on the final attempt fails with
    /// [`ApiError::RetriesExhausted`].
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut backoff = self.policy.backoff();
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            log::debug!("{} {} (attempt {}/{})", method, url, attempt, max_attempts);

            let mut builder = self
                .client
                .request(method.clone(), url)
                .header(AUTHORIZATION, self.credentials.basic_header())
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json");
            if let Some(body) = body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(|source| ApiError::Network {
                url: url.to_string(),
                source,
            })?;
            let status = response.status();

            if status.is_success() {
                return decode_body(url, response).await;
            }

            if status != StatusCode::TOO_MANY_REQUESTS {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                    body: error_body(response).await,
                });
            }

            if attempt == max_attempts {
                break;
            }

            let hint = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_retry_after);
            let delay = backoff.delay(hint);

            log::warn!(
                "HTTP 429 Too Many Requests from {}. Retrying after {}ms... (Attempt {}/{})",
                url,
                delay.as_millis(),
                attempt,
                self.policy.retries
            );

            tokio::time::sleep(delay).await;
            backoff.advance();
        }

        Err(ApiError::RetriesExhausted {
            url: url.to_string(),
            attempts: max_attempts,
        })
    }
}

/// Parse a success body; empty bodies (e.g. 204) decode as `null`
async fn decode_body(url: &str, response: Response) -> Result<Value, ApiError> {
    let text = response.text().await.map_err(|source| ApiError::Network {
        url: url.to_string(),
        source,
    })?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|source| ApiError::InvalidJson {
        url: url.to_string(),
        source,
    })
}

/// Best-effort capture of an error body for diagnostics
async fn error_body(response: Response) -> Value {
    match response.text().await {
        Ok(text) if text.trim().is_empty() => Value::Null,
        Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        Err(_) => Value::Null,
    }
}
