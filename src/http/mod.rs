//! HTTP transport with rate-limit retries and error diagnostics

pub mod classify;
mod retry;
mod transport;

pub use classify::{classify, classify_payload};
pub use retry::{Backoff, DEFAULT_INITIAL_BACKOFF, DEFAULT_RETRIES, MAX_RETRIES, RetryPolicy, parse_retry_after};
pub use transport::Transport;
