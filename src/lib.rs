//! # Release Bookkeeper
//!
//! CI release bookkeeping across a project-tracking service and a
//! documentation service.
//!
//! For each project key the tool creates a fix-version named
//! `<KEY>-R<identifier>`, tolerating per-project conflicts and reporting
//! partial success precisely. A separate step publishes a release page that
//! links the created releases.
//!
//! ## Features
//!
//! - **Resilient transport**: HTTP 429 responses are retried with exponential
//!   backoff, honouring `Retry-After`
//! - **Partial failure reporting**: conflicts, 401 and 404 are recorded per
//!   project while siblings continue
//! - **Conflict suggestions**: the next free identifier is proposed when a
//!   release name already exists
//! - **CI integration**: job summary and step outputs for downstream steps
//!
//! ## Usage
//!
//! ```bash
//! release_bookkeeper create-release --project-keys ABC,DEF --identifier 24.07.27.07
//! release_bookkeeper create-page --space-key REL --title "Release 24.07.27.07"
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod ci;
pub mod cli;
pub mod config;
pub mod confluence;
pub mod error;
pub mod http;
pub mod jira;
pub mod release;

pub use cli::Args;
pub use config::{Credentials, PageConfig, TrackerConfig};
pub use error::{ApiError, ReleaseError, RequestError, Result};
pub use http::{RetryPolicy, Transport};
pub use jira::JiraClient;
pub use release::{OutcomeEntry, ReleaseOrchestrator, ReleaseRequest, RunReport, RunStatus};
