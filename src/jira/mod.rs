//! Project-tracking service integration

mod client;
mod models;
mod naming;

pub use client::JiraClient;
pub use models::{CreatedVersion, ProjectRecord, VersionRecord};
pub use naming::{increment_identifier, release_name, validate_identifier, version_url};
