//! Error types for release bookkeeping operations.
//!
//! Errors carry typed discriminants (HTTP status, failing project key) so callers
//! never have to parse messages to decide what to do next.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release bookkeeping operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release bookkeeping operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Project lookup failed; the run cannot continue
    #[error("Failed to resolve project '{project_key}': {source}")]
    ProjectLookup {
        /// Project key being resolved
        project_key: String,
        /// Underlying API failure
        #[source]
        source: ApiError,
    },

    /// Version creation failed with a status that is not recoverable per project
    #[error("Failed to create release '{release_name}' in project '{project_key}': {source}")]
    VersionCreate {
        /// Project key being processed
        project_key: String,
        /// Release name that was being created
        release_name: String,
        /// Underlying API failure
        #[source]
        source: ApiError,
    },

    /// Documentation page publishing failed
    #[error("Failed to publish page '{title}' in space '{space_key}': {source}")]
    PagePublish {
        /// Space key
        space_key: String,
        /// Page title
        title: String,
        /// Underlying API failure
        #[source]
        source: ApiError,
    },

    /// Transport errors outside of an orchestration step
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Invalid release request
    #[error("Invalid release request: {0}")]
    Request(#[from] RequestError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CI summary/output sink errors
    #[error("CI output error: {0}")]
    Sink(#[from] SinkError),

    /// Page template errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Page rendering errors
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Run report (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by the HTTP transport
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("HTTP error! status: {status} ({url})")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
        /// Response body (JSON when parseable, otherwise a string)
        body: serde_json::Value,
    },

    /// Every attempt was rate limited
    #[error("Maximum retries reached after {attempts} attempt(s). Request to {url} failed.")]
    RetriesExhausted {
        /// Requested URL
        url: String,
        /// Number of attempts made
        attempts: u32,
    },

    /// Connection or protocol failure
    #[error("Request to {url} failed: {source}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON
    #[error("Invalid JSON response from {url}: {source}")]
    InvalidJson {
        /// Requested URL
        url: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client could not be constructed
    #[error("Failed to initialise HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status discriminant, when the server answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body attached to a status failure
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Release request validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Project key list was empty
    #[error("No project keys supplied. Provide at least one comma-separated project key.")]
    NoProjectKeys,

    /// Project key appeared twice
    #[error("Project key '{key}' is listed more than once")]
    DuplicateProjectKey {
        /// Duplicated key
        key: String,
    },

    /// Project key contains characters that cannot appear in a path segment
    #[error("Project key '{key}' is not valid")]
    InvalidProjectKey {
        /// Offending key
        key: String,
    },

    /// Final identifier segment is not a non-negative integer
    #[error("Release identifier '{identifier}' must end in a numeric segment (found '{segment}')")]
    NonNumericSegment {
        /// Full identifier
        identifier: String,
        /// Final segment
        segment: String,
    },

    /// Final identifier segment cannot be incremented
    #[error("Release identifier '{identifier}' cannot be incremented")]
    IdentifierOverflow {
        /// Full identifier
        identifier: String,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Base URL could not be parsed
    #[error("Invalid {name} '{value}': {source}")]
    InvalidUrl {
        /// Setting name
        name: &'static str,
        /// Supplied value
        value: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// Required setting is empty
    #[error("Missing required setting: {name}")]
    Missing {
        /// Setting name
        name: &'static str,
    },

    /// Retry count above the allowed maximum
    #[error("Retry count too high: {retries} (max: {max})")]
    TooManyRetries {
        /// Requested retries
        retries: u32,
        /// Maximum allowed
        max: u32,
    },
}

/// CI sink errors
#[derive(Error, Debug)]
pub enum SinkError {
    /// Failed to append to a CI file
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Target file
        path: PathBuf,
        /// IO failure
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file handed over by an earlier step
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Source file
        path: PathBuf,
        /// IO failure
        #[source]
        source: std::io::Error,
    },

    /// Output name is unusable
    #[error("Invalid output name '{name}'")]
    InvalidName {
        /// Offending name
        name: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::ProjectLookup { project_key, source } => match source.status() {
                Some(401) | Some(403) => vec![
                    "Verify JIRA_API_USER and JIRA_API_TOKEN are valid".to_string(),
                    format!("Ensure the API user can browse project {}", project_key),
                ],
                Some(404) => vec![
                    format!("Check that project key '{}' exists", project_key),
                    "Verify JIRA_API_URL points at the REST API root (e.g. .../rest/api/3)"
                        .to_string(),
                ],
                _ => vec!["Check network access to the Jira API and retry".to_string()],
            },
            ReleaseError::Api(ApiError::RetriesExhausted { .. })
            | ReleaseError::VersionCreate {
                source: ApiError::RetriesExhausted { .. },
                ..
            } => vec![
                "The API is rate limiting requests; wait before re-running".to_string(),
                "Increase --retries or --initial-backoff-ms".to_string(),
            ],
            ReleaseError::Request(RequestError::NonNumericSegment { .. }) => vec![
                "Use a dot-delimited identifier ending in a number, e.g. 24.07.27.07".to_string(),
            ],
            ReleaseError::Request(RequestError::NoProjectKeys) => {
                vec!["Set JIRA_PROJECT_KEY to a comma-separated list of keys".to_string()]
            }
            ReleaseError::Config(ConfigError::Missing { name }) => {
                vec![format!("Provide {} via flag or environment variable", name)]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
