//! Validated input for one orchestration run

use crate::error::RequestError;
use crate::jira::validate_identifier;
use std::collections::HashSet;

/// Release metadata shared by every project in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    project_keys: Vec<String>,
    identifier: String,
    description: Option<String>,
    release_now: bool,
}

impl ReleaseRequest {
    /// Validate and build a request.
    ///
    /// Keys are processed in the given order and must be unique. The
    /// identifier's final dot-segment must be a non-negative integer small
    /// enough to be incremented.
    pub fn new(
        project_keys: Vec<String>,
        identifier: impl Into<String>,
        description: Option<String>,
        release_now: bool,
    ) -> Result<Self, RequestError> {
        if project_keys.is_empty() {
            return Err(RequestError::NoProjectKeys);
        }

        let mut seen = HashSet::new();
        for key in &project_keys {
            if key.is_empty() || key.contains(['/', '?', '#']) || key.contains(char::is_whitespace)
            {
                return Err(RequestError::InvalidProjectKey { key: key.clone() });
            }
            if !seen.insert(key.as_str()) {
                return Err(RequestError::DuplicateProjectKey { key: key.clone() });
            }
        }

        let identifier = identifier.into();
        validate_identifier(&identifier)?;

        let description = description.filter(|text| !text.trim().is_empty());

        Ok(Self {
            project_keys,
            identifier,
            description,
            release_now,
        })
    }

    /// Project keys in processing order
    pub fn project_keys(&self) -> &[String] {
        &self.project_keys
    }

    /// Release identifier, e.g. `24.07.27.07`
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Optional description attached to every version
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether versions are created already released
    pub fn release_now(&self) -> bool {
        self.release_now
    }
}

/// Split a comma-delimited list (keys, release names, URLs), dropping blanks
pub fn parse_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
