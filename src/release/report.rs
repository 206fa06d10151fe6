//! Per-project outcomes and the aggregated run report

use serde::{Deserialize, Serialize};

/// Per-project failure that does not abort the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 400: a version with this name already exists
    Conflict,
    /// 401: credentials rejected for this project
    Unauthorized,
    /// 404: project or endpoint not found
    NotFound,
}

impl FailureKind {
    /// Map a version-creation status to a recoverable failure kind
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(FailureKind::Conflict),
            401 => Some(FailureKind::Unauthorized),
            404 => Some(FailureKind::NotFound),
            _ => None,
        }
    }

    /// Short label for summaries
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Conflict => "already exists",
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::NotFound => "not found",
        }
    }
}

/// Result of processing one project key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutcomeEntry {
    /// Version created
    Released {
        /// Project key
        project_key: String,
        /// Created release name
        release_name: String,
        /// Deep link to the version
        release_url: String,
    },
    /// Version creation failed for this project only
    Failed {
        /// Project key
        project_key: String,
        /// Project display name, when the lookup succeeded
        project_name: Option<String>,
        /// Release name that was attempted
        release_name: String,
        /// Failure classification
        kind: FailureKind,
        /// Next identifier to try after a conflict
        suggested_identifier: Option<String>,
    },
}

impl OutcomeEntry {
    /// Project key this entry belongs to
    pub fn project_key(&self) -> &str {
        match self {
            OutcomeEntry::Released { project_key, .. } | OutcomeEntry::Failed { project_key, .. } => {
                project_key
            }
        }
    }

    /// Release name created or attempted
    pub fn release_name(&self) -> &str {
        match self {
            OutcomeEntry::Released { release_name, .. }
            | OutcomeEntry::Failed { release_name, .. } => release_name,
        }
    }

    /// Whether the version was created
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeEntry::Released { .. })
    }

    /// Actionable message for a failed entry
    pub fn failure_message(&self) -> Option<String> {
        let OutcomeEntry::Failed {
            project_key,
            project_name,
            release_name,
            kind,
            suggested_identifier,
        } = self
        else {
            return None;
        };
        let project = project_name.as_deref().unwrap_or(project_key);

        Some(match kind {
            FailureKind::Conflict => {
                let mut message = format!(
                    "Release {} already exists in project {}.",
                    release_name, project
                );
                if let Some(suggestion) = suggested_identifier {
                    message.push_str(&format!(" Try release identifier {}.", suggestion));
                }
                message
            }
            FailureKind::Unauthorized => format!(
                "Not authorized to create release {} in project {}. Check the API user and token.",
                release_name, project
            ),
            FailureKind::NotFound => format!(
                "Project {} was not found while creating release {}.",
                project, release_name
            ),
        })
    }
}

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every project got its version
    Succeeded,
    /// At least one project failed
    Failed,
}

impl RunStatus {
    /// Lowercase label used in CI outputs
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
        }
    }
}

/// Name and link of a created release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalRelease<'a> {
    /// Release name
    pub name: &'a str,
    /// Release URL
    pub url: &'a str,
}

/// Ordered outcomes of one orchestration run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    entries: Vec<OutcomeEntry>,
}

impl RunReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome in processing order
    pub fn push(&mut self, entry: OutcomeEntry) {
        self.entries.push(entry);
    }

    /// Outcomes in processing order
    pub fn entries(&self) -> &[OutcomeEntry] {
        &self.entries
    }

    /// Failed outcomes in processing order
    pub fn failures(&self) -> impl Iterator<Item = &OutcomeEntry> {
        self.entries.iter().filter(|entry| !entry.is_success())
    }

    /// Failed if any entry failed
    pub fn status(&self) -> RunStatus {
        if self.entries.iter().all(OutcomeEntry::is_success) {
            RunStatus::Succeeded
        } else {
            RunStatus::Failed
        }
    }

    /// Last successful entry.
    ///
    /// Single-valued CI outputs take the most recent success; consumers that
    /// need every project read the rendered summary instead.
    pub fn final_release(&self) -> Option<FinalRelease<'_>> {
        self.entries.iter().rev().find_map(|entry| match entry {
            OutcomeEntry::Released {
                release_name,
                release_url,
                ..
            } => Some(FinalRelease {
                name: release_name,
                url: release_url,
            }),
            OutcomeEntry::Failed { .. } => None,
        })
    }

    /// Combined failure message, one line per failed project
    pub fn failure_message(&self) -> Option<String> {
        let lines: Vec<String> = self
            .failures()
            .filter_map(OutcomeEntry::failure_message)
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}
