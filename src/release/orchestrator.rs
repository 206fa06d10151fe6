//! Sequential fix-version creation across projects.

use super::report::{FailureKind, OutcomeEntry, RunReport};
use super::request::ReleaseRequest;
use crate::error::{ReleaseError, Result};
use crate::http::classify;
use crate::jira::{JiraClient, VersionRecord, increment_identifier, release_name, version_url};

/// Creates one fix-version per project key and aggregates the outcomes
#[derive(Debug, Clone)]
pub struct ReleaseOrchestrator {
    client: JiraClient,
}

impl ReleaseOrchestrator {
    /// Create an orchestrator over a configured tracker client
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }

    /// Create releases for every project key, in order.
    ///
    /// Conflicts (400), 401 and 404 on version creation are recorded and the
    /// run moves on to the next key. A failed project lookup, any other
    /// creation status, or exhausted retries abort the remaining keys.
    pub async fn create_releases(&self, request: &ReleaseRequest) -> Result<RunReport> {
        let mut report = RunReport::new();
        let web_url = &self.client.config().web_url;

        for project_key in request.project_keys() {
            let project = self.client.get_project(project_key).await.map_err(|source| {
                classify(&source);
                ReleaseError::ProjectLookup {
                    project_key: project_key.clone(),
                    source,
                }
            })?;
            log::debug!(
                "Resolved project {} ({}) to id {}",
                project_key,
                project.name,
                project.id
            );

            let name = release_name(project_key, request.identifier());
            let record = VersionRecord::new(
                &project,
                name.clone(),
                request.description().map(str::to_string),
                request.release_now(),
            );

            match self.client.create_version(&record).await {
                Ok(created) => {
                    let release_url = version_url(web_url, project_key, &created.id);
                    log::info!("Created release {} ({})", name, release_url);
                    report.push(OutcomeEntry::Released {
                        project_key: project_key.clone(),
                        release_name: name,
                        release_url,
                    });
                }
                Err(error) => {
                    classify(&error);

                    let Some(kind) = error.status().and_then(FailureKind::from_status) else {
                        return Err(ReleaseError::VersionCreate {
                            project_key: project_key.clone(),
                            release_name: name,
                            source: error,
                        });
                    };

                    let suggested_identifier = match kind {
                        FailureKind::Conflict => Some(increment_identifier(request.identifier())?),
                        FailureKind::Unauthorized | FailureKind::NotFound => None,
                    };
                    log::warn!(
                        "Release {} not created in {}: {}",
                        name,
                        project_key,
                        kind.label()
                    );

                    report.push(OutcomeEntry::Failed {
                        project_key: project_key.clone(),
                        project_name: Some(project.name),
                        release_name: name,
                        kind,
                        suggested_identifier,
                    });
                }
            }
        }

        Ok(report)
    }
}
