//! Tracker API client for project lookup and version creation

use super::models::{CreatedVersion, ProjectRecord, VersionRecord};
use crate::config::TrackerConfig;
use crate::error::ApiError;
use crate::http::{RetryPolicy, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Client for the project-tracking REST API
#[derive(Debug, Clone)]
pub struct JiraClient {
    transport: Transport,
    config: TrackerConfig,
}

impl JiraClient {
    /// Create a client for the configured tracker
    pub fn new(config: TrackerConfig, policy: RetryPolicy) -> Result<Self, ApiError> {
        let transport = Transport::new(config.credentials.clone(), policy)?;
        Ok(Self { transport, config })
    }

    /// Tracker settings
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Resolve a project key: `GET {api}/project/{key}`
    pub async fn get_project(&self, project_key: &str) -> Result<ProjectRecord, ApiError> {
        let url = format!("{}/project/{}", self.config.api_url, project_key);
        let body = self.transport.get(&url).await?;
        decode(&url, body)
    }

    /// Create a fix-version: `POST {api}/version`
    pub async fn create_version(&self, record: &VersionRecord) -> Result<CreatedVersion, ApiError> {
        let url = format!("{}/version", self.config.api_url);
        let payload = serde_json::to_value(record).map_err(|source| ApiError::InvalidJson {
            url: url.clone(),
            source,
        })?;
        let body = self.transport.post(&url, &payload).await?;
        decode(&url, body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|source| ApiError::InvalidJson {
        url: url.to_string(),
        source,
    })
}
