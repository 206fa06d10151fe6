//! Documentation-space lookup and page creation

use crate::config::PageConfig;
use crate::error::{ApiError, ReleaseError, Result};
use crate::http::{RetryPolicy, Transport, classify};
use serde::Deserialize;
use serde_json::json;

/// Space resolved from `GET {space_path}/{key}`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpaceRecord {
    /// Space id
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Space display name
    pub name: String,
}

/// Page to create
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Target space key
    pub space_key: String,
    /// Page title
    pub title: String,
}

/// Page returned by the documentation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPage {
    /// Remote page id
    pub id: String,
    /// Page title
    pub title: String,
    /// Space display name
    pub space_name: String,
    /// Human-facing link
    pub url: String,
}

#[derive(Deserialize)]
struct CreatedPage {
    #[serde(deserialize_with = "id_string")]
    id: String,
}

/// Publishes release pages into a documentation space
#[derive(Debug, Clone)]
pub struct PagePublisher {
    transport: Transport,
    config: PageConfig,
}

impl PagePublisher {
    /// Create a publisher for the configured documentation service
    pub fn new(config: PageConfig, policy: RetryPolicy) -> std::result::Result<Self, ApiError> {
        let transport = Transport::new(config.credentials.clone(), policy)?;
        Ok(Self { transport, config })
    }

    /// Look up a space by key
    pub async fn fetch_space(&self, space_key: &str) -> std::result::Result<SpaceRecord, ApiError> {
        let url = format!(
            "{}/{}/{}",
            self.config.api_url, self.config.space_path, space_key
        );
        let body = self.transport.get(&url).await?;
        serde_json::from_value(body).map_err(|source| ApiError::InvalidJson { url, source })
    }

    /// Create a page with a storage-format body
    pub async fn publish(&self, request: &PageRequest, body_html: String) -> Result<PublishedPage> {
        let page_error = |source: ApiError| {
            classify(&source);
            ReleaseError::PagePublish {
                space_key: request.space_key.clone(),
                title: request.title.clone(),
                source,
            }
        };

        let space = self
            .fetch_space(&request.space_key)
            .await
            .map_err(page_error)?;
        log::info!(
            "Creating release page '{}' under {} ...",
            request.title,
            space.name
        );

        let url = format!("{}/{}", self.config.api_url, self.config.page_path);
        let payload = json!({
            "type": "page",
            "title": request.title,
            "space": { "key": request.space_key },
            "spaceId": space.id,
            "body": {
                "storage": {
                    "value": body_html,
                    "representation": "storage"
                }
            }
        });

        let response = self.transport.post(&url, &payload).await.map_err(page_error)?;
        let created: CreatedPage = serde_json::from_value(response)
            .map_err(|source| page_error(ApiError::InvalidJson { url, source }))?;

        Ok(PublishedPage {
            url: format!(
                "{}/spaces/{}/pages/{}",
                self.config.web_url, request.space_key, created.id
            ),
            id: created.id,
            title: request.title.clone(),
            space_name: space.name,
        })
    }
}

fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {}",
            other
        ))),
    }
}
