//! Explicit configuration values passed into clients and orchestrators.
//!
//! Nothing in the library reads process environment; the CLI layer resolves
//! flags and environment variables into these values.

use crate::error::ConfigError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// API user and token combined into a Basic auth value
#[derive(Clone)]
pub struct Credentials {
    user: String,
    token: String,
}

impl Credentials {
    /// Create credentials from a user and API token
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }

    /// `Authorization` header value: `Basic base64(user:token)`
    pub fn basic_header(&self) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", self.user, self.token))
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Connection settings for the project-tracking service
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// REST API root, e.g. `https://example.atlassian.net/rest/api/3`
    pub api_url: String,
    /// Web root used for human-facing links
    pub web_url: String,
    /// Credentials attached to every request
    pub credentials: Credentials,
}

impl TrackerConfig {
    /// Validate and normalise tracker settings
    pub fn new(
        api_url: &str,
        web_url: &str,
        credentials: Credentials,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_base_url("api_url", api_url)?,
            web_url: normalize_base_url("web_url", web_url)?,
            credentials,
        })
    }
}

/// Connection settings for the documentation service
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// REST API root used for space and page calls
    pub api_url: String,
    /// Web root used for human-facing links
    pub web_url: String,
    /// Credentials attached to every request
    pub credentials: Credentials,
    /// Path (relative to `api_url`) of the space lookup endpoint
    pub space_path: String,
    /// Path (relative to `api_url`) of the page creation endpoint
    pub page_path: String,
}

impl PageConfig {
    /// Validate and normalise page settings
    pub fn new(
        api_url: &str,
        web_url: &str,
        credentials: Credentials,
        space_path: &str,
        page_path: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_base_url("api_url", api_url)?,
            web_url: normalize_base_url("web_url", web_url)?,
            credentials,
            space_path: normalize_path("space_path", space_path)?,
            page_path: normalize_path("page_path", page_path)?,
        })
    }
}

/// Parse a base URL and strip trailing slashes so paths can be appended with `/`
fn normalize_base_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing { name });
    }

    url::Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: trimmed.to_string(),
        source,
    })?;

    Ok(trimmed.trim_end_matches('/').to_string())
}

fn normalize_path(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Missing { name });
    }
    Ok(trimmed.to_string())
}
