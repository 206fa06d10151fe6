//! Wire types for the tracker's project and version endpoints.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Project resolved from `GET project/{key}`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Internal project id (Jira returns numeric strings)
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Display name
    pub name: String,
}

/// Request body for `POST version`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    /// Always false at creation
    pub archived: bool,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `<projectKey>-R<releaseIdentifier>`
    pub name: String,
    /// Owning project id
    #[serde(serialize_with = "id_as_number_when_numeric")]
    pub project_id: String,
    /// Mark the version released immediately
    pub released: bool,
}

impl VersionRecord {
    /// Build the creation body for a resolved project
    pub fn new(
        project: &ProjectRecord,
        name: String,
        description: Option<String>,
        released: bool,
    ) -> Self {
        Self {
            archived: false,
            description,
            name,
            project_id: project.id.clone(),
            released,
        }
    }
}

/// Version returned from `POST version`; only the id is consumed
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreatedVersion {
    /// Remote version id
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

fn id_as_number_when_numeric<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id.parse::<u64>() {
        Ok(number) => serializer.serialize_u64(number),
        Err(_) => serializer.serialize_str(id),
    }
}
