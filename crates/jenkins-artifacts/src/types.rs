//! Value records and API response types for the Jenkins API

use serde::{
    Deserialize,
    Serialize,
};

/// A job as reported by the server root listing.
///
/// `color` is Jenkins's status encoding (`blue`, `red`, `disabled`,
/// `blue_anime`, ...) and is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub url: String,
    pub color: String,
}

impl Job {
    /// Creates a job reference from its name alone, for callers that already
    /// know which job they want and skip the listing.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
            color: String::new(),
        }
    }
}

/// A file archived by a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub display_path: String,
    pub file_name: String,
    /// Path below `{build}/artifact/` where the raw bytes live
    pub relative_path: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobEntry {
    #[serde(default)]
    pub name: serde_json::Value,
    #[serde(default)]
    pub url: serde_json::Value,
    #[serde(default)]
    pub color: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsResponse {
    pub jobs: Vec<JobEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtifactEntry {
    #[serde(rename = "displayPath")]
    #[serde(default)]
    pub display_path: serde_json::Value,
    #[serde(rename = "fileName")]
    #[serde(default)]
    pub file_name: serde_json::Value,
    #[serde(rename = "relativePath")]
    #[serde(default)]
    pub relative_path: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtifactsResponse {
    pub artifacts: Vec<ArtifactEntry>,
}
