//! Project entity model
//!
//! A project is the container created by ingesting a source. Its identity is
//! immutable; metadata may change server-side.

use serde::{Deserialize, Serialize};

/// Project resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project
    pub id: i64,

    /// Human-readable project name
    pub name: String,

    /// Where the source came from (e.g., `youtube`)
    pub source_type: String,

    /// Source reference, typically a URL
    pub source_ref: String,
}

/// Body for `POST /v1/projects`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCreate {
    pub name: String,
    pub source_type: String,
    pub source_ref: String,
}

/// Body for `POST /v1/ingest/youtube`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}
