//! Workflow entity model
//!
//! A workflow is a user-defined DAG of task nodes executed server-side as a
//! single job. The definition stays an opaque JSON document on the client;
//! per-node execution progress arrives through the run job's output.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::template::OutputKind;

/// Workflow resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier for the workflow
    pub id: i64,

    /// Human-readable workflow name
    pub name: String,

    /// DAG definition: nodes and edges, opaque to the client
    pub definition_json: JsonValue,

    /// Timestamp the workflow was created, as reported by the server
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `POST /v1/workflows`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowCreate {
    pub name: String,
    pub definition_json: JsonValue,
}

/// Body for `POST /v1/workflows/{id}/run`.
///
/// Either an existing `project_id` or a `url` (with optional `project_name`)
/// seeds the ingest node; the rest mirrors a generate request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowRunRequest {
    pub project_id: Option<i64>,
    pub url: Option<String>,
    pub project_name: Option<String>,
    pub outputs: Vec<OutputKind>,
    pub tone: String,
    pub brand_voice: Option<String>,
    pub template_id: Option<i64>,
}
