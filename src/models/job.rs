//! Job entity model
//!
//! A job is a server-tracked asynchronous unit of work. The client never
//! transitions a job itself; it polls `/v1/jobs/{id}` and reflects whatever
//! status the server reports. `succeeded` and `failed` are terminal.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::template::OutputKind;

/// Job resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier for the job
    pub id: i64,

    /// What kind of work the job performs
    pub kind: JobKind,

    /// Current lifecycle status
    pub status: JobStatus,

    /// Project the job belongs to, if any
    #[serde(default)]
    pub project_id: Option<i64>,

    /// Error text when the job failed
    #[serde(default)]
    pub error: Option<String>,

    /// Free-form output payload; workflow jobs carry `node_statuses` here
    #[serde(default)]
    pub output: Option<JsonValue>,
}

impl Job {
    /// Whether the job has reached a state after which no transition occurs.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Kind of work a job performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Ingest,
    Generate,
    Workflow,
    Media,
    /// Tag not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Ingest => "ingest",
            JobKind::Generate => "generate",
            JobKind::Workflow => "workflow",
            JobKind::Media => "media",
            JobKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
    /// Tag not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Terminal statuses never transition again; polling stops here.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for `POST /v1/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub project_id: i64,
    pub outputs: Vec<OutputKind>,
    pub tone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
}

/// Body for `POST /v1/media/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaGenerateRequest {
    pub project_id: i64,
    pub prompt: String,
    pub kind: String,
    pub size: String,
    pub quality: String,
    pub style: String,
}

impl MediaGenerateRequest {
    /// Image generation with the default size/quality/style knobs.
    pub fn image(project_id: i64, prompt: impl Into<String>) -> Self {
        Self {
            project_id,
            prompt: prompt.into(),
            kind: "image".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            style: "vivid".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn terminal_statuses() {
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Unknown.is_terminal());
    }

    #[test]
    fn unknown_tags_deserialize_defensively() {
        let job: Job = serde_json::from_value(json!({
            "id": 7,
            "kind": "transmogrify",
            "status": "paused"
        }))
        .expect("unknown tags must not fail deserialization");
        assert_eq!(job.kind, JobKind::Unknown);
        assert_eq!(job.status, JobStatus::Unknown);
        assert!(!job.is_terminal());
    }

    #[test]
    fn optional_fields_default() {
        let job: Job = serde_json::from_value(json!({
            "id": 1,
            "kind": "ingest",
            "status": "queued"
        }))
        .unwrap();
        assert_eq!(job.project_id, None);
        assert_eq!(job.error, None);
        assert_eq!(job.output, None);
    }
}
