//! # Workflow Run Projection
//!
//! Derives per-node progress rows from a workflow job's free-form output.
//! The payload is loosely typed: rows are projected only when
//! `output.node_statuses` is actually an array, and every field is coerced
//! to display text no matter what JSON type arrives.

use serde_json::Value as JsonValue;

use crate::models::Job;

/// One rendered node row from a workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatusRow {
    pub node_id: String,
    pub task: String,
    pub status: String,
    pub error: Option<String>,
}

/// Extract per-node status rows from a job, in payload order.
///
/// Returns `None` when the job has no output or the output carries no
/// `node_statuses` array — callers render no per-node detail in that case.
pub fn node_statuses(job: &Job) -> Option<Vec<NodeStatusRow>> {
    node_statuses_from(job.output.as_ref()?)
}

/// Same projection over a raw output value.
pub fn node_statuses_from(output: &JsonValue) -> Option<Vec<NodeStatusRow>> {
    let entries = output.get("node_statuses")?.as_array()?;
    Some(entries.iter().map(node_row).collect())
}

fn node_row(entry: &JsonValue) -> NodeStatusRow {
    NodeStatusRow {
        node_id: display_text(entry.get("node_id")),
        task: display_text(entry.get("task")),
        status: display_text(entry.get("status")),
        error: entry
            .get("error")
            .filter(|value| !value.is_null())
            .map(coerce_text),
    }
}

/// Missing or null fields render as `unknown` rather than failing the row.
fn display_text(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => "unknown".to_string(),
        Some(value) => coerce_text(value),
    }
}

fn coerce_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projects_rows_in_payload_order() {
        let output = json!({
            "node_statuses": [
                { "node_id": "ingest", "task": "ingest_youtube", "status": "done" },
                { "node_id": "generate", "task": "generate_posts", "status": "running" }
            ]
        });

        let rows = node_statuses_from(&output).expect("array output projects rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].node_id, "ingest");
        assert_eq!(rows[0].task, "ingest_youtube");
        assert_eq!(rows[0].status, "done");
        assert_eq!(rows[0].error, None);
        assert_eq!(rows[1].node_id, "generate");
        assert_eq!(rows[1].status, "running");
    }

    #[test]
    fn non_array_node_statuses_projects_nothing() {
        assert_eq!(node_statuses_from(&json!({})), None);
        assert_eq!(
            node_statuses_from(&json!({ "node_statuses": "oops" })),
            None
        );
        assert_eq!(
            node_statuses_from(&json!({ "node_statuses": { "ingest": "done" } })),
            None
        );
    }

    #[test]
    fn arbitrary_value_types_are_coerced() {
        let output = json!({
            "node_statuses": [
                { "node_id": 3, "task": null, "status": true, "error": { "code": 500 } }
            ]
        });

        let rows = node_statuses_from(&output).unwrap();
        assert_eq!(rows[0].node_id, "3");
        assert_eq!(rows[0].task, "unknown");
        assert_eq!(rows[0].status, "true");
        assert_eq!(rows[0].error.as_deref(), Some(r#"{"code":500}"#));
    }

    #[test]
    fn null_error_is_absent() {
        let output = json!({
            "node_statuses": [
                { "node_id": "a", "task": "t", "status": "failed", "error": null }
            ]
        });
        let rows = node_statuses_from(&output).unwrap();
        assert_eq!(rows[0].error, None);
    }
}
