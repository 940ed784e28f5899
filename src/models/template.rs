//! Template entity model
//!
//! Templates are versioned, parameterized prompts with `{token}` placeholders
//! that steer generation. The server increments `version` on edit; the client
//! only submits the new name/kind/content.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Output kind a generation run can produce; also the template vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Tweet,
    Linkedin,
    Blog,
    /// Tag not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl OutputKind {
    /// The three concrete kinds a run can request.
    pub const ALL: [OutputKind; 3] = [OutputKind::Tweet, OutputKind::Linkedin, OutputKind::Blog];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputKind::Tweet => "tweet",
            OutputKind::Linkedin => "linkedin",
            OutputKind::Blog => "blog",
            OutputKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tweet" => Ok(OutputKind::Tweet),
            "linkedin" => Ok(OutputKind::Linkedin),
            "blog" => Ok(OutputKind::Blog),
            other => Err(format!("unknown output kind '{other}'")),
        }
    }
}

/// Template resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier for the template
    pub id: i64,

    /// Human-readable template name
    pub name: String,

    /// Which output kind the template targets
    pub kind: OutputKind,

    /// Server-managed revision counter, incremented on every edit
    pub version: i64,

    /// Prompt body with `{token}` placeholders
    #[serde(default)]
    pub content: String,

    /// Free-form metadata
    #[serde(default)]
    pub meta: JsonValue,
}

/// Body for `POST /v1/templates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCreate {
    pub name: String,
    pub kind: OutputKind,
    pub content: String,
    pub meta: JsonValue,
}

/// Body for `PATCH /v1/templates/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<OutputKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn template_tolerates_missing_content_and_meta() {
        let template: Template = serde_json::from_value(json!({
            "id": 3,
            "name": "Punchy tweets",
            "kind": "tweet",
            "version": 2
        }))
        .unwrap();
        assert_eq!(template.content, "");
        assert_eq!(template.meta, JsonValue::Null);
    }

    #[test]
    fn unknown_kind_is_defensive() {
        let template: Template = serde_json::from_value(json!({
            "id": 4,
            "name": "Newsletter",
            "kind": "newsletter",
            "version": 1,
            "content": "..."
        }))
        .unwrap();
        assert_eq!(template.kind, OutputKind::Unknown);
    }

    #[test]
    fn output_kind_parses_wire_names() {
        assert_eq!("tweet".parse::<OutputKind>().unwrap(), OutputKind::Tweet);
        assert!("newsletter".parse::<OutputKind>().is_err());
    }
}
