//! Generate-options form state.
//!
//! Output-kind toggles, tone, brand voice and template choice for a
//! generation run. A saved template can only be used when exactly one output
//! kind is selected; the template list is then queried by that kind.

use std::collections::BTreeSet;

use crate::models::{GenerateRequest, OutputKind, Template};

use super::ValidationError;

/// Form state for a generation run (used by both the project view and the
/// workflow run form).
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub outputs: BTreeSet<OutputKind>,
    pub tone: String,
    pub brand_voice: String,
    pub template_id: Option<i64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            outputs: OutputKind::ALL.into_iter().collect(),
            tone: "professional".to_string(),
            brand_voice: String::new(),
            template_id: None,
        }
    }
}

impl GenerateOptions {
    pub fn toggle_output(&mut self, kind: OutputKind) {
        if !self.outputs.remove(&kind) {
            self.outputs.insert(kind);
        }
    }

    pub fn selected_outputs(&self) -> Vec<OutputKind> {
        self.outputs.iter().copied().collect()
    }

    /// The single selected output kind, when exactly one is selected.
    pub fn single_output(&self) -> Option<OutputKind> {
        if self.outputs.len() == 1 {
            self.outputs.iter().next().copied()
        } else {
            None
        }
    }

    /// Saved templates are only selectable for single-output runs.
    pub fn template_selection_enabled(&self) -> bool {
        self.single_output().is_some()
    }

    /// Which kind to query `/v1/templates?kind=` with, if any.
    pub fn template_query_kind(&self) -> Option<OutputKind> {
        self.single_output()
    }

    /// Keep the chosen template only while it is still offered; clear it when
    /// the selection rules no longer allow one.
    pub fn retain_template(&mut self, available: &[Template]) {
        if !self.template_selection_enabled() {
            self.template_id = None;
            return;
        }
        if let Some(id) = self.template_id
            && !available.iter().any(|template| template.id == id)
        {
            self.template_id = None;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.outputs.is_empty() {
            return Err(ValidationError::NoOutputsSelected);
        }
        Ok(())
    }

    /// Trimmed brand voice, or none when blank.
    pub fn brand_voice_value(&self) -> Option<String> {
        let trimmed = self.brand_voice.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Effective template id: only honored for single-output runs.
    pub fn template_id_value(&self) -> Option<i64> {
        self.single_output().and(self.template_id)
    }

    /// Build the generate request, validating first.
    pub fn to_request(&self, project_id: i64) -> Result<GenerateRequest, ValidationError> {
        self.validate()?;
        Ok(GenerateRequest {
            project_id,
            outputs: self.selected_outputs(),
            tone: self.tone.clone(),
            brand_voice: self.brand_voice_value(),
            template_id: self.template_id_value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as JsonValue;

    fn template(id: i64, kind: OutputKind) -> Template {
        Template {
            id,
            name: format!("template {id}"),
            kind,
            version: 1,
            content: String::new(),
            meta: JsonValue::Null,
        }
    }

    #[test]
    fn defaults_select_all_outputs() {
        let options = GenerateOptions::default();
        assert_eq!(options.selected_outputs(), OutputKind::ALL.to_vec());
        assert!(options.validate().is_ok());
        assert!(!options.template_selection_enabled());
    }

    #[test]
    fn no_outputs_is_a_validation_error() {
        let mut options = GenerateOptions::default();
        for kind in OutputKind::ALL {
            options.toggle_output(kind);
        }
        assert_eq!(
            options.validate(),
            Err(ValidationError::NoOutputsSelected)
        );
        assert!(options.to_request(1).is_err());
    }

    #[test]
    fn single_output_enables_template_selection_and_query() {
        let mut options = GenerateOptions::default();
        options.toggle_output(OutputKind::Linkedin);
        options.toggle_output(OutputKind::Blog);

        assert!(options.template_selection_enabled());
        assert_eq!(options.template_query_kind(), Some(OutputKind::Tweet));
    }

    #[test]
    fn template_is_dropped_when_selection_rules_change() {
        let mut options = GenerateOptions::default();
        options.toggle_output(OutputKind::Linkedin);
        options.toggle_output(OutputKind::Blog);
        options.template_id = Some(9);

        // Still offered: kept.
        options.retain_template(&[template(9, OutputKind::Tweet)]);
        assert_eq!(options.template_id, Some(9));

        // No longer in the list: cleared.
        options.retain_template(&[template(4, OutputKind::Tweet)]);
        assert_eq!(options.template_id, None);

        // Multi-output: cleared regardless of the list.
        options.template_id = Some(4);
        options.toggle_output(OutputKind::Blog);
        options.retain_template(&[template(4, OutputKind::Tweet)]);
        assert_eq!(options.template_id, None);
    }

    #[test]
    fn request_trims_brand_voice_and_gates_template() {
        let mut options = GenerateOptions::default();
        options.brand_voice = "  crisp and direct  ".to_string();
        options.template_id = Some(5);

        let request = options.to_request(42).unwrap();
        assert_eq!(request.project_id, 42);
        assert_eq!(request.brand_voice.as_deref(), Some("crisp and direct"));
        // Three outputs selected, so the template must not ride along.
        assert_eq!(request.template_id, None);
    }
}
