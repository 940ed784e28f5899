//! Workflows view state.
//!
//! Workflow list, create form, and the run form. Definitions are validated
//! as JSON locally before anything is sent; the run form reuses the
//! generate-options rules for outputs and template gating.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{Project, Template, Workflow, WorkflowCreate, WorkflowRunRequest};

use super::generate::GenerateOptions;
use super::ValidationError;

pub struct WorkflowsView {
    client: Arc<ApiClient>,
    pub workflows: Vec<Workflow>,
    pub projects: Vec<Project>,
    pub templates: Vec<Template>,
    pub selected_workflow_id: Option<i64>,
}

impl WorkflowsView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            workflows: Vec::new(),
            projects: Vec::new(),
            templates: Vec::new(),
            selected_workflow_id: None,
        }
    }

    /// Reload workflows, projects and templates together (all-complete
    /// barrier), then reconcile the selection: keep it while the workflow
    /// still exists, otherwise fall back to the first row.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (workflows, projects, templates) = tokio::try_join!(
            self.client.workflows(),
            self.client.projects(),
            self.client.templates(None),
        )?;
        self.workflows = workflows;
        self.projects = projects;
        self.templates = templates;

        self.selected_workflow_id = match self.selected_workflow_id {
            Some(id) if self.workflows.iter().any(|workflow| workflow.id == id) => Some(id),
            _ => self.workflows.first().map(|workflow| workflow.id),
        };
        Ok(())
    }

    pub fn selected_workflow(&self) -> Option<&Workflow> {
        let id = self.selected_workflow_id?;
        self.workflows.iter().find(|workflow| workflow.id == id)
    }

    /// Templates offered by the run form: only for single-output runs, and
    /// only those matching that output kind.
    pub fn selectable_templates(&self, options: &GenerateOptions) -> Vec<&Template> {
        match options.single_output() {
            Some(kind) => self
                .templates
                .iter()
                .filter(|template| template.kind == kind)
                .collect(),
            None => Vec::new(),
        }
    }

    pub async fn create(&mut self, request: &WorkflowCreate) -> Result<(), ClientError> {
        self.client.create_workflow(request).await?;
        self.refresh().await
    }

    /// Run the selected workflow; returns the initial job snapshot to poll.
    /// Callers must check [`Self::selected_workflow`] first.
    pub async fn run(
        &self,
        workflow_id: i64,
        request: &WorkflowRunRequest,
    ) -> Result<crate::models::Job, ClientError> {
        self.client.run_workflow(workflow_id, request).await
    }
}

/// Parse a workflow definition, rejecting anything that is not valid JSON.
pub fn parse_definition(text: &str) -> Result<JsonValue, ValidationError> {
    serde_json::from_str(text).map_err(|_| ValidationError::WorkflowDefinitionInvalid)
}

/// Build a create request: non-empty name, JSON-parseable definition.
pub fn create_request(name: &str, definition_text: &str) -> Result<WorkflowCreate, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::WorkflowNameRequired);
    }
    Ok(WorkflowCreate {
        name: trimmed.to_string(),
        definition_json: parse_definition(definition_text)?,
    })
}

/// Parameters for one workflow run.
#[derive(Debug, Clone, Default)]
pub struct WorkflowRunForm {
    /// Existing project to run against, if any.
    pub project_id: Option<i64>,
    /// Source URL for the ingest node.
    pub url: String,
    /// Name for a project created by the run.
    pub project_name: String,
    pub options: GenerateOptions,
}

impl WorkflowRunForm {
    /// Build the run request, validating the generate options first.
    pub fn to_request(&self) -> Result<WorkflowRunRequest, ValidationError> {
        self.options.validate()?;
        let url = self.url.trim();
        let project_name = self.project_name.trim();
        Ok(WorkflowRunRequest {
            project_id: self.project_id,
            url: (!url.is_empty()).then(|| url.to_string()),
            project_name: (!project_name.is_empty()).then(|| project_name.to_string()),
            outputs: self.options.selected_outputs(),
            tone: self.options.tone.clone(),
            brand_voice: self.options.brand_voice_value(),
            template_id: self.options.template_id_value(),
        })
    }
}
