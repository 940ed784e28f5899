//! # Views
//!
//! Per-view state objects and the pure derivations behind them. Each view
//! owns its own fetched collections, filter state and error surface; nothing
//! here is process-wide. Filters and groupings are total, side-effect-free
//! functions over in-memory collections.

use thiserror::Error;

pub mod analytics;
pub mod dashboard;
pub mod filters;
pub mod generate;
pub mod project;
pub mod providers;
pub mod schedule;
pub mod templates;
pub mod workflows;

pub use filters::{ArtifactFilter, ArtifactTab, JobFilter};
pub use generate::GenerateOptions;

/// Input problems caught locally, before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select at least one output type.")]
    NoOutputsSelected,
    #[error("Template name is required.")]
    TemplateNameRequired,
    #[error("Template content is required.")]
    TemplateContentRequired,
    #[error("Workflow name is required.")]
    WorkflowNameRequired,
    #[error("Workflow definition must be valid JSON.")]
    WorkflowDefinitionInvalid,
    #[error("Select a workflow first.")]
    NoWorkflowSelected,
    #[error("API key cannot be empty.")]
    ApiKeyEmpty,
    #[error("A source URL is required.")]
    UrlRequired,
    #[error("Image prompt is required.")]
    PromptRequired,
}
