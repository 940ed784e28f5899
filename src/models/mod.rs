//! # Data Models
//!
//! Wire-level entities and request payloads for the Clipcast API. All entity
//! state lives server-side; these types are transient, derived copies. Tagged
//! fields use closed enums with a defensive `Unknown` catch-all so an
//! unrecognized tag deserializes instead of failing the whole response.

pub mod analytics;
pub mod artifact;
pub mod job;
pub mod project;
pub mod provider_setting;
pub mod scheduled_post;
pub mod template;
pub mod workflow;

pub use analytics::{SummaryItem, TimelinePoint};
pub use artifact::{Artifact, ArtifactKind, ArtifactUpdate};
pub use job::{GenerateRequest, Job, JobKind, JobStatus, MediaGenerateRequest};
pub use project::{IngestRequest, Project, ProjectCreate};
pub use provider_setting::{ConfiguredVia, ProviderKeyUpdate, ProviderSetting};
pub use scheduled_post::{
    Platform, PostStatus, ScheduledPost, ScheduledPostCreate, ScheduledPostUpdate,
};
pub use template::{OutputKind, Template, TemplateCreate, TemplateUpdate};
pub use workflow::{Workflow, WorkflowCreate, WorkflowRunRequest};
