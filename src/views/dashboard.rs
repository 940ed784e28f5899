//! Dashboard view state: the project list and source ingest.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{IngestRequest, Job, Project};

use super::ValidationError;

pub struct DashboardView {
    client: Arc<ApiClient>,
    pub projects: Vec<Project>,
}

impl DashboardView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            projects: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.projects = self.client.projects().await?;
        Ok(())
    }

    /// Kick off a YouTube ingest with an already validated request; returns
    /// the job to poll.
    pub async fn ingest(&self, request: &IngestRequest) -> Result<Job, ClientError> {
        self.client.ingest_youtube(request).await
    }
}

/// Build an ingest request, rejecting a blank URL before any network call.
pub fn ingest_request(
    url: &str,
    project_name: Option<&str>,
) -> Result<IngestRequest, ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::UrlRequired);
    }
    Ok(IngestRequest {
        url: trimmed.to_string(),
        project_name: project_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    })
}
