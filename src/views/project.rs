//! Project detail view state.
//!
//! Holds one project's artifacts and jobs plus the filter state over them.
//! A refresh runs three fetches in parallel and joins them before any state
//! is applied, so partial results never show.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{Artifact, ArtifactUpdate, Job, JobStatus, Project};

use super::filters::{ArtifactFilter, JobFilter};

/// How many jobs the view keeps, most recent first.
const JOB_LIMIT: u32 = 20;

pub struct ProjectView {
    client: Arc<ApiClient>,
    pub project_id: i64,
    pub project: Option<Project>,
    pub artifacts: Vec<Artifact>,
    pub jobs: Vec<Job>,
    pub artifact_filter: ArtifactFilter,
    pub job_filter: JobFilter,
}

impl ProjectView {
    pub fn new(client: Arc<ApiClient>, project_id: i64) -> Self {
        Self {
            client,
            project_id,
            project: None,
            artifacts: Vec::new(),
            jobs: Vec::new(),
            artifact_filter: ArtifactFilter::default(),
            job_filter: JobFilter::default(),
        }
    }

    /// Reload project, artifacts and jobs. All three fetches must succeed
    /// before any of them is applied.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (project, artifacts, jobs) = tokio::try_join!(
            self.client.project(self.project_id),
            self.client.artifacts(self.project_id),
            self.client.jobs(self.project_id, JOB_LIMIT),
        )?;
        self.project = Some(project);
        self.artifacts = artifacts;
        self.jobs = jobs;
        Ok(())
    }

    pub fn filtered_artifacts(&self) -> Vec<&Artifact> {
        self.artifact_filter.apply(&self.artifacts)
    }

    pub fn filtered_jobs(&self) -> Vec<&Job> {
        self.job_filter.apply(&self.jobs)
    }

    /// Jobs arrive most-recent-first; element 0 is the latest.
    pub fn latest_job(&self) -> Option<&Job> {
        self.jobs.first()
    }

    /// Status shown in the header: a live poll snapshot wins over the latest
    /// listed job.
    pub fn header_status(&self, live: Option<&Job>) -> Option<JobStatus> {
        live.map(|job| job.status)
            .or_else(|| self.latest_job().map(|job| job.status))
    }

    /// Count for the "Filters (n)" badge; the artifact tab has its own
    /// control and is not counted.
    pub fn active_filter_count(&self) -> usize {
        usize::from(!self.artifact_filter.query.trim().is_empty())
            + usize::from(self.artifact_filter.with_content_only)
            + self.job_filter.active_count()
    }

    pub fn clear_filters(&mut self) {
        self.artifact_filter.query.clear();
        self.artifact_filter.with_content_only = false;
        self.job_filter = JobFilter::default();
    }

    /// Save edited artifact content, then refresh so the view reflects
    /// exactly what the server stored.
    pub async fn save_artifact_content(
        &mut self,
        artifact_id: i64,
        content: &str,
    ) -> Result<(), ClientError> {
        self.client
            .update_artifact(artifact_id, &ArtifactUpdate::content(content))
            .await?;
        self.refresh().await
    }
}
