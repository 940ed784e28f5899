//! # API Client
//!
//! Typed client for the Clipcast REST API. One shared `reqwest::Client` with
//! a request timeout, JSON in and out. Any non-2xx response is read as text
//! and surfaced as [`ClientError::Api`], so callers always see
//! `API {status}: {body}`.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::AppConfig;
use crate::error::ClientError;
use crate::models::{
    Artifact, ArtifactUpdate, GenerateRequest, IngestRequest, Job, MediaGenerateRequest,
    OutputKind, Project, ProjectCreate, ProviderKeyUpdate, ProviderSetting, ScheduledPost,
    ScheduledPostCreate, ScheduledPostUpdate, SummaryItem, Template, TemplateCreate,
    TemplateUpdate, TimelinePoint, Workflow, WorkflowCreate, WorkflowRunRequest,
};

/// Client for the `/v1` API surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        let base_url = Url::parse(&config.api_base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build a client against an explicit base URL with default settings.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&impl Serialize>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        self.request(Method::GET, url, None::<&()>).await
    }

    /// DELETE with no meaningful response body.
    async fn delete(&self, url: Url) -> Result<(), ClientError> {
        let response = self.http.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    // Projects and ingest

    pub async fn projects(&self) -> Result<Vec<Project>, ClientError> {
        self.get(self.url("/v1/projects")?).await
    }

    pub async fn project(&self, id: i64) -> Result<Project, ClientError> {
        self.get(self.url(&format!("/v1/projects/{id}"))?).await
    }

    pub async fn create_project(&self, body: &ProjectCreate) -> Result<Project, ClientError> {
        self.request(Method::POST, self.url("/v1/projects")?, Some(body))
            .await
    }

    /// Kick off a YouTube ingest; returns the ingest job to poll.
    pub async fn ingest_youtube(&self, body: &IngestRequest) -> Result<Job, ClientError> {
        self.request(Method::POST, self.url("/v1/ingest/youtube")?, Some(body))
            .await
    }

    // Jobs and generation

    pub async fn job(&self, id: i64) -> Result<Job, ClientError> {
        self.get(self.url(&format!("/v1/jobs/{id}"))?).await
    }

    /// Jobs for a project, most recent first.
    pub async fn jobs(&self, project_id: i64, limit: u32) -> Result<Vec<Job>, ClientError> {
        let mut url = self.url("/v1/jobs")?;
        url.query_pairs_mut()
            .append_pair("project_id", &project_id.to_string())
            .append_pair("limit", &limit.to_string());
        self.get(url).await
    }

    /// Trigger post generation; returns the generate job to poll.
    pub async fn generate(&self, body: &GenerateRequest) -> Result<Job, ClientError> {
        self.request(Method::POST, self.url("/v1/generate")?, Some(body))
            .await
    }

    /// Trigger media generation; returns the media job to poll.
    pub async fn generate_media(&self, body: &MediaGenerateRequest) -> Result<Job, ClientError> {
        self.request(Method::POST, self.url("/v1/media/generate")?, Some(body))
            .await
    }

    // Artifacts

    pub async fn artifacts(&self, project_id: i64) -> Result<Vec<Artifact>, ClientError> {
        let mut url = self.url("/v1/artifacts")?;
        url.query_pairs_mut()
            .append_pair("project_id", &project_id.to_string());
        self.get(url).await
    }

    pub async fn update_artifact(
        &self,
        id: i64,
        body: &ArtifactUpdate,
    ) -> Result<Artifact, ClientError> {
        self.request(
            Method::PATCH,
            self.url(&format!("/v1/artifacts/{id}"))?,
            Some(body),
        )
        .await
    }

    // Templates

    /// Templates, optionally narrowed to one output kind.
    pub async fn templates(&self, kind: Option<OutputKind>) -> Result<Vec<Template>, ClientError> {
        let mut url = self.url("/v1/templates")?;
        if let Some(kind) = kind {
            url.query_pairs_mut().append_pair("kind", kind.as_str());
        }
        self.get(url).await
    }

    pub async fn create_template(&self, body: &TemplateCreate) -> Result<Template, ClientError> {
        self.request(Method::POST, self.url("/v1/templates")?, Some(body))
            .await
    }

    pub async fn update_template(
        &self,
        id: i64,
        body: &TemplateUpdate,
    ) -> Result<Template, ClientError> {
        self.request(
            Method::PATCH,
            self.url(&format!("/v1/templates/{id}"))?,
            Some(body),
        )
        .await
    }

    pub async fn delete_template(&self, id: i64) -> Result<(), ClientError> {
        self.delete(self.url(&format!("/v1/templates/{id}"))?).await
    }

    // Workflows

    pub async fn workflows(&self) -> Result<Vec<Workflow>, ClientError> {
        self.get(self.url("/v1/workflows")?).await
    }

    pub async fn create_workflow(&self, body: &WorkflowCreate) -> Result<Workflow, ClientError> {
        self.request(Method::POST, self.url("/v1/workflows")?, Some(body))
            .await
    }

    /// Run a workflow; returns the initial job snapshot to poll.
    pub async fn run_workflow(
        &self,
        id: i64,
        body: &WorkflowRunRequest,
    ) -> Result<Job, ClientError> {
        self.request(
            Method::POST,
            self.url(&format!("/v1/workflows/{id}/run"))?,
            Some(body),
        )
        .await
    }

    // Schedule

    pub async fn scheduled_posts(&self, limit: u32) -> Result<Vec<ScheduledPost>, ClientError> {
        let mut url = self.url("/v1/schedule")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get(url).await
    }

    pub async fn create_scheduled_post(
        &self,
        body: &ScheduledPostCreate,
    ) -> Result<ScheduledPost, ClientError> {
        self.request(Method::POST, self.url("/v1/schedule")?, Some(body))
            .await
    }

    pub async fn update_scheduled_post(
        &self,
        id: i64,
        body: &ScheduledPostUpdate,
    ) -> Result<ScheduledPost, ClientError> {
        self.request(
            Method::PATCH,
            self.url(&format!("/v1/schedule/{id}"))?,
            Some(body),
        )
        .await
    }

    /// Cancel a scheduled post.
    pub async fn delete_scheduled_post(&self, id: i64) -> Result<(), ClientError> {
        self.delete(self.url(&format!("/v1/schedule/{id}"))?).await
    }

    // Provider settings

    pub async fn provider_settings(&self) -> Result<Vec<ProviderSetting>, ClientError> {
        self.get(self.url("/v1/provider-settings/text")?).await
    }

    pub async fn provider_setting(&self, provider: &str) -> Result<ProviderSetting, ClientError> {
        self.get(self.url(&format!("/v1/provider-settings/text/{provider}"))?)
            .await
    }

    pub async fn put_provider_key(
        &self,
        provider: &str,
        body: &ProviderKeyUpdate,
    ) -> Result<ProviderSetting, ClientError> {
        self.request(
            Method::PUT,
            self.url(&format!("/v1/provider-settings/text/{provider}"))?,
            Some(body),
        )
        .await
    }

    pub async fn delete_provider_key(&self, provider: &str) -> Result<(), ClientError> {
        self.delete(self.url(&format!("/v1/provider-settings/text/{provider}"))?)
            .await
    }

    // Analytics

    pub async fn analytics_summary(&self, days: u32) -> Result<Vec<SummaryItem>, ClientError> {
        let mut url = self.url("/v1/analytics/summary")?;
        url.query_pairs_mut().append_pair("days", &days.to_string());
        self.get(url).await
    }

    pub async fn analytics_timeline(&self, days: u32) -> Result<Vec<TimelinePoint>, ClientError> {
        let mut url = self.url("/v1/analytics/timeline")?;
        url.query_pairs_mut().append_pair("days", &days.to_string());
        self.get(url).await
    }
}
