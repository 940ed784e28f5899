//! # Console Commands
//!
//! clap-driven command surface over the library. Commands that start a job
//! (`ingest`, `generate`, `media`, `workflows run`) attach the poller and
//! stream status lines until the job reaches a terminal state; Ctrl-C tears
//! the watch down cleanly.

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::models::{
    ArtifactUpdate, Job, MediaGenerateRequest, OutputKind, Platform, PostStatus, ProjectCreate,
    ScheduledPostCreate,
};
use crate::poller::{JobPoller, PollObserver, PollOutcome};
use crate::projection;
use crate::views::{
    self, GenerateOptions, analytics::AnalyticsView, dashboard::DashboardView,
    project::ProjectView, providers::ProvidersView, schedule::ScheduleView,
    templates::TemplatesView, workflows::WorkflowsView,
};

#[derive(Debug, Parser)]
#[command(
    name = "clipcast",
    version,
    about = "Console for the Clipcast content-repurposing API"
)]
pub struct Cli {
    /// Override the configured API base URL.
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects or show one project's artifacts and jobs.
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// Import a YouTube URL and watch the ingest job.
    Ingest {
        url: String,
        /// Name for the created project.
        #[arg(long)]
        name: Option<String>,
    },
    /// Trigger post generation for a project and watch the job.
    Generate {
        #[arg(long)]
        project: i64,
        /// Output kinds to produce (defaults to all three).
        #[arg(long, value_delimiter = ',')]
        outputs: Vec<OutputKind>,
        #[arg(long, default_value = "professional")]
        tone: String,
        #[arg(long)]
        brand_voice: Option<String>,
        /// Saved template id; only honored with exactly one output kind.
        #[arg(long)]
        template: Option<i64>,
    },
    /// Generate an image for a project and watch the job.
    Media {
        #[arg(long)]
        project: i64,
        prompt: String,
    },
    /// Inspect or watch jobs.
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// List or edit a project's artifacts.
    #[command(subcommand)]
    Artifacts(ArtifactsCommand),
    /// Manage prompt templates.
    #[command(subcommand)]
    Templates(TemplatesCommand),
    /// Manage and run workflow DAGs.
    #[command(subcommand)]
    Workflows(WorkflowsCommand),
    /// Manage scheduled posts.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Manage provider API keys.
    #[command(subcommand)]
    Providers(ProvidersCommand),
    /// Show activity analytics.
    Analytics {
        /// Reporting window in days.
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List all projects.
    List,
    /// Show one project with its artifacts and jobs.
    Show {
        id: i64,
        /// Search artifacts by kind, title or content.
        #[arg(long)]
        query: Option<String>,
        /// Keep only artifacts with non-blank content.
        #[arg(long)]
        with_content: bool,
        /// Keep only jobs with errors.
        #[arg(long)]
        errors_only: bool,
    },
    /// Create a project without ingesting.
    Create {
        name: String,
        #[arg(long, default_value = "youtube")]
        source_type: String,
        #[arg(long)]
        source_ref: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// Fetch one job snapshot.
    Show { id: i64 },
    /// Poll a job until it reaches a terminal status.
    Watch { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ArtifactsCommand {
    /// List a project's artifacts.
    List {
        #[arg(long)]
        project: i64,
    },
    /// Replace an artifact's content.
    Edit {
        id: i64,
        #[arg(long)]
        content: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List templates, optionally narrowed to one kind.
    List {
        #[arg(long)]
        kind: Option<OutputKind>,
    },
    /// Create a template.
    Create {
        name: String,
        #[arg(long)]
        kind: OutputKind,
        #[arg(long)]
        content: String,
    },
    /// Edit a template (server bumps the version).
    Edit {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        kind: OutputKind,
        #[arg(long)]
        content: String,
    },
    /// Delete a template.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum WorkflowsCommand {
    /// List workflow definitions.
    List,
    /// Create a workflow from a JSON definition.
    Create {
        name: String,
        /// DAG definition as a JSON string.
        #[arg(long)]
        definition: String,
    },
    /// Run a workflow and watch per-node progress.
    Run {
        id: i64,
        #[arg(long)]
        project: Option<i64>,
        /// Source URL for the ingest node.
        #[arg(long)]
        url: Option<String>,
        /// Name for a project created by the run.
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long, value_delimiter = ',')]
        outputs: Vec<OutputKind>,
        #[arg(long, default_value = "professional")]
        tone: String,
        #[arg(long)]
        brand_voice: Option<String>,
        #[arg(long)]
        template: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// List scheduled posts grouped by day.
    List {
        #[arg(long)]
        status: Option<PostStatus>,
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Queue an artifact (or raw content) for publishing.
    Add {
        #[arg(long)]
        platform: Platform,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// ISO-8601 time; defaults to now.
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        artifact: Option<i64>,
    },
    /// Move a post to a new time.
    Move {
        id: i64,
        #[arg(long)]
        at: String,
    },
    /// Cancel a post.
    Cancel { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ProvidersCommand {
    /// List provider credential status.
    List,
    /// Store an API key for a provider.
    Set { provider: String, key: String },
    /// Remove a provider's API key.
    Remove { provider: String },
}

/// Observer that narrates poll progress to stdout.
struct PrintObserver;

#[async_trait::async_trait]
impl PollObserver for PrintObserver {
    async fn job_updated(&self, job: &Job) {
        println!("job #{} status {}", job.id, job.status);
        if let Some(rows) = projection::node_statuses(job) {
            for row in rows {
                match &row.error {
                    Some(error) => println!(
                        "  {} ({}): {} - {}",
                        row.node_id, row.task, row.status, error
                    ),
                    None => println!("  {} ({}): {}", row.node_id, row.task, row.status),
                }
            }
        }
    }
}

/// Run the parsed command against the configured API.
pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(api_base) = cli.api_base {
        config.api_base_url = api_base;
        config.validate()?;
    }
    let client = Arc::new(ApiClient::new(&config)?);
    let poller = JobPoller::new(client.clone(), config.poller.clone());

    match cli.command {
        Command::Projects(command) => run_projects(command, client).await,
        Command::Ingest { url, name } => {
            let request = views::dashboard::ingest_request(&url, name.as_deref())?;
            let dashboard = DashboardView::new(client);
            let job = dashboard.ingest(&request).await?;
            println!("ingest started as job #{}", job.id);
            watch_job(&poller, job.id).await
        }
        Command::Generate {
            project,
            outputs,
            tone,
            brand_voice,
            template,
        } => {
            let options = generate_options(outputs, tone, brand_voice, template);
            let request = options.to_request(project)?;
            let job = client.generate(&request).await?;
            println!("generation started as job #{}", job.id);
            watch_job(&poller, job.id).await
        }
        Command::Media { project, prompt } => {
            let trimmed = prompt.trim();
            if trimmed.is_empty() {
                bail!(views::ValidationError::PromptRequired);
            }
            let request = MediaGenerateRequest::image(project, trimmed);
            let job = client.generate_media(&request).await?;
            println!("media generation started as job #{}", job.id);
            watch_job(&poller, job.id).await
        }
        Command::Jobs(command) => match command {
            JobsCommand::Show { id } => {
                let job = client.job(id).await?;
                print_job(&job);
                Ok(())
            }
            JobsCommand::Watch { id } => watch_job(&poller, id).await,
        },
        Command::Artifacts(command) => run_artifacts(command, client).await,
        Command::Templates(command) => run_templates(command, client).await,
        Command::Workflows(command) => run_workflows(command, client, &poller).await,
        Command::Schedule(command) => run_schedule(command, client).await,
        Command::Providers(command) => run_providers(command, client).await,
        Command::Analytics { days } => {
            let mut view = AnalyticsView::new(client);
            view.period_days = days;
            view.refresh().await?;

            println!("total events: {}", view.total_events());
            for item in &view.summary {
                println!(
                    "  {}: {}",
                    views::analytics::kind_label(&item.kind),
                    item.count
                );
            }
            let kinds = view.kinds();
            for row in view.rows() {
                let cells: Vec<String> = kinds
                    .iter()
                    .map(|kind| format!("{}={}", kind, row.count(kind)))
                    .collect();
                println!("{}  {}", row.date, cells.join(" "));
            }
            Ok(())
        }
    }
}

fn generate_options(
    outputs: Vec<OutputKind>,
    tone: String,
    brand_voice: Option<String>,
    template: Option<i64>,
) -> GenerateOptions {
    let mut options = GenerateOptions {
        tone,
        brand_voice: brand_voice.unwrap_or_default(),
        template_id: template,
        ..GenerateOptions::default()
    };
    if !outputs.is_empty() {
        options.outputs = outputs.into_iter().collect();
    }
    options
}

/// Poll a job to its terminal state, tearing the watch down on Ctrl-C.
async fn watch_job(poller: &JobPoller, job_id: i64) -> anyhow::Result<()> {
    let watch = poller.watch(job_id, Arc::new(PrintObserver));
    let cancel = watch.cancellation_token();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            println!("watch cancelled");
            Ok(())
        }
        outcome = watch.join() => match outcome {
            PollOutcome::Finished(job) => {
                if let Some(error) = &job.error {
                    println!("job #{} {}: {}", job.id, job.status, error);
                } else {
                    println!("job #{} {}", job.id, job.status);
                }
                Ok(())
            }
            PollOutcome::Halted { job_id, error } => {
                bail!("polling job #{job_id} halted: {error}")
            }
            PollOutcome::Cancelled => {
                println!("watch cancelled");
                Ok(())
            }
        },
    }
}

async fn run_projects(command: ProjectsCommand, client: Arc<ApiClient>) -> anyhow::Result<()> {
    match command {
        ProjectsCommand::List => {
            let mut dashboard = DashboardView::new(client);
            dashboard.refresh().await?;
            for project in &dashboard.projects {
                println!(
                    "#{} {} ({} {})",
                    project.id, project.name, project.source_type, project.source_ref
                );
            }
            Ok(())
        }
        ProjectsCommand::Show {
            id,
            query,
            with_content,
            errors_only,
        } => {
            let mut view = ProjectView::new(client, id);
            view.artifact_filter.query = query.unwrap_or_default();
            view.artifact_filter.with_content_only = with_content;
            view.job_filter.errors_only = errors_only;
            view.refresh().await?;

            let project = view
                .project
                .as_ref()
                .context("project missing after refresh")?;
            println!(
                "#{} {} ({} {})",
                project.id, project.name, project.source_type, project.source_ref
            );
            println!(
                "latest job status: {}",
                view.header_status(None)
                    .map(|status| status.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );

            let jobs = view.filtered_jobs();
            println!("jobs ({} of {}):", jobs.len(), view.jobs.len());
            for job in jobs {
                print_job(job);
            }

            let artifacts = view.filtered_artifacts();
            println!(
                "artifacts ({} of {}):",
                artifacts.len(),
                view.artifacts.len()
            );
            for artifact in artifacts {
                println!(
                    "  #{} {} {}",
                    artifact.id,
                    artifact.kind,
                    artifact.title.as_deref().unwrap_or("Untitled")
                );
            }
            Ok(())
        }
        ProjectsCommand::Create {
            name,
            source_type,
            source_ref,
        } => {
            let project = client
                .create_project(&ProjectCreate {
                    name,
                    source_type,
                    source_ref,
                })
                .await?;
            println!("created project #{}", project.id);
            Ok(())
        }
    }
}

async fn run_artifacts(command: ArtifactsCommand, client: Arc<ApiClient>) -> anyhow::Result<()> {
    match command {
        ArtifactsCommand::List { project } => {
            for artifact in client.artifacts(project).await? {
                let preview = artifact.content.as_deref().unwrap_or("(no content)");
                let preview: String = preview.chars().take(80).collect();
                println!(
                    "#{} {} {} | {}",
                    artifact.id,
                    artifact.kind,
                    artifact.title.as_deref().unwrap_or("Untitled"),
                    preview
                );
            }
            Ok(())
        }
        ArtifactsCommand::Edit { id, content } => {
            let updated = client
                .update_artifact(id, &ArtifactUpdate::content(content))
                .await?;
            println!("saved artifact #{} ({})", updated.id, updated.kind);
            Ok(())
        }
    }
}

async fn run_templates(command: TemplatesCommand, client: Arc<ApiClient>) -> anyhow::Result<()> {
    let mut view = TemplatesView::new(client);
    match command {
        TemplatesCommand::List { kind } => {
            view.kind_filter = kind;
            view.refresh().await?;
            for template in &view.templates {
                println!(
                    "#{} {} ({} v{})",
                    template.id, template.name, template.kind, template.version
                );
            }
            Ok(())
        }
        TemplatesCommand::Create {
            name,
            kind,
            content,
        } => {
            let request = views::templates::create_request(&name, kind, &content)?;
            view.create(&request).await?;
            println!("created template '{name}'");
            Ok(())
        }
        TemplatesCommand::Edit {
            id,
            name,
            kind,
            content,
        } => {
            let request = views::templates::update_request(&name, kind, &content)?;
            view.save(id, &request).await?;
            println!("saved template #{id}");
            Ok(())
        }
        TemplatesCommand::Delete { id } => {
            view.remove(id).await?;
            println!("deleted template #{id}");
            Ok(())
        }
    }
}

async fn run_workflows(
    command: WorkflowsCommand,
    client: Arc<ApiClient>,
    poller: &JobPoller,
) -> anyhow::Result<()> {
    match command {
        WorkflowsCommand::List => {
            let mut view = WorkflowsView::new(client);
            view.refresh().await?;
            for workflow in &view.workflows {
                println!("#{} {}", workflow.id, workflow.name);
            }
            Ok(())
        }
        WorkflowsCommand::Create { name, definition } => {
            let request = views::workflows::create_request(&name, &definition)?;
            let mut view = WorkflowsView::new(client);
            view.create(&request).await?;
            println!("created workflow '{}'", request.name);
            Ok(())
        }
        WorkflowsCommand::Run {
            id,
            project,
            url,
            project_name,
            outputs,
            tone,
            brand_voice,
            template,
        } => {
            let form = views::workflows::WorkflowRunForm {
                project_id: project,
                url: url.unwrap_or_default(),
                project_name: project_name.unwrap_or_default(),
                options: generate_options(outputs, tone, brand_voice, template),
            };
            let request = form.to_request()?;
            let job = client.run_workflow(id, &request).await?;
            println!("workflow run started as job #{}", job.id);
            watch_job(poller, job.id).await
        }
    }
}

async fn run_schedule(command: ScheduleCommand, client: Arc<ApiClient>) -> anyhow::Result<()> {
    let mut view = ScheduleView::new(client.clone());
    match command {
        ScheduleCommand::List { status, platform } => {
            view.filter.status = status;
            view.filter.platform = platform;
            view.refresh().await?;

            for (date, posts) in view.grouped() {
                println!("{date}");
                for post in posts {
                    println!(
                        "  #{} [{}] {} ({}) at {}",
                        post.id, post.status, post.title, post.platform, post.scheduled_at
                    );
                }
            }
            Ok(())
        }
        ScheduleCommand::Add {
            platform,
            title,
            content,
            at,
            project,
            artifact,
        } => {
            let scheduled_at = at.unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
            let post = client
                .create_scheduled_post(&ScheduledPostCreate {
                    artifact_id: artifact,
                    project_id: project,
                    platform,
                    title,
                    content,
                    scheduled_at,
                })
                .await?;
            println!("scheduled post #{} for {}", post.id, post.scheduled_at);
            Ok(())
        }
        ScheduleCommand::Move { id, at } => {
            view.reschedule(id, &at).await?;
            println!("moved post #{id} to {at}");
            Ok(())
        }
        ScheduleCommand::Cancel { id } => {
            view.cancel(id).await?;
            println!("cancelled post #{id}");
            Ok(())
        }
    }
}

async fn run_providers(command: ProvidersCommand, client: Arc<ApiClient>) -> anyhow::Result<()> {
    let mut view = ProvidersView::new(client);
    match command {
        ProvidersCommand::List => {
            view.refresh().await?;
            for setting in &view.settings {
                let status = if setting.has_api_key {
                    "configured"
                } else {
                    "not configured"
                };
                let via = setting
                    .configured_via
                    .map(|via| format!(" ({via})"))
                    .unwrap_or_default();
                let hint = setting
                    .key_hint
                    .as_deref()
                    .map(|hint| format!(" {hint}"))
                    .unwrap_or_default();
                println!("{}: {status}{via}{hint}", setting.provider);
            }
            Ok(())
        }
        ProvidersCommand::Set { provider, key } => {
            let update = views::providers::key_update(&key)?;
            view.save_key(&provider, &update).await?;
            println!("stored key for {provider}");
            Ok(())
        }
        ProvidersCommand::Remove { provider } => {
            view.remove_key(&provider).await?;
            println!("removed key for {provider}");
            Ok(())
        }
    }
}

fn print_job(job: &Job) {
    match &job.error {
        Some(error) => println!("  #{} {} {} - {}", job.id, job.kind, job.status, error),
        None => println!("  #{} {} {}", job.id, job.kind, job.status),
    }
}
