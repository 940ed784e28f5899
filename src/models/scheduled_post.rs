//! ScheduledPost entity model
//!
//! A scheduled post queues an artifact (or free-standing content) for
//! publishing on a platform at a point in time. Timestamps are carried
//! verbatim as the ISO-8601 strings the server emits; the schedule view
//! groups on the date prefix of `scheduled_at`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Scheduled post resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPost {
    /// Unique identifier for the scheduled post
    pub id: i64,

    /// Workspace the post belongs to
    pub workspace_id: i64,

    /// Originating project, if any
    #[serde(default)]
    pub project_id: Option<i64>,

    /// Artifact the content was taken from, if any
    #[serde(default)]
    pub artifact_id: Option<i64>,

    /// Target platform
    pub platform: Platform,

    /// Post title
    #[serde(default)]
    pub title: String,

    /// Post body
    #[serde(default)]
    pub content: String,

    /// When the post should go out (ISO-8601)
    pub scheduled_at: String,

    /// Publishing lifecycle status
    pub status: PostStatus,

    /// Free-form metadata
    #[serde(default)]
    pub meta: JsonValue,

    /// Creation timestamp as reported by the server
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last-update timestamp as reported by the server
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ScheduledPost {
    /// Date portion (first 10 characters) of `scheduled_at`, the grouping
    /// key for the schedule view. Lexicographic order on these keys is
    /// chronological for ISO-8601 timestamps.
    pub fn date_key(&self) -> String {
        self.scheduled_at.chars().take(10).collect()
    }

    /// Draft and scheduled posts can still be edited or cancelled.
    pub fn is_editable(&self) -> bool {
        matches!(self.status, PostStatus::Draft | PostStatus::Scheduled)
    }
}

/// Publishing lifecycle status of a scheduled post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Ready,
    Sent,
    Failed,
    Cancelled,
    /// Tag not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Ready => "ready",
            PostStatus::Sent => "sent",
            PostStatus::Failed => "failed",
            PostStatus::Cancelled => "cancelled",
            PostStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(PostStatus::Draft),
            "scheduled" => Ok(PostStatus::Scheduled),
            "ready" => Ok(PostStatus::Ready),
            "sent" => Ok(PostStatus::Sent),
            "failed" => Ok(PostStatus::Failed),
            "cancelled" => Ok(PostStatus::Cancelled),
            other => Err(format!("unknown post status '{other}'")),
        }
    }
}

/// Target publishing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Twitter,
    Linkedin,
    Blog,
    /// Tag not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Blog => "blog",
            Platform::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "twitter" => Ok(Platform::Twitter),
            "linkedin" => Ok(Platform::Linkedin),
            "blog" => Ok(Platform::Blog),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Body for `POST /v1/schedule`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledPostCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    pub platform: Platform,
    pub title: String,
    pub content: String,
    pub scheduled_at: String,
}

/// Body for `PATCH /v1/schedule/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduledPostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

impl ScheduledPostUpdate {
    pub fn reschedule(scheduled_at: impl Into<String>) -> Self {
        Self {
            scheduled_at: Some(scheduled_at.into()),
            ..Self::default()
        }
    }
}
