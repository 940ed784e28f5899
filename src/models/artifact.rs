//! Artifact entity model
//!
//! Artifacts are generated or ingested content units attached to a project:
//! transcripts, post drafts, and images. Only the content (and title) can be
//! edited from the client, via `PATCH /v1/artifacts/{id}`.

use serde::{Deserialize, Serialize};

/// Artifact resource as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique identifier for the artifact
    pub id: i64,

    /// What the artifact is (transcript, tweet, image, ...)
    pub kind: ArtifactKind,

    /// Optional display title
    #[serde(default)]
    pub title: Option<String>,

    /// Text content, or an image URL for image-like kinds
    #[serde(default)]
    pub content: Option<String>,
}

impl Artifact {
    /// Whether the content field holds non-blank text.
    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .is_some_and(|content| !content.trim().is_empty())
    }
}

/// Kind of artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Transcript,
    Tweet,
    Linkedin,
    Blog,
    Image,
    Thumbnail,
    Icon,
    /// Tag not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl ArtifactKind {
    /// Image-like kinds whose content is a URL rather than text.
    pub fn is_image(self) -> bool {
        matches!(
            self,
            ArtifactKind::Image | ArtifactKind::Thumbnail | ArtifactKind::Icon
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Transcript => "transcript",
            ArtifactKind::Tweet => "tweet",
            ArtifactKind::Linkedin => "linkedin",
            ArtifactKind::Blog => "blog",
            ArtifactKind::Image => "image",
            ArtifactKind::Thumbnail => "thumbnail",
            ArtifactKind::Icon => "icon",
            ArtifactKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for `PATCH /v1/artifacts/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtifactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ArtifactUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_is_not_content() {
        let artifact = Artifact {
            id: 1,
            kind: ArtifactKind::Tweet,
            title: None,
            content: Some("   \n".to_string()),
        };
        assert!(!artifact.has_content());
    }

    #[test]
    fn image_like_kinds() {
        assert!(ArtifactKind::Image.is_image());
        assert!(ArtifactKind::Thumbnail.is_image());
        assert!(ArtifactKind::Icon.is_image());
        assert!(!ArtifactKind::Tweet.is_image());
    }

    #[test]
    fn content_patch_serializes_only_content() {
        let patch = ArtifactUpdate::content("updated");
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "content": "updated" }));
    }
}
