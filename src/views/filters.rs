//! Artifact and job filters for the project detail view.
//!
//! Pure predicates over fetched collections: the filtered result is always a
//! subset of the input, and with every filter at its neutral value it is the
//! input itself.

use crate::models::{Artifact, ArtifactKind, Job, JobKind, JobStatus};

/// Artifact tab selection. `All` is neutral; every other tab keeps only one
/// artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactTab {
    #[default]
    All,
    Transcript,
    Tweet,
    Linkedin,
    Blog,
    Image,
}

impl ArtifactTab {
    pub fn matches(self, kind: ArtifactKind) -> bool {
        match self {
            ArtifactTab::All => true,
            ArtifactTab::Transcript => kind == ArtifactKind::Transcript,
            ArtifactTab::Tweet => kind == ArtifactKind::Tweet,
            ArtifactTab::Linkedin => kind == ArtifactKind::Linkedin,
            ArtifactTab::Blog => kind == ArtifactKind::Blog,
            ArtifactTab::Image => kind == ArtifactKind::Image,
        }
    }
}

/// Filter state for the artifact list.
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    pub tab: ArtifactTab,
    /// Case-insensitive substring query against kind, title and content.
    pub query: String,
    /// Keep only artifacts with non-blank content.
    pub with_content_only: bool,
}

impl ArtifactFilter {
    pub fn matches(&self, artifact: &Artifact) -> bool {
        if !self.tab.matches(artifact.kind) {
            return false;
        }
        if self.with_content_only && !artifact.has_content() {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {}",
            artifact.kind,
            artifact.title.as_deref().unwrap_or(""),
            artifact.content.as_deref().unwrap_or("")
        )
        .to_lowercase();
        haystack.contains(&query)
    }

    pub fn apply<'a>(&self, artifacts: &'a [Artifact]) -> Vec<&'a Artifact> {
        artifacts
            .iter()
            .filter(|artifact| self.matches(artifact))
            .collect()
    }
}

/// Filter state for the job list. `None` means "all".
#[derive(Debug, Clone, Copy, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub kind: Option<JobKind>,
    /// Keep only jobs carrying an error.
    pub errors_only: bool,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(status) = self.status
            && job.status != status
        {
            return false;
        }
        if let Some(kind) = self.kind
            && job.kind != kind
        {
            return false;
        }
        if self.errors_only && job.error.is_none() {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }

    /// Number of active criteria, for the "Filters (n)" badge.
    pub fn active_count(&self) -> usize {
        usize::from(self.status.is_some())
            + usize::from(self.kind.is_some())
            + usize::from(self.errors_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(id: i64, kind: ArtifactKind, title: &str, content: Option<&str>) -> Artifact {
        Artifact {
            id,
            kind,
            title: Some(title.to_string()),
            content: content.map(str::to_string),
        }
    }

    fn artifacts() -> Vec<Artifact> {
        vec![
            artifact(1, ArtifactKind::Transcript, "Talk", Some("full transcript")),
            artifact(2, ArtifactKind::Tweet, "Hook", Some("Rust rewrites everything")),
            artifact(3, ArtifactKind::Tweet, "Empty draft", Some("   ")),
            artifact(4, ArtifactKind::Blog, "Deep dive", None),
            artifact(5, ArtifactKind::Image, "Thumb", Some("https://img/1.png")),
        ]
    }

    fn job(id: i64, kind: JobKind, status: JobStatus, error: Option<&str>) -> Job {
        Job {
            id,
            kind,
            status,
            project_id: Some(1),
            error: error.map(str::to_string),
            output: None,
        }
    }

    fn jobs() -> Vec<Job> {
        vec![
            job(1, JobKind::Ingest, JobStatus::Succeeded, None),
            job(2, JobKind::Generate, JobStatus::Failed, Some("provider down")),
            job(3, JobKind::Generate, JobStatus::Running, None),
            job(4, JobKind::Workflow, JobStatus::Queued, None),
        ]
    }

    #[test]
    fn neutral_filters_are_identity() {
        let all = artifacts();
        let filtered = ArtifactFilter::default().apply(&all);
        assert_eq!(filtered.len(), all.len());

        let all_jobs = jobs();
        let filtered_jobs = JobFilter::default().apply(&all_jobs);
        assert_eq!(filtered_jobs.len(), all_jobs.len());
    }

    #[test]
    fn filtered_result_is_a_subset() {
        let all = artifacts();
        let filter = ArtifactFilter {
            tab: ArtifactTab::Tweet,
            query: "rust".to_string(),
            with_content_only: true,
        };
        for kept in filter.apply(&all) {
            assert!(all.iter().any(|a| a.id == kept.id));
            assert!(filter.matches(kept));
        }
    }

    #[test]
    fn tab_narrows_by_kind() {
        let all = artifacts();
        let filter = ArtifactFilter {
            tab: ArtifactTab::Tweet,
            ..ArtifactFilter::default()
        };
        let kept: Vec<i64> = filter.apply(&all).iter().map(|a| a.id).collect();
        assert_eq!(kept, vec![2, 3]);
    }

    #[test]
    fn content_only_drops_blank_content() {
        let all = artifacts();
        let filter = ArtifactFilter {
            with_content_only: true,
            ..ArtifactFilter::default()
        };
        let kept: Vec<i64> = filter.apply(&all).iter().map(|a| a.id).collect();
        assert_eq!(kept, vec![1, 2, 5]);
    }

    #[test]
    fn query_matches_kind_title_and_content_case_insensitively() {
        let all = artifacts();
        let by_content = ArtifactFilter {
            query: "RUST".to_string(),
            ..ArtifactFilter::default()
        };
        assert_eq!(by_content.apply(&all).len(), 1);

        let by_kind = ArtifactFilter {
            query: "transcript".to_string(),
            ..ArtifactFilter::default()
        };
        // Matches the transcript kind tag and its content.
        assert_eq!(by_kind.apply(&all)[0].id, 1);

        let by_title = ArtifactFilter {
            query: "deep dive".to_string(),
            ..ArtifactFilter::default()
        };
        assert_eq!(by_title.apply(&all)[0].id, 4);
    }

    #[test]
    fn job_filter_combines_criteria() {
        let all = jobs();
        let filter = JobFilter {
            status: Some(JobStatus::Failed),
            kind: Some(JobKind::Generate),
            errors_only: true,
        };
        let kept: Vec<i64> = filter.apply(&all).iter().map(|j| j.id).collect();
        assert_eq!(kept, vec![2]);
        assert_eq!(filter.active_count(), 3);
    }

    #[test]
    fn errors_only_requires_an_error() {
        let all = jobs();
        let filter = JobFilter {
            errors_only: true,
            ..JobFilter::default()
        };
        let kept: Vec<i64> = filter.apply(&all).iter().map(|j| j.id).collect();
        assert_eq!(kept, vec![2]);
    }
}
