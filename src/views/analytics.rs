//! Analytics view state and timeline aggregation.
//!
//! Folds the flat (date, kind, count) timeline into one row per date with
//! one column per observed kind — the shape a stacked chart consumes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{SummaryItem, TimelinePoint};

/// Selectable reporting windows, in days.
pub const PERIOD_OPTIONS: [u32; 4] = [7, 14, 30, 90];

/// One chart row: a date and the per-kind counts observed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub date: String,
    pub counts: BTreeMap<String, i64>,
}

impl TimelineRow {
    pub fn count(&self, kind: &str) -> i64 {
        self.counts.get(kind).copied().unwrap_or(0)
    }
}

/// Fold timeline points into rows, dates ascending. A later point for the
/// same (date, kind) pair wins.
pub fn timeline_rows(points: &[TimelinePoint]) -> Vec<TimelineRow> {
    let mut by_date: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
    for point in points {
        by_date
            .entry(point.date.clone())
            .or_default()
            .insert(point.kind.clone(), point.count);
    }
    by_date
        .into_iter()
        .map(|(date, counts)| TimelineRow { date, counts })
        .collect()
}

/// Every kind appearing anywhere in the timeline, deduplicated and sorted.
pub fn observed_kinds(points: &[TimelinePoint]) -> Vec<String> {
    points
        .iter()
        .map(|point| point.kind.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sum of all summary counts.
pub fn total_events(summary: &[SummaryItem]) -> i64 {
    summary.iter().map(|item| item.count).sum()
}

/// Display label for an event kind; unknown kinds fall back to the raw tag.
pub fn kind_label(kind: &str) -> &str {
    match kind {
        "job_completed" => "Jobs",
        "artifact_created" => "Artifacts",
        "media_generated" => "Media",
        other => other,
    }
}

pub struct AnalyticsView {
    client: Arc<ApiClient>,
    pub period_days: u32,
    pub summary: Vec<SummaryItem>,
    pub timeline: Vec<TimelinePoint>,
}

impl AnalyticsView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            period_days: 30,
            summary: Vec::new(),
            timeline: Vec::new(),
        }
    }

    /// Reload summary and timeline together for the current window.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (summary, timeline) = tokio::try_join!(
            self.client.analytics_summary(self.period_days),
            self.client.analytics_timeline(self.period_days),
        )?;
        self.summary = summary;
        self.timeline = timeline;
        Ok(())
    }

    pub fn rows(&self) -> Vec<TimelineRow> {
        timeline_rows(&self.timeline)
    }

    pub fn kinds(&self) -> Vec<String> {
        observed_kinds(&self.timeline)
    }

    pub fn total_events(&self) -> i64 {
        total_events(&self.summary)
    }
}
