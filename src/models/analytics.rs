//! Analytics wire types
//!
//! Event counts as the API reports them: an overall per-kind summary and a
//! flat (date, kind, count) timeline. The `views::analytics` module folds
//! the timeline into chart-shaped rows.

use serde::{Deserialize, Serialize};

/// One per-kind total from `GET /v1/analytics/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    /// Event kind (e.g., `job_completed`)
    pub kind: String,

    /// Number of events in the requested window
    pub count: i64,
}

/// One data point from `GET /v1/analytics/timeline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Day the events occurred on (ISO date)
    pub date: String,

    /// Event kind
    pub kind: String,

    /// Number of events of this kind on this day
    pub count: i64,
}
