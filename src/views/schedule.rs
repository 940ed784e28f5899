//! Schedule view state: filters and day grouping for scheduled posts.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{Platform, PostStatus, ScheduledPost, ScheduledPostUpdate};

/// How many scheduled posts the view fetches.
const POST_LIMIT: u32 = 100;

/// Filter state for the schedule list. `None` means "all".
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleFilter {
    pub status: Option<PostStatus>,
    pub platform: Option<Platform>,
}

impl ScheduleFilter {
    pub fn matches(&self, post: &ScheduledPost) -> bool {
        if let Some(status) = self.status
            && post.status != status
        {
            return false;
        }
        if let Some(platform) = self.platform
            && post.platform != platform
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, posts: &'a [ScheduledPost]) -> Vec<&'a ScheduledPost> {
        posts.iter().filter(|post| self.matches(post)).collect()
    }
}

/// Group posts by the date portion of `scheduled_at`, group keys ascending.
/// Within a group, posts keep their input order.
pub fn group_by_date<'a>(posts: &[&'a ScheduledPost]) -> Vec<(String, Vec<&'a ScheduledPost>)> {
    let mut grouped: BTreeMap<String, Vec<&ScheduledPost>> = BTreeMap::new();
    for post in posts {
        grouped.entry(post.date_key()).or_default().push(post);
    }
    grouped.into_iter().collect()
}

pub struct ScheduleView {
    client: Arc<ApiClient>,
    pub posts: Vec<ScheduledPost>,
    pub filter: ScheduleFilter,
}

impl ScheduleView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            posts: Vec::new(),
            filter: ScheduleFilter::default(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.posts = self.client.scheduled_posts(POST_LIMIT).await?;
        Ok(())
    }

    pub fn filtered_posts(&self) -> Vec<&ScheduledPost> {
        self.filter.apply(&self.posts)
    }

    pub fn grouped(&self) -> Vec<(String, Vec<&ScheduledPost>)> {
        group_by_date(&self.filtered_posts())
    }

    /// Move a post to a new time, then refresh.
    pub async fn reschedule(&mut self, id: i64, scheduled_at: &str) -> Result<(), ClientError> {
        self.client
            .update_scheduled_post(id, &ScheduledPostUpdate::reschedule(scheduled_at))
            .await?;
        self.refresh().await
    }

    /// Cancel a post, then refresh.
    pub async fn cancel(&mut self, id: i64) -> Result<(), ClientError> {
        self.client.delete_scheduled_post(id).await?;
        self.refresh().await
    }
}
