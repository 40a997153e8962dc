mod inmemory;
mod postgres;

use hackwatch_domain::{Bookmark, BookmarkPriority, ReminderSettings, ReminderThreshold, ID};
pub use inmemory::InMemoryBookmarkRepo;
pub use postgres::PostgresBookmarkRepo;

#[async_trait::async_trait]
pub trait IBookmarkRepo: Send + Sync {
    async fn insert(&self, bookmark: &Bookmark) -> anyhow::Result<()>;
    /// Updates the user-editable settings. Sent flags are out of reach
    /// here; they only move through `mark_notification_sent`.
    async fn update_settings(
        &self,
        bookmark_id: &ID,
        priority: BookmarkPriority,
        notes: Option<String>,
        reminder: ReminderSettings,
    ) -> anyhow::Result<()>;
    async fn mark_notification_sent(
        &self,
        bookmark_id: &ID,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<()>;
    async fn find(&self, bookmark_id: &ID) -> Option<Bookmark>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Bookmark>;
    async fn find_by_user_and_hackathon(&self, user_id: &ID, hackathon_id: &ID)
        -> Option<Bookmark>;
    /// Bookmarks that still want a reminder at this threshold: the
    /// threshold's reminder flag on and its sent flag not yet set.
    /// Deadline checks happen in the use case, against the event.
    async fn find_reminder_candidates(
        &self,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<Vec<Bookmark>>;
    async fn count_by_hackathon(&self, hackathon_id: &ID) -> anyhow::Result<i64>;
    async fn delete_by_user_and_hackathon(&self, user_id: &ID, hackathon_id: &ID)
        -> Option<Bookmark>;
}
