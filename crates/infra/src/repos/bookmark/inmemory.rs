use super::IBookmarkRepo;
use crate::repos::shared::inmemory_repo::*;
use hackwatch_domain::{Bookmark, BookmarkPriority, ReminderSettings, ReminderThreshold, ID};
use std::sync::Mutex;

pub struct InMemoryBookmarkRepo {
    bookmarks: Mutex<Vec<Bookmark>>,
}

impl InMemoryBookmarkRepo {
    pub fn new() -> Self {
        Self {
            bookmarks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBookmarkRepo for InMemoryBookmarkRepo {
    async fn insert(&self, bookmark: &Bookmark) -> anyhow::Result<()> {
        insert(bookmark, &self.bookmarks);
        Ok(())
    }

    async fn update_settings(
        &self,
        bookmark_id: &ID,
        priority: BookmarkPriority,
        notes: Option<String>,
        reminder: ReminderSettings,
    ) -> anyhow::Result<()> {
        update_many(
            &self.bookmarks,
            |b| b.id == *bookmark_id,
            |b| {
                b.priority = priority;
                b.notes = notes.clone();
                b.reminder = reminder;
            },
        );
        Ok(())
    }

    async fn mark_notification_sent(
        &self,
        bookmark_id: &ID,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<()> {
        update_many(
            &self.bookmarks,
            |b| b.id == *bookmark_id,
            |b| b.notifications_sent.mark_sent(threshold),
        );
        Ok(())
    }

    async fn find(&self, bookmark_id: &ID) -> Option<Bookmark> {
        find(bookmark_id, &self.bookmarks)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Bookmark> {
        find_by(&self.bookmarks, |b| b.user_id == *user_id)
    }

    async fn find_by_user_and_hackathon(
        &self,
        user_id: &ID,
        hackathon_id: &ID,
    ) -> Option<Bookmark> {
        find_by(&self.bookmarks, |b| {
            b.user_id == *user_id && b.hackathon_id == *hackathon_id
        })
        .into_iter()
        .next()
    }

    async fn find_reminder_candidates(
        &self,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<Vec<Bookmark>> {
        Ok(find_by(&self.bookmarks, |b| {
            b.reminder.wants(threshold) && !b.notifications_sent.is_sent(threshold)
        }))
    }

    async fn count_by_hackathon(&self, hackathon_id: &ID) -> anyhow::Result<i64> {
        Ok(find_by(&self.bookmarks, |b| b.hackathon_id == *hackathon_id).len() as i64)
    }

    async fn delete_by_user_and_hackathon(
        &self,
        user_id: &ID,
        hackathon_id: &ID,
    ) -> Option<Bookmark> {
        find_and_delete_by(&self.bookmarks, |b| {
            b.user_id == *user_id && b.hackathon_id == *hackathon_id
        })
        .into_iter()
        .next()
    }
}
