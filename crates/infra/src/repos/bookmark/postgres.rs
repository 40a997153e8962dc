use super::IBookmarkRepo;
use hackwatch_domain::{
    Bookmark, BookmarkPriority, NotificationsSent, ReminderSettings, ReminderThreshold, ID,
};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresBookmarkRepo {
    pool: PgPool,
}

impl PostgresBookmarkRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookmarkRaw {
    bookmark_uid: Uuid,
    user_uid: Uuid,
    hackathon_uid: Uuid,
    priority: String,
    notes: Option<String>,
    reminder_days_7: bool,
    reminder_days_2: bool,
    reminder_hours_12: bool,
    sent_days_7: bool,
    sent_days_2: bool,
    sent_hours_12: bool,
    created_at: i64,
}

impl Into<Bookmark> for BookmarkRaw {
    fn into(self) -> Bookmark {
        Bookmark {
            id: self.bookmark_uid.into(),
            user_id: self.user_uid.into(),
            hackathon_id: self.hackathon_uid.into(),
            priority: self.priority.parse().unwrap_or_default(),
            notes: self.notes,
            reminder: ReminderSettings {
                days_7: self.reminder_days_7,
                days_2: self.reminder_days_2,
                hours_12: self.reminder_hours_12,
            },
            notifications_sent: NotificationsSent {
                days_7: self.sent_days_7,
                days_2: self.sent_days_2,
                hours_12: self.sent_hours_12,
            },
            created_at: self.created_at,
        }
    }
}

fn reminder_column(threshold: ReminderThreshold) -> &'static str {
    match threshold {
        ReminderThreshold::Days7 => "reminder_days_7",
        ReminderThreshold::Days2 => "reminder_days_2",
        ReminderThreshold::Hours12 => "reminder_hours_12",
    }
}

fn sent_column(threshold: ReminderThreshold) -> &'static str {
    match threshold {
        ReminderThreshold::Days7 => "sent_days_7",
        ReminderThreshold::Days2 => "sent_days_2",
        ReminderThreshold::Hours12 => "sent_hours_12",
    }
}

#[async_trait::async_trait]
impl IBookmarkRepo for PostgresBookmarkRepo {
    async fn insert(&self, bookmark: &Bookmark) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookmarks(
                bookmark_uid, user_uid, hackathon_uid, priority, notes,
                reminder_days_7, reminder_days_2, reminder_hours_12,
                sent_days_7, sent_days_2, sent_hours_12,
                created_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(bookmark.id.inner_ref())
        .bind(bookmark.user_id.inner_ref())
        .bind(bookmark.hackathon_id.inner_ref())
        .bind(bookmark.priority.as_str())
        .bind(&bookmark.notes)
        .bind(bookmark.reminder.days_7)
        .bind(bookmark.reminder.days_2)
        .bind(bookmark.reminder.hours_12)
        .bind(bookmark.notifications_sent.days_7)
        .bind(bookmark.notifications_sent.days_2)
        .bind(bookmark.notifications_sent.hours_12)
        .bind(bookmark.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_settings(
        &self,
        bookmark_id: &ID,
        priority: BookmarkPriority,
        notes: Option<String>,
        reminder: ReminderSettings,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE bookmarks
            SET priority = $2,
            notes = $3,
            reminder_days_7 = $4,
            reminder_days_2 = $5,
            reminder_hours_12 = $6
            WHERE bookmark_uid = $1
            "#,
        )
        .bind(bookmark_id.inner_ref())
        .bind(priority.as_str())
        .bind(notes)
        .bind(reminder.days_7)
        .bind(reminder.days_2)
        .bind(reminder.hours_12)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_notification_sent(
        &self,
        bookmark_id: &ID,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<()> {
        let sql = format!(
            "UPDATE bookmarks SET {} = TRUE WHERE bookmark_uid = $1",
            sent_column(threshold)
        );
        sqlx::query(&sql)
            .bind(bookmark_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, bookmark_id: &ID) -> Option<Bookmark> {
        match sqlx::query_as::<_, BookmarkRaw>(
            r#"
            SELECT * FROM bookmarks
            WHERE bookmark_uid = $1
            "#,
        )
        .bind(bookmark_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(bookmark) => Some(bookmark.into()),
            Err(_) => None,
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Bookmark> {
        let bookmarks: Vec<BookmarkRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM bookmarks
            WHERE user_uid = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        {
            Ok(bookmarks) => bookmarks,
            Err(_) => return Vec::new(),
        };
        bookmarks
            .into_iter()
            .map(|bookmark| bookmark.into())
            .collect()
    }

    async fn find_by_user_and_hackathon(
        &self,
        user_id: &ID,
        hackathon_id: &ID,
    ) -> Option<Bookmark> {
        match sqlx::query_as::<_, BookmarkRaw>(
            r#"
            SELECT * FROM bookmarks
            WHERE user_uid = $1 AND hackathon_uid = $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(hackathon_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(bookmark) => Some(bookmark.into()),
            Err(_) => None,
        }
    }

    async fn find_reminder_candidates(
        &self,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<Vec<Bookmark>> {
        let sql = format!(
            "SELECT * FROM bookmarks WHERE {} = TRUE AND {} = FALSE",
            reminder_column(threshold),
            sent_column(threshold)
        );
        let bookmarks: Vec<BookmarkRaw> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(bookmarks
            .into_iter()
            .map(|bookmark| bookmark.into())
            .collect())
    }

    async fn count_by_hackathon(&self, hackathon_id: &ID) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookmarks
            WHERE hackathon_uid = $1
            "#,
        )
        .bind(hackathon_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn delete_by_user_and_hackathon(
        &self,
        user_id: &ID,
        hackathon_id: &ID,
    ) -> Option<Bookmark> {
        match sqlx::query_as::<_, BookmarkRaw>(
            r#"
            DELETE FROM bookmarks
            WHERE user_uid = $1 AND hackathon_uid = $2
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(hackathon_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(bookmark) => Some(bookmark.into()),
            Err(_) => None,
        }
    }
}
