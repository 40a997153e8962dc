use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::{Bookmark, BookmarkPriority, ReminderSettings, ID};
use hackwatch_infra::HackwatchContext;

/// Partial update of a bookmark's settings. Absent fields keep their
/// stored value; sent flags cannot be touched from here.
#[derive(Debug)]
pub struct UpdateBookmarkUseCase {
    pub user_id: ID,
    pub hackathon_id: ID,
    pub priority: Option<BookmarkPriority>,
    pub notes: Option<String>,
    pub reminder: Option<ReminderSettings>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound,
    StorageError,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound => {
                Self::NotFound("The bookmark was not found.".into())
            }
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for UpdateBookmarkUseCase {
    type Response = Bookmark;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let mut bookmark = ctx
            .repos
            .bookmarks
            .find_by_user_and_hackathon(&self.user_id, &self.hackathon_id)
            .await
            .ok_or(UseCaseErrors::NotFound)?;

        if let Some(priority) = self.priority {
            bookmark.priority = priority;
        }
        if let Some(notes) = self.notes.take() {
            bookmark.notes = Some(notes);
        }
        if let Some(reminder) = self.reminder {
            bookmark.reminder = reminder;
        }

        ctx.repos
            .bookmarks
            .update_settings(
                &bookmark.id,
                bookmark.priority,
                bookmark.notes.clone(),
                bookmark.reminder,
            )
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        Ok(bookmark)
    }
}
