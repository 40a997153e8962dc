use crate::{
    error::EngineError,
    shared::usecase::{Subscriber, UseCase},
};
use hackwatch_domain::{Bookmark, BookmarkPriority, ID};
use hackwatch_infra::HackwatchContext;
use tracing::error;

/// Bookmarks an event for a user. One bookmark per user and event; the
/// event's bookmark counter is synced after the write.
#[derive(Debug)]
pub struct AddBookmarkUseCase {
    pub user_id: ID,
    pub hackathon_id: ID,
    pub priority: Option<BookmarkPriority>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    UserNotFound(ID),
    HackathonNotFound(ID),
    AlreadyBookmarked,
    StorageError,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseErrors::HackathonNotFound(hackathon_id) => Self::NotFound(format!(
                "The hackathon with id: {}, was not found.",
                hackathon_id
            )),
            UseCaseErrors::AlreadyBookmarked => {
                Self::Conflict("The hackathon is already bookmarked.".into())
            }
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for AddBookmarkUseCase {
    type Response = Bookmark;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseErrors::UserNotFound(self.user_id.clone()));
        }
        if ctx.repos.hackathons.find(&self.hackathon_id).await.is_none() {
            return Err(UseCaseErrors::HackathonNotFound(self.hackathon_id.clone()));
        }
        if ctx
            .repos
            .bookmarks
            .find_by_user_and_hackathon(&self.user_id, &self.hackathon_id)
            .await
            .is_some()
        {
            return Err(UseCaseErrors::AlreadyBookmarked);
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut bookmark = Bookmark::new(self.user_id.clone(), self.hackathon_id.clone(), now);
        if let Some(priority) = self.priority {
            bookmark.priority = priority;
        }
        bookmark.notes = self.notes.take();
        ctx.repos
            .bookmarks
            .insert(&bookmark)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        Ok(bookmark)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncBookmarkCountOnAdd)]
    }
}

/// Recounts the event's bookmarks after a new one lands.
pub struct SyncBookmarkCountOnAdd;

#[async_trait::async_trait]
impl Subscriber<AddBookmarkUseCase> for SyncBookmarkCountOnAdd {
    async fn notify(&self, bookmark: &Bookmark, ctx: &HackwatchContext) {
        let count = match ctx
            .repos
            .bookmarks
            .count_by_hackathon(&bookmark.hackathon_id)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                error!("Failed to count bookmarks: {:?}", e);
                return;
            }
        };
        if let Err(e) = ctx
            .repos
            .hackathons
            .set_bookmark_count(&bookmark.hackathon_id, count)
            .await
        {
            error!("Failed to sync bookmark count: {:?}", e);
        }
    }
}
