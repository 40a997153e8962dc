use crate::{
    error::EngineError,
    shared::usecase::{Subscriber, UseCase},
};
use hackwatch_domain::{Bookmark, ID};
use hackwatch_infra::HackwatchContext;
use tracing::error;

#[derive(Debug)]
pub struct RemoveBookmarkUseCase {
    pub user_id: ID,
    pub hackathon_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound => {
                Self::NotFound("The bookmark was not found.".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for RemoveBookmarkUseCase {
    type Response = Bookmark;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .bookmarks
            .delete_by_user_and_hackathon(&self.user_id, &self.hackathon_id)
            .await
            .ok_or(UseCaseErrors::NotFound)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncBookmarkCountOnRemove)]
    }
}

/// Recounts the event's bookmarks after one is removed.
pub struct SyncBookmarkCountOnRemove;

#[async_trait::async_trait]
impl Subscriber<RemoveBookmarkUseCase> for SyncBookmarkCountOnRemove {
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
