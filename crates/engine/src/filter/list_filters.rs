use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::{SavedFilter, ID};
use hackwatch_infra::HackwatchContext;
use std::cmp::Reverse;

/// Lists a user's saved filters, default first, then by how often
/// they are used.
#[derive(Debug)]
pub struct ListFiltersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    UserNotFound(ID),
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for ListFiltersUseCase {
    type Response = Vec<SavedFilter>;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let _user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseErrors::UserNotFound(self.user_id.clone()))?;

        let mut filters = ctx.repos.saved_filters.find_by_user(&self.user_id).await;
        filters.sort_by(|a, b| {
            (Reverse(a.is_default), Reverse(a.usage_count), &a.name).cmp(&(
                Reverse(b.is_default),
                Reverse(b.usage_count),
                &b.name,
            ))
        });
        Ok(filters)
    }
}
