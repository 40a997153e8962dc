use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::{SavedFilter, ID};
use hackwatch_infra::HackwatchContext;

#[derive(Debug)]
pub struct DeleteFilterUseCase {
    pub user_id: ID,
    pub filter_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(filter_id) => Self::NotFound(format!(
                "The saved filter with id: {}, was not found.",
                filter_id
            )),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeleteFilterUseCase {
    type Response = SavedFilter;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .saved_filters
            .find(&self.filter_id)
            .await
            .filter(|filter| filter.user_id == self.user_id)
            .ok_or_else(|| UseCaseErrors::NotFound(self.filter_id.clone()))?;

        ctx.repos
            .saved_filters
            .delete(&self.filter_id)
            .await
            .ok_or_else(|| UseCaseErrors::NotFound(self.filter_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use hackwatch_domain::{FilterRequest, User};
    use hackwatch_infra::setup_context_inmemory;

    #[tokio::test]
    async fn owners_can_delete_their_filters() {
        let ctx = setup_context_inmemory();
        let user = User::new("dev@example.com".into());
        ctx.repos.users.insert(&user).await.expect("To insert user");
        let filter = SavedFilter::new(
            user.id.clone(),
            "Stale".into(),
            FilterRequest::default(),
            0,
        );
        ctx.repos
            .saved_filters
            .insert(&filter)
            .await
            .expect("To insert filter");

        let deleted = execute(
            DeleteFilterUseCase {
                user_id: user.id.clone(),
                filter_id: filter.id.clone(),
            },
            &ctx,
        )
        .await
        .expect("To delete filter");
        assert_eq!(deleted.id, filter.id);
        assert!(ctx.repos.saved_filters.find(&filter.id).await.is_none());
    }

    #[tokio::test]
    async fn strangers_cannot_delete_what_they_cannot_see() {
        let ctx = setup_context_inmemory();
        let owner = User::new("owner@example.com".into());
        let stranger = User::new("stranger@example.com".into());
        for u in [&owner, &stranger] {
            ctx.repos.users.insert(u).await.expect("To insert user");
        }
        let filter = SavedFilter::new(
            owner.id.clone(),
            "Private".into(),
            FilterRequest::default(),
            0,
        );
        ctx.repos
            .saved_filters
            .insert(&filter)
            .await
            .expect("To insert filter");

        let err = execute(
            DeleteFilterUseCase {
                user_id: stranger.id.clone(),
                filter_id: filter.id.clone(),
            },
            &ctx,
        )
        .await
        .expect_err("Not the owner");
        assert!(matches!(err, UseCaseErrors::NotFound(_)));
        assert!(ctx.repos.saved_filters.find(&filter.id).await.is_some());
    }
}
