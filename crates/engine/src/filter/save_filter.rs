use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::{FilterRequest, SavedFilter, ID};
use hackwatch_infra::HackwatchContext;

/// Saves a named filter for reuse. Saving a new default clears the old
/// one first, so a user never holds two defaults.
#[derive(Debug)]
pub struct SaveFilterUseCase {
    pub user_id: ID,
    pub name: String,
    pub criteria: FilterRequest,
    pub is_default: bool,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    UserNotFound(ID),
    EmptyName,
    StorageError,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseErrors::EmptyName => {
                Self::BadClientData("A saved filter needs a non-empty name.".into())
            }
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SaveFilterUseCase {
    type Response = SavedFilter;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseErrors::UserNotFound(self.user_id.clone()));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UseCaseErrors::EmptyName);
        }

        if self.is_default {
            ctx.repos
                .saved_filters
                .clear_default_for_user(&self.user_id)
                .await
                .map_err(|_| UseCaseErrors::StorageError)?;
        }

        let now = ctx.sys.get_timestamp_millis();
        let mut filter = SavedFilter::new(
            self.user_id.clone(),
            name.to_string(),
            self.criteria.clone(),
            now,
        );
        filter.is_default = self.is_default;
        ctx.repos
            .saved_filters
            .insert(&filter)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        Ok(filter)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use hackwatch_domain::User;
    use hackwatch_infra::{setup_context_inmemory, HackwatchContext};

    async fn seed_user(ctx: &HackwatchContext) -> User {
        let user = User::new("dev@example.com".into());
        ctx.repos.users.insert(&user).await.expect("To insert user");
        user
    }

    #[tokio::test]
    async fn a_new_default_dethrones_the_old_one() {
        let ctx = setup_context_inmemory();
        let user = seed_user(&ctx).await;

        let first = execute(
            SaveFilterUseCase {
                user_id: user.id.clone(),
                name: "Online only".into(),
                criteria: FilterRequest::default(),
                is_default: true,
            },
            &ctx,
        )
        .await
        .expect("To save filter");
        assert!(first.is_default);

        let second = execute(
            SaveFilterUseCase {
                user_id: user.id.clone(),
                name: "Closing soon".into(),
                criteria: FilterRequest::closing_soon(),
                is_default: true,
            },
            &ctx,
        )
        .await
        .expect("To save filter");
        assert!(second.is_default);

        let filters = ctx.repos.saved_filters.find_by_user(&user.id).await;
        let defaults = filters
            .iter()
            .filter(|f| f.is_default)
            .map(|f| f.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(defaults, vec!["Closing soon"]);
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let ctx = setup_context_inmemory();
        let user = seed_user(&ctx).await;

        let err = execute(
            SaveFilterUseCase {
                user_id: user.id,
                name: "   ".into(),
                criteria: FilterRequest::default(),
                is_default: false,
            },
            &ctx,
        )
        .await
        .expect_err("Blank name");
        assert!(matches!(err, UseCaseErrors::EmptyName));
        assert!(matches!(
            EngineError::from(err),
            EngineError::BadClientData(_)
        ));
    }
}
