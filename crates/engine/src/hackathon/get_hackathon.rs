use crate::{
    error::EngineError,
    shared::usecase::{Subscriber, UseCase},
};
use hackwatch_domain::Hackathon;
use hackwatch_infra::HackwatchContext;
use tracing::error;

/// Single-event lookup by slug. Each successful lookup counts as a view;
/// the returned snapshot carries the count from before this view.
#[derive(Debug)]
pub struct GetHackathonUseCase {
    pub slug: String,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(String),
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(slug) => Self::NotFound(format!(
                "The hackathon with slug: {}, was not found.",
                slug
            )),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetHackathonUseCase {
    type Response = Hackathon;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .hackathons
            .find_by_slug(&self.slug)
            .await
            .ok_or_else(|| UseCaseErrors::NotFound(self.slug.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(IncrementViewCount)]
    }
}

/// Bumps the view counter after a successful lookup. Failed lookups leave
/// the counter alone.
pub struct IncrementViewCount;

#[async_trait::async_trait]
impl Subscriber<GetHackathonUseCase> for IncrementViewCount {
    async fn notify(&self, hackathon: &Hackathon, ctx: &HackwatchContext) {
        if let Err(e) = ctx
            .repos
            .hackathons
            .increment_view_count(&hackathon.id)
            .await
        {
            error!("Failed to record a view for {}: {:?}", hackathon.slug, e);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use hackwatch_infra::setup_context_inmemory;

    #[tokio::test]
    async fn each_lookup_counts_one_view() {
        let ctx = setup_context_inmemory();
        let hackathon = Hackathon::new("viewed".into(), "Viewed".into(), 0);
        ctx.repos
            .hackathons
            .insert(&hackathon)
            .await
            .expect("To insert");

        let found = execute(
            GetHackathonUseCase {
                slug: "viewed".into(),
            },
            &ctx,
        )
        .await
        .expect("To find hackathon");
        assert_eq!(found.id, hackathon.id);
        assert_eq!(found.engagement.view_count, 0);

        let found = execute(
            GetHackathonUseCase {
                slug: "viewed".into(),
            },
            &ctx,
        )
        .await
        .expect("To find hackathon");
        assert_eq!(found.engagement.view_count, 1);

        let stored = ctx
            .repos
            .hackathons
            .find(&hackathon.id)
            .await
            .expect("To find");
        assert_eq!(stored.engagement.view_count, 2);
    }

    #[tokio::test]
    async fn missing_slugs_map_to_not_found() {
        let ctx = setup_context_inmemory();
        let err = execute(
            GetHackathonUseCase {
                slug: "nope".into(),
            },
            &ctx,
        )
        .await
        .expect_err("No hackathon to find");
        assert!(matches!(
            EngineError::from(err),
            EngineError::NotFound(_)
        ));
    }
}
