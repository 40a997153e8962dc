use crate::{
    error::EngineError,
    hackathon::{HackathonPage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    shared::usecase::UseCase,
};
use hackwatch_domain::{build_query, ID};
use hackwatch_infra::HackwatchContext;
use tracing::warn;

/// Runs a saved filter as a catalogue listing and bumps its usage
/// counter. Filters owned by other users are invisible, not forbidden.
#[derive(Debug)]
pub struct ApplyFilterUseCase {
    pub user_id: ID,
    pub filter_id: ID,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(filter_id) => Self::NotFound(format!(
                "The saved filter with id: {}, was not found.",
                filter_id
            )),
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for ApplyFilterUseCase {
    type Response = HackathonPage;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let filter = ctx
            .repos
            .saved_filters
            .find(&self.filter_id)
            .await
            .filter(|filter| filter.user_id == self.user_id)
            .ok_or_else(|| UseCaseErrors::NotFound(self.filter_id.clone()))?;

        // A failed usage bump must not cost the user their results.
        if let Err(e) = ctx.repos.saved_filters.increment_usage(&filter.id).await {
            warn!("Failed to bump usage of filter {}: {:?}", filter.id, e);
        }

        let limit = match self.limit {
            0 => DEFAULT_PAGE_SIZE,
            limit => limit.min(MAX_PAGE_SIZE),
        };
        let page = self.page.max(1);
        let skip = (page - 1) * limit;

        let now = ctx.sys.get_timestamp_millis();
        let (predicate, sort) = build_query(&filter.criteria, now);
        let hackathons = ctx
            .repos
            .hackathons
            .query(&predicate, &sort, skip, limit)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        let total = ctx
            .repos
            .hackathons
            .count(&predicate)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(HackathonPage {
            hackathons,
            total,
            page,
            limit,
        })
    }
}
