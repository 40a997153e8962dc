use crate::{
    error::EngineError,
    shared::usecase::{Subscriber, UseCase},
};
use hackwatch_domain::search::MIN_QUERY_LEN;
use hackwatch_domain::{normalize_query, Hackathon, HackathonStatus, SearchDocument};
use hackwatch_infra::HackwatchContext;
use tracing::error;

pub const DEFAULT_RESULT_LIMIT: usize = 20;
pub const MAX_RESULT_LIMIT: usize = 50;

/// Free-text search over every event that is not already over. The
/// matching algorithm lives behind `ITextMatcher`; this use case only
/// gathers candidates, ranks the scores, and caps the result set.
#[derive(Debug)]
pub struct SearchHackathonsUseCase {
    pub query: String,
    /// Zero picks the default result cap.
    pub limit: usize,
}

#[derive(Debug)]
pub struct SearchOutcome {
    /// Normalized form the query was matched and is recorded under.
    pub query: String,
    pub hits: Vec<Hackathon>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    QueryTooShort,
    StorageError,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::QueryTooShort => Self::BadClientData(format!(
                "A search query needs at least {} characters.",
                MIN_QUERY_LEN
            )),
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SearchHackathonsUseCase {
    type Response = SearchOutcome;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        if self.query.trim().chars().count() < MIN_QUERY_LEN {
            return Err(UseCaseErrors::QueryTooShort);
        }
        let query = normalize_query(&self.query);
        let limit = match self.limit {
            0 => DEFAULT_RESULT_LIMIT,
            limit => limit.min(MAX_RESULT_LIMIT),
        };

        let candidates = ctx
            .repos
            .hackathons
            .find_all()
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let mut scored = candidates
            .into_iter()
            .filter(|hackathon| hackathon.status != Some(HackathonStatus::Past))
            .filter_map(|hackathon| {
                ctx.matcher
                    .relevance(&query, &SearchDocument::from(&hackathon))
                    .map(|score| (score, hackathon))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let hits = scored
            .into_iter()
            .take(limit)
            .map(|(_, hackathon)| hackathon)
            .collect();

        Ok(SearchOutcome { query, hits })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(TrackSearch)]
    }
}

/// Feeds every completed search into the analytics store. Rejected
/// queries never reach this point, so they are not recorded.
pub struct TrackSearch;

#[async_trait::async_trait]
impl Subscriber<SearchHackathonsUseCase> for TrackSearch {
    async fn notify(&self, outcome: &SearchOutcome, ctx: &HackwatchContext) {
        let now = ctx.sys.get_timestamp_millis();
        if let Err(e) = ctx
            .repos
            .search_analytics
            .record(&outcome.query, outcome.hits.len() as i64, now)
            .await
        {
            error!(
                "Failed to record search analytics for query {}: {:?}",
                outcome.query, e
            );
        }
    }
}
