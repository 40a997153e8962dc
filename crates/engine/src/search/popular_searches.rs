use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::SearchStat;
use hackwatch_infra::HackwatchContext;

pub const DEFAULT_POPULAR_LIMIT: usize = 10;
pub const MAX_POPULAR_LIMIT: usize = 50;

/// The most frequently searched queries, as recorded by the search
/// analytics subscriber.
#[derive(Debug)]
pub struct PopularSearchesUseCase {
    /// Zero picks the default cap.
    pub limit: usize,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for PopularSearchesUseCase {
    type Response = Vec<SearchStat>;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let limit = match self.limit {
            0 => DEFAULT_POPULAR_LIMIT,
            limit => limit.min(MAX_POPULAR_LIMIT),
        };
        ctx.repos
            .search_analytics
            .most_searched(limit)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use hackwatch_infra::setup_context_inmemory;

    const NOW: i64 = 1_700_000_000_000;

    #[tokio::test]
    async fn ranks_queries_by_how_often_they_ran() {
        let ctx = setup_context_inmemory();
        for _ in 0..3 {
            ctx.repos
                .search_analytics
                .record("ai", 5, NOW)
                .await
                .expect("To record");
        }
        ctx.repos
            .search_analytics
            .record("web3", 2, NOW)
            .await
            .expect("To record");

        let top = execute(PopularSearchesUseCase { limit: 0 }, &ctx)
            .await
            .expect("To rank queries");
        let queries = top.iter().map(|s| s.query.as_str()).collect::<Vec<_>>();
        assert_eq!(queries, vec!["ai", "web3"]);

        let capped = execute(PopularSearchesUseCase { limit: 1 }, &ctx)
            .await
            .expect("To rank queries");
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].query, "ai");
    }
}
