use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::{build_query, FilterRequest, Hackathon};
use hackwatch_infra::HackwatchContext;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Paged catalogue listing. The filter is normalized through
/// [`build_query`], so unknown options degrade to "no constraint" instead
/// of failing the request.
#[derive(Debug)]
pub struct ListHackathonsUseCase {
    pub filter: FilterRequest,
    /// 1-based. Zero is treated as the first page.
    pub page: usize,
    /// Zero picks the default page size.
    pub limit: usize,
}

#[derive(Debug)]
pub struct HackathonPage {
    pub hackathons: Vec<Hackathon>,
    pub total: i64,
    pub page: usize,
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
impl UseCase for ListHackathonsUseCase {
    type Response = HackathonPage;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let limit = match self.limit {
            0 => DEFAULT_PAGE_SIZE,
            limit => limit.min(MAX_PAGE_SIZE),
        };
        let page = self.page.max(1);
        let skip = (page - 1) * limit;

        let now = ctx.sys.get_timestamp_millis();
        let (predicate, sort) = build_query(&self.filter, now);

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
