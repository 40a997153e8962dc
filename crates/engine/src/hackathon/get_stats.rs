use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::HackathonStatus;
use hackwatch_infra::HackwatchContext;
use itertools::Itertools;

pub const TOP_TAGS_LIMIT: usize = 10;

/// Catalogue-wide counters for the discovery landing page. Counts read
/// the stored status, they do not re-resolve the lifecycle.
#[derive(Debug)]
pub struct GetStatsUseCase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueStats {
    pub total: i64,
    pub upcoming: i64,
    pub ongoing: i64,
    pub past: i64,
    /// Most used tags across events that are not over, busiest first.
    pub top_tags: Vec<TagCount>,
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
impl UseCase for GetStatsUseCase {
    type Response = CatalogueStats;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let hackathons = ctx
            .repos
            .hackathons
            .find_all()
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let count_with = |status: HackathonStatus| {
            hackathons
                .iter()
                .filter(|h| h.status == Some(status))
                .count() as i64
        };

        let top_tags = hackathons
            .iter()
            .filter(|h| h.status != Some(HackathonStatus::Past))
            .flat_map(|h| h.tags.iter())
            .map(|tag| tag.to_lowercase())
            .counts()
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)))
            .take(TOP_TAGS_LIMIT)
            .collect();

        Ok(CatalogueStats {
            total: hackathons.len() as i64,
            upcoming: count_with(HackathonStatus::Upcoming),
            ongoing: count_with(HackathonStatus::Ongoing),
            past: count_with(HackathonStatus::Past),
            top_tags,
        })
    }
}
