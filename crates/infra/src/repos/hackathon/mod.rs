mod inmemory;
mod postgres;

use hackwatch_domain::{ComputedFields, EventPredicate, Hackathon, HackathonStatus, SortSpec, ID};
pub use inmemory::InMemoryHackathonRepo;
pub use postgres::PostgresHackathonRepo;

#[async_trait::async_trait]
pub trait IHackathonRepo: Send + Sync {
    async fn insert(&self, hackathon: &Hackathon) -> anyhow::Result<()>;
    async fn save(&self, hackathon: &Hackathon) -> anyhow::Result<()>;
    /// Writes only the lifecycle-owned fields so that concurrent counter
    /// updates are never clobbered.
    async fn update_derived(
        &self,
        hackathon_id: &ID,
        status: Option<HackathonStatus>,
        computed: &ComputedFields,
        updated_at: i64,
    ) -> anyhow::Result<()>;
    async fn increment_view_count(&self, hackathon_id: &ID) -> anyhow::Result<()>;
    async fn set_bookmark_count(&self, hackathon_id: &ID, count: i64) -> anyhow::Result<()>;
    async fn find(&self, hackathon_id: &ID) -> Option<Hackathon>;
    async fn find_by_slug(&self, slug: &str) -> Option<Hackathon>;
    async fn find_all(&self) -> anyhow::Result<Vec<Hackathon>>;
    /// Applies the predicate, sort spec and paging in the store. Both
    /// implementations must agree with `EventPredicate::matches` and
    /// `SortSpec::compare`.
    async fn query(
        &self,
        predicate: &EventPredicate,
        sort: &SortSpec,
        skip: usize,
        limit: usize,
    ) -> anyhow::Result<Vec<Hackathon>>;
    async fn count(&self, predicate: &EventPredicate) -> anyhow::Result<i64>;
}
