mod inmemory;
mod postgres;

use hackwatch_domain::{SavedFilter, ID};
pub use inmemory::InMemorySavedFilterRepo;
pub use postgres::PostgresSavedFilterRepo;

#[async_trait::async_trait]
pub trait ISavedFilterRepo: Send + Sync {
    async fn insert(&self, filter: &SavedFilter) -> anyhow::Result<()>;
    async fn find(&self, filter_id: &ID) -> Option<SavedFilter>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<SavedFilter>;
    /// Drops the default marker from every filter the user owns, so that
    /// at most one filter can carry it.
    async fn clear_default_for_user(&self, user_id: &ID) -> anyhow::Result<()>;
    async fn increment_usage(&self, filter_id: &ID) -> anyhow::Result<()>;
    async fn delete(&self, filter_id: &ID) -> Option<SavedFilter>;
}
