mod bookmark;
mod hackathon;
mod saved_filter;
mod search_analytics;
mod shared;
mod user;

pub use bookmark::IBookmarkRepo;
pub use hackathon::IHackathonRepo;
pub use saved_filter::ISavedFilterRepo;
pub use search_analytics::ISearchAnalyticsRepo;
pub use user::IUserRepo;

use bookmark::{InMemoryBookmarkRepo, PostgresBookmarkRepo};
use hackathon::{InMemoryHackathonRepo, PostgresHackathonRepo};
use saved_filter::{InMemorySavedFilterRepo, PostgresSavedFilterRepo};
use search_analytics::{InMemorySearchAnalyticsRepo, PostgresSearchAnalyticsRepo};
use sqlx::PgPool;
use std::sync::Arc;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub hackathons: Arc<dyn IHackathonRepo>,
    pub bookmarks: Arc<dyn IBookmarkRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub saved_filters: Arc<dyn ISavedFilterRepo>,
    pub search_analytics: Arc<dyn ISearchAnalyticsRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            hackathons: Arc::new(PostgresHackathonRepo::new(pool.clone())),
            bookmarks: Arc::new(PostgresBookmarkRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            saved_filters: Arc::new(PostgresSavedFilterRepo::new(pool.clone())),
            search_analytics: Arc::new(PostgresSearchAnalyticsRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            hackathons: Arc::new(InMemoryHackathonRepo::new()),
            bookmarks: Arc::new(InMemoryBookmarkRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            saved_filters: Arc::new(InMemorySavedFilterRepo::new()),
            search_analytics: Arc::new(InMemorySearchAnalyticsRepo::new()),
        }
    }
}
