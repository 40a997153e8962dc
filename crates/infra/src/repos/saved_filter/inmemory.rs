use super::ISavedFilterRepo;
use crate::repos::shared::inmemory_repo::*;
use hackwatch_domain::{SavedFilter, ID};
use std::sync::Mutex;

pub struct InMemorySavedFilterRepo {
    filters: Mutex<Vec<SavedFilter>>,
}

impl InMemorySavedFilterRepo {
    pub fn new() -> Self {
        Self {
            filters: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISavedFilterRepo for InMemorySavedFilterRepo {
    async fn insert(&self, filter: &SavedFilter) -> anyhow::Result<()> {
        insert(filter, &self.filters);
        Ok(())
    }

    async fn find(&self, filter_id: &ID) -> Option<SavedFilter> {
        find(filter_id, &self.filters)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<SavedFilter> {
        find_by(&self.filters, |f| f.user_id == *user_id)
    }

    async fn clear_default_for_user(&self, user_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.filters,
            |f| f.user_id == *user_id,
            |f| f.is_default = false,
        );
        Ok(())
    }

    async fn increment_usage(&self, filter_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.filters,
            |f| f.id == *filter_id,
            |f| f.usage_count += 1,
        );
        Ok(())
    }

    async fn delete(&self, filter_id: &ID) -> Option<SavedFilter> {
        delete(filter_id, &self.filters)
    }
}
