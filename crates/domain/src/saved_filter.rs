use crate::query::FilterRequest;
use crate::shared::entity::{Entity, ID};

/// A named, reusable [`FilterRequest`]. At most one filter per user may be
/// the default; the save path enforces it.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFilter {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub criteria: FilterRequest,
    pub is_default: bool,
    pub usage_count: i64,
    pub created_at: i64,
}

impl SavedFilter {
    pub fn new(user_id: ID, name: String, criteria: FilterRequest, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name,
            criteria,
            is_default: false,
            usage_count: 0,
            created_at: now,
        }
    }
}

impl Entity<ID> for SavedFilter {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
