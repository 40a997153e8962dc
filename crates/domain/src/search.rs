//! What search looks at, not how it matches.
//!
//! The matching algorithm is a pluggable collaborator; this module only
//! fixes the projection of an event into searchable fields and the weight
//! each field carries in a relevance score.

use crate::event::Hackathon;

/// Minimum query length, after trimming, for a search to run at all.
pub const MIN_QUERY_LEN: usize = 2;

pub const TITLE_WEIGHT: f64 = 0.4;
pub const DESCRIPTION_WEIGHT: f64 = 0.2;
pub const TAGS_WEIGHT: f64 = 0.2;
pub const ORGANIZER_WEIGHT: f64 = 0.1;
pub const CITY_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchDocument {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub organizer_name: Option<String>,
    pub city: Option<String>,
}

impl From<&Hackathon> for SearchDocument {
    fn from(hackathon: &Hackathon) -> Self {
        Self {
            title: hackathon.title.clone(),
            description: hackathon.description.clone(),
            tags: hackathon.tags.clone(),
            organizer_name: hackathon.organizer.as_ref().map(|o| o.name.clone()),
            city: hackathon.location.as_ref().and_then(|l| l.city.clone()),
        }
    }
}

/// Aggregated per-query search telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStat {
    pub query: String,
    pub search_count: i64,
    pub results_count: i64,
    pub last_searched: i64,
}

/// Canonical form a query is recorded under in analytics.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
