mod popular_searches;
mod search_hackathons;

pub use popular_searches::PopularSearchesUseCase;
pub use search_hackathons::{SearchHackathonsUseCase, SearchOutcome};
