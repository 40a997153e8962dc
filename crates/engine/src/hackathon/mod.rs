mod get_hackathon;
mod get_stats;
mod list_hackathons;

pub use get_hackathon::GetHackathonUseCase;
pub use get_stats::{CatalogueStats, GetStatsUseCase, TagCount};
pub use list_hackathons::{HackathonPage, ListHackathonsUseCase, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
