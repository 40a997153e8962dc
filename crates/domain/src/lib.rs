mod bookmark;
mod event;
pub mod query;
pub mod scoring;
mod saved_filter;
pub mod search;
mod shared;
mod user;

pub use bookmark::{
    Bookmark, BookmarkPriority, InvalidPriorityError, NotificationsSent, ReminderSettings,
    ReminderThreshold, REMINDER_FIRING_WINDOW_MILLIS,
};
pub use event::{
    days_until, ComputedFields, Engagement, Hackathon, HackathonStatus, InvalidModeError,
    InvalidStatusError, Location, Organizer, ParticipationMode, PrizePool, TeamSize,
    MILLIS_PER_DAY, MILLIS_PER_HOUR,
};
pub use query::{
    build_query, EventPredicate, FilterRequest, SortField, SortOrder, SortSpec, TimeWindow,
};
pub use saved_filter::SavedFilter;
pub use search::{normalize_query, SearchDocument, SearchStat};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::{NotificationPreferences, User};
