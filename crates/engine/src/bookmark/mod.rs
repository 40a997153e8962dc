mod add_bookmark;
mod list_bookmarks;
mod remove_bookmark;
mod update_bookmark;

pub use add_bookmark::AddBookmarkUseCase;
pub use list_bookmarks::{BookmarkedHackathon, ListBookmarksUseCase};
pub use remove_bookmark::RemoveBookmarkUseCase;
pub use update_bookmark::UpdateBookmarkUseCase;
