mod apply_filter;
mod delete_filter;
mod list_filters;
mod save_filter;

pub use apply_filter::ApplyFilterUseCase;
pub use delete_filter::DeleteFilterUseCase;
pub use list_filters::ListFiltersUseCase;
pub use save_filter::SaveFilterUseCase;
