mod update_lifecycle;

pub use update_lifecycle::{LifecycleRunStats, UpdateLifecycleUseCase};
