pub mod bookmark;
mod error;
pub mod filter;
pub mod hackathon;
mod job_schedulers;
pub mod lifecycle;
pub mod reminder;
pub mod search;
pub mod shared;

pub use error::EngineError;
use hackwatch_infra::HackwatchContext;
use job_schedulers::{start_lifecycle_job, start_reminder_job};
pub use shared::usecase::execute;

/// Owns the background jobs that keep the catalogue fresh: the hourly
/// lifecycle refresh and the reminder dispatch. Use cases stay callable
/// without it; `Engine` only adds the scheduling.
pub struct Engine {
    ctx: HackwatchContext,
}

impl Engine {
    pub fn new(ctx: HackwatchContext) -> Self {
        Self { ctx }
    }

    /// Spawns the job schedulers and returns. The caller keeps the
    /// process alive.
    pub fn start(&self) {
        start_lifecycle_job(self.ctx.clone());
        start_reminder_job(self.ctx.clone());
    }
}
