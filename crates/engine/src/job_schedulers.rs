use crate::{
    lifecycle::UpdateLifecycleUseCase, reminder::SendDeadlineRemindersUseCase,
    shared::usecase::execute,
};
use hackwatch_infra::HackwatchContext;
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

/// Seconds until the next full hour, minus `secs_before_hour`. Jobs
/// align to hour boundaries so the one-hour reminder firing window is
/// swept exactly once per threshold.
pub fn get_start_delay(now_ts: usize, secs_before_hour: usize) -> usize {
    let secs_to_next_hour = 3600 - (now_ts / 1000) % 3600;
    if secs_to_next_hour > secs_before_hour {
        secs_to_next_hour - secs_before_hour
    } else {
        secs_to_next_hour + (3600 - secs_before_hour)
    }
}

pub fn start_lifecycle_job(ctx: HackwatchContext) {
    tokio::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep_until(Instant::now() + Duration::from_secs(secs_to_next_run as u64)).await;

        let mut job_interval =
            interval(Duration::from_secs(ctx.config.lifecycle_job_interval_secs));
        job_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            // Ticks run back to back in this task, so a slow run can
            // never overlap the next one.
            job_interval.tick().await;
            let started = Instant::now();
            match execute(UpdateLifecycleUseCase, &ctx).await {
                Ok(stats) => info!(
                    "Lifecycle run done. Examined: {}, updated: {}, failed: {}",
                    stats.examined, stats.updated, stats.failed
                ),
                Err(e) => error!("Lifecycle run failed: {:?}", e),
            }
            warn_when_over_deadline("Lifecycle", started, &ctx);
        }
    });
}

pub fn start_reminder_job(ctx: HackwatchContext) {
    tokio::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep_until(Instant::now() + Duration::from_secs(secs_to_next_run as u64)).await;

        let mut job_interval = interval(Duration::from_secs(ctx.config.reminder_job_interval_secs));
        job_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            job_interval.tick().await;
            let started = Instant::now();
            match execute(SendDeadlineRemindersUseCase, &ctx).await {
                Ok(stats) => info!(
                    "Reminder run done. Sent: {}, failed: {}",
                    stats.total_sent(),
                    stats.failed
                ),
                Err(e) => error!("Reminder run failed: {:?}", e),
            }
            warn_when_over_deadline("Reminder", started, &ctx);
        }
    });
}

/// Runs over the soft deadline are reported but never cut short,
/// in-flight record writes always complete.
fn warn_when_over_deadline(job: &str, started: Instant, ctx: &HackwatchContext) {
    let elapsed = started.elapsed();
    if elapsed.as_secs() > ctx.config.batch_soft_deadline_secs {
        warn!(
            "{} run took {}s which is over the soft deadline of {}s",
            job,
            elapsed.as_secs(),
            ctx.config.batch_soft_deadline_secs
        );
    }
}
