use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::ReminderThreshold;
use hackwatch_infra::HackwatchContext;
use tracing::warn;

/// Dispatches deadline reminders for every bookmark whose event sits
/// inside a threshold's firing window. A reminder is only marked sent
/// after the notifier accepts it, so failed deliveries are retried on the
/// next run and successful ones never repeat.
#[derive(Debug)]
pub struct SendDeadlineRemindersUseCase;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderRunStats {
    pub sent_days_7: usize,
    pub sent_days_2: usize,
    pub sent_hours_12: usize,
    pub failed: usize,
}

impl ReminderRunStats {
    fn record_sent(&mut self, threshold: ReminderThreshold) {
        match threshold {
            ReminderThreshold::Days7 => self.sent_days_7 += 1,
            ReminderThreshold::Days2 => self.sent_days_2 += 1,
            ReminderThreshold::Hours12 => self.sent_hours_12 += 1,
        }
    }

    pub fn total_sent(&self) -> usize {
        self.sent_days_7 + self.sent_days_2 + self.sent_hours_12
    }
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SendDeadlineRemindersUseCase {
    type Response = ReminderRunStats;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let mut stats = ReminderRunStats::default();

        for threshold in ReminderThreshold::ALL {
            let candidates = ctx
                .repos
                .bookmarks
                .find_reminder_candidates(threshold)
                .await
                .map_err(|_| UseCaseErrors::StorageError)?;

            for bookmark in candidates {
                let hackathon = match ctx.repos.hackathons.find(&bookmark.hackathon_id).await {
                    Some(hackathon) => hackathon,
                    None => continue,
                };
                let deadline = match hackathon.registration_deadline {
                    Some(deadline) => deadline,
                    None => continue,
                };
                if !threshold.is_due(deadline, now) {
                    continue;
                }
                let user = match ctx.repos.users.find(&bookmark.user_id).await {
                    Some(user) => user,
                    None => continue,
                };
                // Opt-outs are skipped without burning the sent flag, in
                // case the user re-enables reminders inside the window.
                if !user.preferences.allows(threshold) {
                    continue;
                }

                match ctx.notifier.notify(&user, &hackathon, threshold).await {
                    Ok(()) => {
                        if let Err(e) = ctx
                            .repos
                            .bookmarks
                            .mark_notification_sent(&bookmark.id, threshold)
                            .await
                        {
                            // Delivered but not recorded: the next run may
                            // send a duplicate, which beats a silent drop.
                            warn!(
                                "Could not record sent {} reminder for bookmark {}: {:?}",
                                threshold, bookmark.id, e
                            );
                        }
                        stats.record_sent(threshold);
                    }
                    Err(e) => {
                        warn!(
                            "Failed to deliver {} reminder for {}: {:?}",
                            threshold, hackathon.slug, e
                        );
                        stats.failed += 1;
                    }
                }
            }
        }

        Ok(stats)
    }
}
