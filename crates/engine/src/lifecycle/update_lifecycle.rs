use crate::{error::EngineError, shared::usecase::UseCase};
use futures::stream::{self, StreamExt};
use hackwatch_infra::HackwatchContext;
use tracing::warn;

/// Walks the whole catalogue and rewrites status and derived fields where
/// they drifted. The clock is read once, so every event in a run is
/// resolved and scored against the same instant.
#[derive(Debug)]
pub struct UpdateLifecycleUseCase;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleRunStats {
    pub examined: usize,
    pub updated: usize,
    pub failed: usize,
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
impl UseCase for UpdateLifecycleUseCase {
    type Response = LifecycleRunStats;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let hackathons = ctx
            .repos
            .hackathons
            .find_all()
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let mut stats = LifecycleRunStats {
            examined: hackathons.len(),
            ..Default::default()
        };

        // Clean records are skipped before any write is issued.
        let writes = stream::iter(hackathons.into_iter().filter_map(|mut hackathon| {
            if !hackathon.refresh(now) {
                return None;
            }
            let repo = ctx.repos.hackathons.clone();
            Some(async move {
                repo.update_derived(&hackathon.id, hackathon.status, &hackathon.computed, now)
                    .await
                    .map_err(|e| (hackathon.id, e))
            })
        }))
        .buffer_unordered(ctx.config.batch_concurrency)
        .collect::<Vec<_>>()
        .await;

        for write in writes {
            match write {
                Ok(()) => stats.updated += 1,
                Err((hackathon_id, e)) => {
                    warn!("Lifecycle write failed for {}: {:?}", hackathon_id, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use hackwatch_domain::{HackathonStatus, MILLIS_PER_DAY, MILLIS_PER_HOUR};
    use hackwatch_infra::{setup_context_inmemory, ISys};
    use std::sync::Arc;

    const NOW: i64 = 1_700_000_000_000;

    struct StaticTimeSys;
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            NOW
        }
    }

    #[tokio::test]
    async fn refreshes_drifted_events_and_skips_clean_ones() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});

        let mut drifted = hackwatch_domain::Hackathon::new(
            "drifted".into(),
            "Drifted".into(),
            NOW - 10 * MILLIS_PER_DAY,
        );
        drifted.start_date = Some(NOW + 2 * MILLIS_PER_DAY);
        drifted.registration_deadline = Some(NOW + 12 * MILLIS_PER_HOUR);

        let mut clean = hackwatch_domain::Hackathon::new(
            "clean".into(),
            "Clean".into(),
            NOW - 10 * MILLIS_PER_DAY,
        );
        clean.start_date = Some(NOW + 5 * MILLIS_PER_DAY);
        clean.refresh(NOW);
        clean.updated_at = NOW - 1000;

        for h in [&drifted, &clean] {
            ctx.repos.hackathons.insert(h).await.expect("To insert");
        }

        let stats = execute(UpdateLifecycleUseCase, &ctx)
            .await
            .expect("To refresh lifecycle");
        assert_eq!(
            stats,
            LifecycleRunStats {
                examined: 2,
                updated: 1,
                failed: 0
            }
        );

        let stored = ctx
            .repos
            .hackathons
            .find(&drifted.id)
            .await
            .expect("To find event");
        assert_eq!(stored.status, Some(HackathonStatus::Upcoming));
        assert_eq!(stored.computed.days_until_event, Some(2));
        assert_eq!(stored.computed.days_until_deadline, Some(1));
        assert_eq!(stored.computed.urgency_score, 40);
        assert_eq!(stored.updated_at, NOW);

        // The clean record kept its original write timestamp.
        let untouched = ctx
            .repos
            .hackathons
            .find(&clean.id)
            .await
            .expect("To find event");
        assert_eq!(untouched.updated_at, NOW - 1000);
    }

    #[tokio::test]
    async fn a_second_run_against_the_same_clock_writes_nothing() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});

        let mut h =
            hackwatch_domain::Hackathon::new("once".into(), "Once".into(), NOW - MILLIS_PER_DAY);
        h.start_date = Some(NOW - MILLIS_PER_HOUR);
        h.end_date = Some(NOW + MILLIS_PER_DAY);
        ctx.repos.hackathons.insert(&h).await.expect("To insert");

        let first = execute(UpdateLifecycleUseCase, &ctx)
            .await
            .expect("To refresh lifecycle");
        assert_eq!(first.updated, 1);

        let second = execute(UpdateLifecycleUseCase, &ctx)
            .await
            .expect("To refresh lifecycle");
        assert_eq!(second.examined, 1);
        assert_eq!(second.updated, 0);

        let stored = ctx.repos.hackathons.find(&h.id).await.expect("To find");
        assert_eq!(stored.status, Some(HackathonStatus::Ongoing));
    }
}
