use hackwatch_infra::{
    setup_context_inmemory, HackwatchContext, ISys, InMemoryReminderNotifier,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Clock the tests wind forward by hand.
pub struct TestClock {
    now: AtomicI64,
}

impl TestClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl ISys for TestClock {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub struct TestApp {
    pub ctx: HackwatchContext,
    pub clock: Arc<TestClock>,
    pub notifier: Arc<InMemoryReminderNotifier>,
}

// Wire the in-memory context with a controllable clock and a recording
// notifier, keeping handles to both
pub fn test_app(start: i64) -> TestApp {
    let mut ctx = setup_context_inmemory();
    let clock = Arc::new(TestClock::new(start));
    let notifier = Arc::new(InMemoryReminderNotifier::new());
    ctx.sys = clock.clone();
    ctx.notifier = notifier.clone();
    TestApp {
        ctx,
        clock,
        notifier,
    }
}
