mod helpers;

use helpers::setup::{test_app, TestApp};
use helpers::utils::event_with_deadline;
use hackwatch_domain::{
    Bookmark, Hackathon, HackathonStatus, ReminderSettings, ReminderThreshold, User,
    MILLIS_PER_DAY, MILLIS_PER_HOUR,
};
use hackwatch_engine::bookmark::UpdateBookmarkUseCase;
use hackwatch_engine::execute;
use hackwatch_engine::lifecycle::UpdateLifecycleUseCase;
use hackwatch_engine::reminder::SendDeadlineRemindersUseCase;

const START: i64 = 1_700_000_000_000;
/// Eight days of hourly ticks, enough to sweep every reminder window and
/// sail past the deadline.
const TICKS: i64 = 8 * 24;

async fn seed_watched_event(app: &TestApp) -> (User, Hackathon, Bookmark) {
    let user = User::new("dev@example.com".into());
    app.ctx.repos.users.insert(&user).await.expect("To insert user");

    // Half an hour past a full-hour boundary, so no tick ever lands
    // exactly on a window edge
    let deadline = START + 7 * MILLIS_PER_DAY + MILLIS_PER_HOUR / 2;
    let hackathon = event_with_deadline("weekly-hack", deadline);
    app.ctx
        .repos
        .hackathons
        .insert(&hackathon)
        .await
        .expect("To insert hackathon");

    let bookmark = Bookmark::new(user.id.clone(), hackathon.id.clone(), START);
    app.ctx
        .repos
        .bookmarks
        .insert(&bookmark)
        .await
        .expect("To insert bookmark");
    (user, hackathon, bookmark)
}

#[tokio::test]
async fn test_a_week_of_hourly_ticks_dispatches_each_threshold_once() {
    let app = test_app(START);
    let (_, hackathon, bookmark) = seed_watched_event(&app).await;

    for _ in 0..TICKS {
        execute(UpdateLifecycleUseCase, &app.ctx)
            .await
            .expect("Lifecycle run to succeed");
        let stats = execute(SendDeadlineRemindersUseCase, &app.ctx)
            .await
            .expect("Reminder run to succeed");
        // The windows are disjoint, one tick can owe at most one dispatch
        assert!(stats.total_sent() <= 1);
        assert_eq!(stats.failed, 0);
        app.clock.advance(MILLIS_PER_HOUR);
    }

    let thresholds = app
        .notifier
        .sent_reminders()
        .iter()
        .map(|sent| sent.threshold)
        .collect::<Vec<_>>();
    assert_eq!(
        thresholds,
        vec![
            ReminderThreshold::Days7,
            ReminderThreshold::Days2,
            ReminderThreshold::Hours12
        ]
    );

    let stored = app
        .ctx
        .repos
        .bookmarks
        .find(&bookmark.id)
        .await
        .expect("To find bookmark");
    for threshold in ReminderThreshold::ALL {
        assert!(stored.notifications_sent.is_sent(threshold));
    }

    // Registration closed during the week but the event itself has not
    // started yet
    let stored = app
        .ctx
        .repos
        .hackathons
        .find(&hackathon.id)
        .await
        .expect("To find hackathon");
    assert_eq!(stored.status, Some(HackathonStatus::Upcoming));
    assert_eq!(stored.computed.days_until_deadline, Some(0));
}

#[tokio::test]
async fn test_opting_out_of_one_threshold_skips_only_that_threshold() {
    let app = test_app(START);
    let (user, hackathon, bookmark) = seed_watched_event(&app).await;

    for tick in 0..TICKS {
        // The 2-day reminder goes off the menu after the 7-day one has
        // already fired
        if tick == 100 {
            execute(
                UpdateBookmarkUseCase {
                    user_id: user.id.clone(),
                    hackathon_id: hackathon.id.clone(),
                    priority: None,
                    notes: None,
                    reminder: Some(ReminderSettings {
                        days_2: false,
                        ..Default::default()
                    }),
                },
                &app.ctx,
            )
            .await
            .expect("To update the bookmark");
        }

        execute(SendDeadlineRemindersUseCase, &app.ctx)
            .await
            .expect("Reminder run to succeed");
        app.clock.advance(MILLIS_PER_HOUR);
    }

    let thresholds = app
        .notifier
        .sent_reminders()
        .iter()
        .map(|sent| sent.threshold)
        .collect::<Vec<_>>();
    assert_eq!(
        thresholds,
        vec![ReminderThreshold::Days7, ReminderThreshold::Hours12]
    );

    // The skipped threshold left its sent flag alone instead of burning it
    let stored = app
        .ctx
        .repos
        .bookmarks
        .find(&bookmark.id)
        .await
        .expect("To find bookmark");
    assert!(stored.notifications_sent.days_7);
    assert!(!stored.notifications_sent.days_2);
    assert!(stored.notifications_sent.hours_12);
}

#[tokio::test]
async fn test_an_outage_during_a_window_costs_only_that_window() {
    let app = test_app(START);
    let (_, _, bookmark) = seed_watched_event(&app).await;

    for tick in 0..TICKS {
        // The 7-day window is swept by the second tick; the notifier is
        // down for exactly that sweep
        app.notifier.set_failing(tick == 1);

        let stats = execute(SendDeadlineRemindersUseCase, &app.ctx)
            .await
            .expect("Reminder run to succeed");
        if tick == 1 {
            assert_eq!(stats.failed, 1);
            assert_eq!(stats.total_sent(), 0);
        }
        app.clock.advance(MILLIS_PER_HOUR);
    }

    let thresholds = app
        .notifier
        .sent_reminders()
        .iter()
        .map(|sent| sent.threshold)
        .collect::<Vec<_>>();
    assert_eq!(
        thresholds,
        vec![ReminderThreshold::Days2, ReminderThreshold::Hours12]
    );

    let stored = app
        .ctx
        .repos
        .bookmarks
        .find(&bookmark.id)
        .await
        .expect("To find bookmark");
    assert!(!stored.notifications_sent.days_7);
}
