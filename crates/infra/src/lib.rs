mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, WebhookConfig};
pub use repos::{
    IBookmarkRepo, IHackathonRepo, ISavedFilterRepo, ISearchAnalyticsRepo, IUserRepo, Repos,
};
pub use services::{
    IReminderNotifier, ITextMatcher, InMemoryReminderNotifier, LogReminderNotifier, SentReminder,
    WebhookReminderNotifier, WeightedTextMatcher, WEBHOOK_KEY_HEADER,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct HackwatchContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn IReminderNotifier>,
    pub matcher: Arc<dyn ITextMatcher>,
}

/// Will setup the infrastructure context given the environment: Postgres
/// when `DATABASE_URL` is set, the in-memory store otherwise.
pub async fn setup_context() -> HackwatchContext {
    let config = Config::new();

    let repos = match psql_connection_string() {
        Some(connection_string) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&connection_string)
                .await
                .expect("TO CONNECT TO POSTGRES");
            Repos::create_postgres(pool)
        }
        None => {
            warn!("DATABASE_URL not set. Using the in-memory store, data will not survive a restart.");
            Repos::create_inmemory()
        }
    };

    let notifier: Arc<dyn IReminderNotifier> = match config.reminder_webhook.clone() {
        Some(webhook) => Arc::new(WebhookReminderNotifier::new(webhook)),
        None => Arc::new(LogReminderNotifier),
    };

    HackwatchContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
        notifier,
        matcher: Arc::new(WeightedTextMatcher),
    }
}

/// Context over the in-memory store with a recording notifier. Meant for
/// tests; the repositories behave exactly like the real ones.
pub fn setup_context_inmemory() -> HackwatchContext {
    HackwatchContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        notifier: Arc::new(InMemoryReminderNotifier::new()),
        matcher: Arc::new(WeightedTextMatcher),
    }
}

fn psql_connection_string() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// No-op without `DATABASE_URL`: the in-memory store has no schema.
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match psql_connection_string() {
        Some(connection_string) => connection_string,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
