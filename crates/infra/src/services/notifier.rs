use crate::config::WebhookConfig;
use chrono::{LocalResult, TimeZone, Utc};
use hackwatch_domain::{Hackathon, ReminderThreshold, User, ID};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::info;

/// Delivers deadline reminders. An `Err` means "not delivered": the sent
/// flag stays untouched and the dispatch is retried on a later run.
#[async_trait::async_trait]
pub trait IReminderNotifier: Send + Sync {
    async fn notify(
        &self,
        user: &User,
        hackathon: &Hackathon,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<()>;
}

pub const WEBHOOK_KEY_HEADER: &str = "hackwatch-webhook-key";

#[derive(Debug, Serialize)]
struct ReminderPayload {
    user_id: String,
    email: String,
    hackathon_id: String,
    slug: String,
    title: String,
    url: Option<String>,
    threshold: &'static str,
    registration_deadline: Option<i64>,
    deadline_formatted: Option<String>,
}

/// POSTs each reminder to the configured webhook, signed with the shared
/// key header so receivers can drop spoofed calls.
pub struct WebhookReminderNotifier {
    client: reqwest::Client,
    webhook: WebhookConfig,
}

impl WebhookReminderNotifier {
    pub fn new(webhook: WebhookConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook,
        }
    }
}

#[async_trait::async_trait]
impl IReminderNotifier for WebhookReminderNotifier {
    async fn notify(
        &self,
        user: &User,
        hackathon: &Hackathon,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<()> {
        let payload = ReminderPayload {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            hackathon_id: hackathon.id.to_string(),
            slug: hackathon.slug.clone(),
            title: hackathon.title.clone(),
            url: hackathon.url.clone(),
            threshold: threshold.as_str(),
            registration_deadline: hackathon.registration_deadline,
            deadline_formatted: hackathon.registration_deadline.map(format_timestamp),
        };
        self.client
            .post(&self.webhook.url)
            .header(WEBHOOK_KEY_HEADER, &self.webhook.key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn format_timestamp(timestamp_millis: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis) {
        LocalResult::Single(datetime) => datetime.to_rfc3339(),
        _ => timestamp_millis.to_string(),
    }
}

/// Logs what would have been delivered. Selected when no webhook is
/// configured.
pub struct LogReminderNotifier;

#[async_trait::async_trait]
impl IReminderNotifier for LogReminderNotifier {
    async fn notify(
        &self,
        user: &User,
        hackathon: &Hackathon,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<()> {
        info!(
            "Would send {} reminder for {} to {}",
            threshold, hackathon.title, user.email
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentReminder {
    pub user_id: ID,
    pub hackathon_id: ID,
    pub threshold: ReminderThreshold,
}

/// Records dispatches instead of delivering them. Tests flip `failing` to
/// exercise the not-delivered path.
#[derive(Default)]
pub struct InMemoryReminderNotifier {
    sent: Mutex<Vec<SentReminder>>,
    failing: AtomicBool,
}

impl InMemoryReminderNotifier {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent_reminders(&self) -> Vec<SentReminder> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IReminderNotifier for InMemoryReminderNotifier {
    async fn notify(
        &self,
        user: &User,
        hackathon: &Hackathon,
        threshold: ReminderThreshold,
    ) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("Notifier set to fail");
        }
        self.sent.lock().unwrap().push(SentReminder {
            user_id: user.id.clone(),
            hackathon_id: hackathon.id.clone(),
            threshold,
        });
        Ok(())
    }
}
