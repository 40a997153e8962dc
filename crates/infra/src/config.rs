use hackwatch_utils::create_random_secret;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{info, warn};
use url::Url;

/// Where reminder dispatches are POSTed to. The key is echoed back in a
/// request header so receivers can authenticate the sender.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Reminder delivery target. When unset, dispatches are logged instead
    /// of sent, which is useful in development.
    pub reminder_webhook: Option<WebhookConfig>,
    /// Seconds between lifecycle refresh runs
    pub lifecycle_job_interval_secs: u64,
    /// Seconds between reminder runs. The reminder firing window assumes
    /// hourly ticks; changing this without changing the window will skip
    /// or double-collect thresholds.
    pub reminder_job_interval_secs: u64,
    /// Upper bound on concurrently processed records within one batch run
    pub batch_concurrency: usize,
    /// A batch run exceeding this is logged as a warning. It is never
    /// aborted; in-flight writes always complete.
    pub batch_soft_deadline_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            reminder_webhook: webhook_from_env(),
            lifecycle_job_interval_secs: parse_env("LIFECYCLE_JOB_INTERVAL_SECS", 3600),
            reminder_job_interval_secs: parse_env("REMINDER_JOB_INTERVAL_SECS", 3600),
            batch_concurrency: parse_env("BATCH_CONCURRENCY", 16),
            batch_soft_deadline_secs: parse_env("BATCH_SOFT_DEADLINE_SECS", 600),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn webhook_from_env() -> Option<WebhookConfig> {
    let url = std::env::var("REMINDER_WEBHOOK_URL").ok()?;
    match Url::parse(&url) {
        Ok(parsed) if parsed.scheme() == "https" || parsed.scheme() == "http" => {}
        _ => {
            warn!(
                "The given REMINDER_WEBHOOK_URL: {} is not a valid http(s) url, reminders will only be logged.",
                url
            );
            return None;
        }
    }
    let key = match std::env::var("REMINDER_WEBHOOK_KEY") {
        Ok(key) => key,
        Err(_) => {
            info!("Did not find REMINDER_WEBHOOK_KEY environment variable. Going to create one.");
            let key = create_random_secret(16);
            info!("Webhook signing key was generated and set to: {}", key);
            key
        }
    };
    Some(WebhookConfig { url, key })
}

fn parse_env<T: FromStr + Display + Copy>(name: &str, default: T) -> T {
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                name, value, default
            );
            default
        }
    }
}
