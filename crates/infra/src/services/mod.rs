mod matcher;
mod notifier;

pub use matcher::{ITextMatcher, WeightedTextMatcher};
pub use notifier::{
    IReminderNotifier, InMemoryReminderNotifier, LogReminderNotifier, SentReminder,
    WebhookReminderNotifier, WEBHOOK_KEY_HEADER,
};
