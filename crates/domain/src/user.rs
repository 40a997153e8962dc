use crate::bookmark::ReminderThreshold;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Per-user reminder opt-ins. The reminder engine reads these, it never
/// writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email_enabled: bool,
    pub reminder_7_days: bool,
    pub reminder_2_days: bool,
    pub reminder_12_hours: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_enabled: true,
            reminder_7_days: true,
            reminder_2_days: true,
            reminder_12_hours: true,
        }
    }
}

impl NotificationPreferences {
    pub fn allows(&self, threshold: ReminderThreshold) -> bool {
        self.email_enabled
            && match threshold {
                ReminderThreshold::Days7 => self.reminder_7_days,
                ReminderThreshold::Days2 => self.reminder_2_days,
                ReminderThreshold::Hours12 => self.reminder_12_hours,
            }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    pub preferences: NotificationPreferences,
}

impl User {
    pub fn new(email: String) -> Self {
        Self {
            id: Default::default(),
            email,
            name: None,
            preferences: Default::default(),
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
