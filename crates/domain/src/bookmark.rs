use crate::event::{MILLIS_PER_DAY, MILLIS_PER_HOUR};
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Width of the window in which a due reminder actually fires. Matches the
/// hourly tick cadence of the reminder job, so each threshold fires in
/// exactly one tick.
pub const REMINDER_FIRING_WINDOW_MILLIS: i64 = MILLIS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderThreshold {
    #[serde(rename = "days_7")]
    Days7,
    #[serde(rename = "days_2")]
    Days2,
    #[serde(rename = "hours_12")]
    Hours12,
}

impl ReminderThreshold {
    pub const ALL: [ReminderThreshold; 3] = [Self::Days7, Self::Days2, Self::Hours12];

    /// Lead time before the registration deadline at which this reminder
    /// becomes due.
    pub fn lead_time_millis(&self) -> i64 {
        match self {
            Self::Days7 => 7 * MILLIS_PER_DAY,
            Self::Days2 => 2 * MILLIS_PER_DAY,
            Self::Hours12 => 12 * MILLIS_PER_HOUR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days7 => "days_7",
            Self::Days2 => "days_2",
            Self::Hours12 => "hours_12",
        }
    }

    /// Whether `deadline` sits inside this threshold's firing window at
    /// `now`: due, not yet elapsed, and due for less than one tick.
    pub fn is_due(&self, deadline: i64, now: i64) -> bool {
        let time_until = deadline - now;
        time_until > 0
            && time_until <= self.lead_time_millis()
            && time_until > self.lead_time_millis() - REMINDER_FIRING_WINDOW_MILLIS
    }
}

impl Display for ReminderThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkPriority {
    Low,
    Medium,
    High,
}

impl Default for BookmarkPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl BookmarkPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid bookmark priority: {0}")]
pub struct InvalidPriorityError(pub String);

impl FromStr for BookmarkPriority {
    type Err = InvalidPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidPriorityError(s.to_string())),
        }
    }
}

/// Per-threshold reminder opt-ins. Each threshold can be switched off
/// independently without touching the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub days_7: bool,
    pub days_2: bool,
    pub hours_12: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            days_7: true,
            days_2: true,
            hours_12: true,
        }
    }
}

impl ReminderSettings {
    pub fn wants(&self, threshold: ReminderThreshold) -> bool {
        match threshold {
            ReminderThreshold::Days7 => self.days_7,
            ReminderThreshold::Days2 => self.days_2,
            ReminderThreshold::Hours12 => self.hours_12,
        }
    }
}

/// One flag per reminder threshold. Flags only ever move from pending to
/// sent; preference edits must never reset them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsSent {
    pub days_7: bool,
    pub days_2: bool,
    pub hours_12: bool,
}

impl NotificationsSent {
    pub fn is_sent(&self, threshold: ReminderThreshold) -> bool {
        match threshold {
            ReminderThreshold::Days7 => self.days_7,
            ReminderThreshold::Days2 => self.days_2,
            ReminderThreshold::Hours12 => self.hours_12,
        }
    }

    pub fn mark_sent(&mut self, threshold: ReminderThreshold) {
        match threshold {
            ReminderThreshold::Days7 => self.days_7 = true,
            ReminderThreshold::Days2 => self.days_2 = true,
            ReminderThreshold::Hours12 => self.hours_12 = true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub id: ID,
    pub user_id: ID,
    pub hackathon_id: ID,
    pub priority: BookmarkPriority,
    pub notes: Option<String>,
    pub reminder: ReminderSettings,
    pub notifications_sent: NotificationsSent,
    pub created_at: i64,
}

impl Bookmark {
    pub fn new(user_id: ID, hackathon_id: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            hackathon_id,
            priority: Default::default(),
            notes: None,
            reminder: Default::default(),
            notifications_sent: Default::default(),
            created_at: now,
        }
    }
}

impl Entity<ID> for Bookmark {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
