use crate::scoring;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Whole days between `now` and `target`, rounded up. Negative when
/// `target` has already passed.
pub fn days_until(target: i64, now: i64) -> i64 {
    // div_euclid keeps the rounding mathematical for negative spans
    (target - now + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HackathonStatus {
    Upcoming,
    Ongoing,
    Past,
}

impl HackathonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Past => "past",
        }
    }
}

impl Display for HackathonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid hackathon status: {0}")]
pub struct InvalidStatusError(pub String);

impl FromStr for HackathonStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "past" => Ok(Self::Past),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationMode {
    Online,
    Offline,
    Hybrid,
}

impl ParticipationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid participation mode: {0}")]
pub struct InvalidModeError(pub String);

impl FromStr for ParticipationMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(InvalidModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub venue: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizePool {
    pub total: Option<i64>,
    pub currency: String,
    pub has_prize: bool,
}

impl Default for PrizePool {
    fn default() -> Self {
        Self {
            total: None,
            currency: "INR".into(),
            has_prize: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSize {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub solo_allowed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub view_count: i64,
    pub bookmark_count: i64,
}

/// Derived fields maintained by the lifecycle refresh. Nothing else
/// writes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedFields {
    pub days_until_event: Option<i64>,
    pub days_until_deadline: Option<i64>,
    pub urgency_score: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hackathon {
    pub id: ID,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub platform: Option<String>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub registration_deadline: Option<i64>,
    pub participation_mode: Option<ParticipationMode>,
    pub location: Option<Location>,
    pub organizer: Option<Organizer>,
    pub prize: Option<PrizePool>,
    pub team_size: Option<TeamSize>,
    pub tags: Vec<String>,
    pub status: Option<HackathonStatus>,
    pub engagement: Engagement,
    pub computed: ComputedFields,
    pub added_at: i64,
    pub updated_at: i64,
}

impl Entity<ID> for Hackathon {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

impl Hackathon {
    pub fn new(slug: String, title: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            slug,
            title,
            description: None,
            url: None,
            platform: None,
            start_date: None,
            end_date: None,
            registration_deadline: None,
            participation_mode: None,
            location: None,
            organizer: None,
            prize: None,
            team_size: None,
            tags: Default::default(),
            status: None,
            engagement: Default::default(),
            computed: Default::default(),
            added_at: now,
            updated_at: now,
        }
    }

    pub fn prize_total(&self) -> Option<i64> {
        self.prize.as_ref().and_then(|p| p.total)
    }

    /// Lifecycle status at `now`. An event that has ended is past, no
    /// matter what the other dates say; without any usable dates the
    /// stored status is kept as-is.
    pub fn resolve_status(&self, now: i64) -> Option<HackathonStatus> {
        if let Some(end) = self.end_date {
            if end < now {
                return Some(HackathonStatus::Past);
            }
        }
        match self.start_date {
            Some(start) if start <= now => Some(HackathonStatus::Ongoing),
            Some(_) => Some(HackathonStatus::Upcoming),
            None => self.status,
        }
    }

    pub fn days_until_event(&self, now: i64) -> Option<i64> {
        self.start_date.map(|start| days_until(start, now))
    }

    pub fn days_until_deadline(&self, now: i64) -> Option<i64> {
        self.registration_deadline
            .map(|deadline| days_until(deadline, now))
    }

    /// Recomputes status and derived fields against `now` and reports
    /// whether anything changed, so batch updates can skip clean records.
    pub fn refresh(&mut self, now: i64) -> bool {
        let status = self.resolve_status(now);
        let computed = ComputedFields {
            days_until_event: self.days_until_event(now),
            days_until_deadline: self.days_until_deadline(now),
            urgency_score: scoring::urgency_score(self, now),
        };

        let changed = status != self.status || computed != self.computed;
        self.status = status;
        self.computed = computed;
        changed
    }
}
