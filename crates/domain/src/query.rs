//! Filter and sort normalization for catalogue queries.
//!
//! A [`FilterRequest`] is the permissive, all-optional option set a caller
//! hands over, typically deserialized straight from a query string.
//! [`build_query`] turns it into an [`EventPredicate`] plus a [`SortSpec`]:
//! normalized values every storage backend applies the same way.
//! Unparseable options are dropped, never rejected.

use crate::event::{Hackathon, HackathonStatus, ParticipationMode, MILLIS_PER_DAY};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterRequest {
    pub status: Option<String>,
    pub mode: Option<String>,
    pub platform: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// Comma-separated, an event matches on any of them.
    pub tags: Option<String>,
    pub min_prize: Option<String>,
    pub max_prize: Option<String>,
    /// Preset windows: "7days", "14days" or "30days".
    pub deadline: Option<String>,
    pub closing_soon: Option<String>,
    /// Free-form variant of the deadline presets, in days.
    pub closing_in: Option<String>,
    pub team_size_min: Option<String>,
    pub team_size_max: Option<String>,
    pub solo_allowed: Option<String>,
    pub verified: Option<String>,
    pub organizer_type: Option<String>,
    pub has_prize: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl FilterRequest {
    /// Most bookmarked first.
    pub fn trending() -> Self {
        Self {
            sort_by: Some("trending".into()),
            ..Default::default()
        }
    }

    /// Upcoming or ongoing events whose registration closes within a week.
    pub fn closing_soon() -> Self {
        Self {
            closing_soon: Some("true".into()),
            ..Default::default()
        }
    }

    /// Highest urgency first.
    pub fn urgent() -> Self {
        Self {
            sort_by: Some("urgency".into()),
            ..Default::default()
        }
    }
}

/// Inclusive `[from, until]` window over a timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub until: i64,
}

impl TimeWindow {
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.from && ts <= self.until
    }
}

/// Normalized, store-agnostic filter. All set fields must hold for an
/// event to match; an event lacking a field a constraint targets does not
/// match that constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPredicate {
    pub statuses: Option<Vec<HackathonStatus>>,
    pub mode: Option<ParticipationMode>,
    pub platform: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// Lowercased; matches case-insensitively against event tags.
    pub tags_any: Option<Vec<String>>,
    pub prize_min: Option<i64>,
    pub prize_max: Option<i64>,
    pub deadline_within: Option<TimeWindow>,
    pub team_size_min: Option<i64>,
    pub team_size_max: Option<i64>,
    pub solo_allowed: Option<bool>,
    pub verified_organizer: Option<bool>,
    pub organizer_type: Option<String>,
    pub has_prize: Option<bool>,
}

impl EventPredicate {
    /// In-memory evaluation. The Postgres repository translates the same
    /// fields into WHERE clauses; the two must agree.
    pub fn matches(&self, hackathon: &Hackathon) -> bool {
        if let Some(statuses) = &self.statuses {
            match hackathon.status {
                Some(status) if statuses.contains(&status) => {}
                _ => return false,
            }
        }
        if let Some(mode) = self.mode {
            if hackathon.participation_mode != Some(mode) {
                return false;
            }
        }
        if let Some(platform) = &self.platform {
            if hackathon.platform.as_deref() != Some(platform.as_str()) {
                return false;
            }
        }

        let location = hackathon.location.as_ref();
        if let Some(country) = &self.country {
            if location.and_then(|l| l.country.as_deref()) != Some(country.as_str()) {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if location.and_then(|l| l.state.as_deref()) != Some(state.as_str()) {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if location.and_then(|l| l.city.as_deref()) != Some(city.as_str()) {
                return false;
            }
        }

        if let Some(tags) = &self.tags_any {
            if !hackathon
                .tags
                .iter()
                .any(|tag| tags.contains(&tag.to_lowercase()))
            {
                return false;
            }
        }

        if self.prize_min.is_some() || self.prize_max.is_some() {
            let total = match hackathon.prize_total() {
                Some(total) => total,
                None => return false,
            };
            if let Some(min) = self.prize_min {
                if total < min {
                    return false;
                }
            }
            if let Some(max) = self.prize_max {
                if total > max {
                    return false;
                }
            }
        }

        if let Some(window) = &self.deadline_within {
            match hackathon.registration_deadline {
                Some(deadline) if window.contains(deadline) => {}
                _ => return false,
            }
        }

        if self.team_size_min.is_some() || self.team_size_max.is_some() || self.solo_allowed.is_some()
        {
            let team = match &hackathon.team_size {
                Some(team) => team,
                None => return false,
            };
            if let Some(min) = self.team_size_min {
                match team.min {
                    Some(m) if m >= min => {}
                    _ => return false,
                }
            }
            if let Some(max) = self.team_size_max {
                match team.max {
                    Some(m) if m <= max => {}
                    _ => return false,
                }
            }
            if self.solo_allowed == Some(true) && !team.solo_allowed {
                return false;
            }
        }

        if self.verified_organizer == Some(true) {
            match &hackathon.organizer {
                Some(organizer) if organizer.verified => {}
                _ => return false,
            }
        }
        if let Some(kind) = &self.organizer_type {
            if hackathon.organizer.as_ref().and_then(|o| o.kind.as_deref()) != Some(kind.as_str()) {
                return false;
            }
        }
        if self.has_prize == Some(true)
            && !hackathon.prize.as_ref().map_or(false, |p| p.has_prize)
        {
            return false;
        }

        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortField {
    UrgencyScore,
    RegistrationDeadline,
    StartDate,
    PrizeTotal,
    BookmarkCount,
    ViewCount,
    AddedDate,
    /// Unrecognized sort key, passed through verbatim. Backends that
    /// cannot interpret it keep their natural order.
    Raw(String),
}

impl SortField {
    pub fn from_alias(alias: &str) -> Self {
        match alias {
            "urgency" | "urgency_score" => Self::UrgencyScore,
            "deadline" => Self::RegistrationDeadline,
            "start_date" => Self::StartDate,
            "prize" => Self::PrizeTotal,
            "bookmarks" | "trending" => Self::BookmarkCount,
            "views" => Self::ViewCount,
            "recent" => Self::AddedDate,
            other => Self::Raw(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::UrgencyScore,
            order: SortOrder::Desc,
        }
    }
}

impl SortSpec {
    /// Comparator for in-memory sorting. Absent timestamps and totals
    /// compare as zero.
    pub fn compare(&self, a: &Hackathon, b: &Hackathon) -> Ordering {
        let ordering = match &self.field {
            SortField::UrgencyScore => a.computed.urgency_score.cmp(&b.computed.urgency_score),
            SortField::RegistrationDeadline => {
                cmp_optional(a.registration_deadline, b.registration_deadline)
            }
            SortField::StartDate => cmp_optional(a.start_date, b.start_date),
            SortField::PrizeTotal => cmp_optional(a.prize_total(), b.prize_total()),
            SortField::BookmarkCount => a
                .engagement
                .bookmark_count
                .cmp(&b.engagement.bookmark_count),
            SortField::ViewCount => a.engagement.view_count.cmp(&b.engagement.view_count),
            SortField::AddedDate => a.added_at.cmp(&b.added_at),
            SortField::Raw(_) => Ordering::Equal,
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

fn cmp_optional(a: Option<i64>, b: Option<i64>) -> Ordering {
    a.unwrap_or(0).cmp(&b.unwrap_or(0))
}

/// Normalizes a request into a predicate and sort spec. Pure: the same
/// request and clock always produce the same pair.
pub fn build_query(request: &FilterRequest, now: i64) -> (EventPredicate, SortSpec) {
    let mut predicate = EventPredicate::default();

    if let Some(status) = &request.status {
        if let Ok(status) = status.parse::<HackathonStatus>() {
            predicate.statuses = Some(vec![status]);
        }
    }
    if let Some(mode) = &request.mode {
        predicate.mode = mode.parse().ok();
    }
    predicate.platform = request.platform.clone();
    predicate.country = request.country.clone();
    predicate.state = request.state.clone();
    predicate.city = request.city.clone();

    if let Some(tags) = &request.tags {
        let tags = tags
            .split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .unique()
            .collect::<Vec<_>>();
        if !tags.is_empty() {
            predicate.tags_any = Some(tags);
        }
    }

    predicate.prize_min = parse_number(&request.min_prize);
    predicate.prize_max = parse_number(&request.max_prize);

    if let Some(preset) = &request.deadline {
        let days = match preset.as_str() {
            "7days" => Some(7),
            "14days" => Some(14),
            "30days" => Some(30),
            _ => None,
        };
        if let Some(days) = days {
            predicate.deadline_within = Some(days_ahead(now, days));
        }
    }
    // closingSoon overwrites any deadline preset and status option applied
    // above; closingIn in turn overwrites the window. Last write wins.
    if is_true(&request.closing_soon) {
        predicate.deadline_within = Some(days_ahead(now, 7));
        predicate.statuses = Some(vec![HackathonStatus::Upcoming, HackathonStatus::Ongoing]);
    }
    if let Some(days) = parse_number(&request.closing_in) {
        predicate.deadline_within = Some(days_ahead(now, days));
    }

    predicate.team_size_min = parse_number(&request.team_size_min);
    predicate.team_size_max = parse_number(&request.team_size_max);
    if is_true(&request.solo_allowed) {
        predicate.solo_allowed = Some(true);
    }
    if is_true(&request.verified) {
        predicate.verified_organizer = Some(true);
    }
    predicate.organizer_type = request.organizer_type.clone();
    if is_true(&request.has_prize) {
        predicate.has_prize = Some(true);
    }

    let field = request
        .sort_by
        .as_deref()
        .map(SortField::from_alias)
        .unwrap_or(SortField::UrgencyScore);
    let order = match request.order.as_deref() {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    (predicate, SortSpec { field, order })
}

fn parse_number(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

fn is_true(value: &Option<String>) -> bool {
    value.as_deref() == Some("true")
}

fn days_ahead(now: i64, days: i64) -> TimeWindow {
    TimeWindow {
        from: now,
        until: now + days * MILLIS_PER_DAY,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{Location, Organizer, PrizePool, TeamSize};

    const NOW: i64 = 1_700_000_000_000;

    fn request() -> FilterRequest {
        FilterRequest::default()
    }

    fn hackathon() -> Hackathon {
        Hackathon::new("query-hack".into(), "Query Hack".into(), NOW)
    }

    #[test]
    fn empty_request_matches_everything_and_sorts_by_urgency_desc() {
        let (predicate, sort) = build_query(&request(), NOW);
        assert_eq!(predicate, EventPredicate::default());
        assert_eq!(sort, SortSpec::default());
        assert!(predicate.matches(&hackathon()));
    }

    #[test]
    fn builder_is_referentially_transparent() {
        let mut req = request();
        req.closing_soon = Some("true".into());
        req.tags = Some("AI, Web3".into());
        assert_eq!(build_query(&req, NOW), build_query(&req, NOW));
    }

    #[test]
    fn status_option_parses_or_drops() {
        let mut req = request();
        req.status = Some("ongoing".into());
        let (predicate, _) = build_query(&req, NOW);
        assert_eq!(predicate.statuses, Some(vec![HackathonStatus::Ongoing]));

        req.status = Some("finished".into());
        let (predicate, _) = build_query(&req, NOW);
        assert_eq!(predicate.statuses, None);
    }

    #[test]
    fn unparseable_numbers_are_dropped() {
        let mut req = request();
        req.min_prize = Some("lots".into());
        req.closing_in = Some("soon".into());
        req.team_size_min = Some("".into());
        let (predicate, _) = build_query(&req, NOW);
        assert_eq!(predicate, EventPredicate::default());
    }

    #[test]
    fn tags_are_trimmed_lowercased_and_matched_any() {
        let mut req = request();
        req.tags = Some(" AI ,Web3,, ai".into());
        let (predicate, _) = build_query(&req, NOW);
        assert_eq!(
            predicate.tags_any,
            Some(vec!["ai".to_string(), "web3".to_string()])
        );

        let mut h = hackathon();
        h.tags = vec!["Web3".into(), "fintech".into()];
        assert!(predicate.matches(&h));

        h.tags = vec!["fintech".into()];
        assert!(!predicate.matches(&h));
    }

    #[test]
    fn prize_bounds_are_inclusive_and_require_a_total() {
        let mut req = request();
        req.min_prize = Some("1000".into());
        req.max_prize = Some("5000".into());
        let (predicate, _) = build_query(&req, NOW);

        let mut h = hackathon();
        assert!(!predicate.matches(&h), "no prize at all");

        h.prize = Some(PrizePool {
            total: Some(1000),
            ..Default::default()
        });
        assert!(predicate.matches(&h));

        h.prize = Some(PrizePool {
            total: Some(5000),
            ..Default::default()
        });
        assert!(predicate.matches(&h));

        h.prize = Some(PrizePool {
            total: Some(5001),
            ..Default::default()
        });
        assert!(!predicate.matches(&h));
    }

    #[test]
    fn deadline_presets_build_inclusive_windows() {
        for (preset, days) in [("7days", 7), ("14days", 14), ("30days", 30)] {
            let mut req = request();
            req.deadline = Some(preset.into());
            let (predicate, _) = build_query(&req, NOW);
            let window = predicate.deadline_within.unwrap();
            assert_eq!(window.from, NOW);
            assert_eq!(window.until, NOW + days * MILLIS_PER_DAY);
            assert!(window.contains(NOW));
            assert!(window.contains(NOW + days * MILLIS_PER_DAY));
            assert!(!window.contains(NOW - 1));
            assert!(!window.contains(NOW + days * MILLIS_PER_DAY + 1));
        }

        let mut req = request();
        req.deadline = Some("90days".into());
        let (predicate, _) = build_query(&req, NOW);
        assert_eq!(predicate.deadline_within, None);
    }

    #[test]
    fn closing_soon_overwrites_status_and_window() {
        let mut req = request();
        req.status = Some("past".into());
        req.deadline = Some("30days".into());
        req.closing_soon = Some("true".into());
        let (predicate, _) = build_query(&req, NOW);

        assert_eq!(
            predicate.statuses,
            Some(vec![HackathonStatus::Upcoming, HackathonStatus::Ongoing])
        );
        assert_eq!(
            predicate.deadline_within,
            Some(TimeWindow {
                from: NOW,
                until: NOW + 7 * MILLIS_PER_DAY
            })
        );
    }

    #[test]
    fn closing_soon_requires_active_status_and_near_deadline() {
        let mut req = request();
        req.closing_soon = Some("true".into());
        let (predicate, _) = build_query(&req, NOW);

        let mut h = hackathon();
        h.status = Some(HackathonStatus::Upcoming);
        h.registration_deadline = Some(NOW + 3 * MILLIS_PER_DAY);
        assert!(predicate.matches(&h));

        h.status = Some(HackathonStatus::Past);
        assert!(!predicate.matches(&h), "inactive status");

        h.status = Some(HackathonStatus::Ongoing);
        h.registration_deadline = Some(NOW + 8 * MILLIS_PER_DAY);
        assert!(!predicate.matches(&h), "deadline too far out");

        h.registration_deadline = None;
        assert!(!predicate.matches(&h), "no deadline");
    }

    #[test]
    fn closing_in_overwrites_the_window_but_not_the_status() {
        let mut req = request();
        req.closing_soon = Some("true".into());
        req.closing_in = Some("3".into());
        let (predicate, _) = build_query(&req, NOW);

        assert_eq!(
            predicate.deadline_within,
            Some(TimeWindow {
                from: NOW,
                until: NOW + 3 * MILLIS_PER_DAY
            })
        );
        assert_eq!(
            predicate.statuses,
            Some(vec![HackathonStatus::Upcoming, HackathonStatus::Ongoing])
        );
    }

    #[test]
    fn team_size_bounds_require_the_fields() {
        let mut req = request();
        req.team_size_min = Some("2".into());
        req.team_size_max = Some("6".into());
        req.solo_allowed = Some("true".into());
        let (predicate, _) = build_query(&req, NOW);

        let mut h = hackathon();
        assert!(!predicate.matches(&h), "no team size at all");

        h.team_size = Some(TeamSize {
            min: Some(2),
            max: Some(5),
            solo_allowed: true,
        });
        assert!(predicate.matches(&h));

        h.team_size = Some(TeamSize {
            min: Some(1),
            max: Some(5),
            solo_allowed: true,
        });
        assert!(!predicate.matches(&h), "min below bound");

        h.team_size = Some(TeamSize {
            min: Some(2),
            max: Some(5),
            solo_allowed: false,
        });
        assert!(!predicate.matches(&h), "solo not allowed");
    }

    #[test]
    fn verified_and_organizer_type_look_at_the_organizer() {
        let mut req = request();
        req.verified = Some("true".into());
        req.organizer_type = Some("company".into());
        let (predicate, _) = build_query(&req, NOW);

        let mut h = hackathon();
        assert!(!predicate.matches(&h));

        h.organizer = Some(Organizer {
            name: "DevFoundry".into(),
            kind: Some("company".into()),
            verified: true,
        });
        assert!(predicate.matches(&h));

        h.organizer = Some(Organizer {
            name: "DevFoundry".into(),
            kind: Some("community".into()),
            verified: true,
        });
        assert!(!predicate.matches(&h));
    }

    #[test]
    fn location_options_match_exactly() {
        let mut req = request();
        req.country = Some("India".into());
        req.city = Some("Bangalore".into());
        let (predicate, _) = build_query(&req, NOW);

        let mut h = hackathon();
        h.location = Some(Location {
            venue: None,
            city: Some("Bangalore".into()),
            state: Some("Karnataka".into()),
            country: Some("India".into()),
        });
        assert!(predicate.matches(&h));

        h.location = Some(Location {
            city: Some("Mumbai".into()),
            country: Some("India".into()),
            ..Default::default()
        });
        assert!(!predicate.matches(&h));

        h.location = None;
        assert!(!predicate.matches(&h));
    }

    #[test]
    fn sort_aliases_normalize() {
        let cases = vec![
            ("urgency", SortField::UrgencyScore),
            ("urgency_score", SortField::UrgencyScore),
            ("deadline", SortField::RegistrationDeadline),
            ("start_date", SortField::StartDate),
            ("prize", SortField::PrizeTotal),
            ("bookmarks", SortField::BookmarkCount),
            ("trending", SortField::BookmarkCount),
            ("views", SortField::ViewCount),
            ("recent", SortField::AddedDate),
            ("something_else", SortField::Raw("something_else".into())),
        ];
        for (alias, expected) in cases {
            assert_eq!(SortField::from_alias(alias), expected, "alias: {}", alias);
        }
    }

    #[test]
    fn order_defaults_to_desc() {
        let mut req = request();
        req.sort_by = Some("prize".into());
        let (_, sort) = build_query(&req, NOW);
        assert_eq!(sort.order, SortOrder::Desc);

        req.order = Some("asc".into());
        let (_, sort) = build_query(&req, NOW);
        assert_eq!(sort.order, SortOrder::Asc);

        req.order = Some("descending".into());
        let (_, sort) = build_query(&req, NOW);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn comparator_follows_the_sort_field() {
        let mut cheap = hackathon();
        cheap.prize = Some(PrizePool {
            total: Some(1000),
            ..Default::default()
        });
        let mut rich = hackathon();
        rich.prize = Some(PrizePool {
            total: Some(100_000),
            ..Default::default()
        });

        let sort = SortSpec {
            field: SortField::PrizeTotal,
            order: SortOrder::Desc,
        };
        assert_eq!(sort.compare(&rich, &cheap), Ordering::Less);

        let sort = SortSpec {
            field: SortField::PrizeTotal,
            order: SortOrder::Asc,
        };
        assert_eq!(sort.compare(&rich, &cheap), Ordering::Greater);

        let sort = SortSpec {
            field: SortField::Raw("mystery".into()),
            order: SortOrder::Desc,
        };
        assert_eq!(sort.compare(&rich, &cheap), Ordering::Equal);
    }
}
