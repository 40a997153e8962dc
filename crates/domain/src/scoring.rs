//! Urgency scoring for hackathon listings.
//!
//! The score is a pure function of an event snapshot and the current time:
//! five additive components, clamped to 100. Absent inputs contribute
//! nothing, they never error.

use crate::event::{days_until, Hackathon};

pub const MAX_SCORE: i64 = 100;

pub fn urgency_score(hackathon: &Hackathon, now: i64) -> i64 {
    let score = deadline_proximity_points(hackathon.registration_deadline, now)
        + prize_points(hackathon.prize_total())
        + social_proof_points(hackathon.engagement.bookmark_count)
        + popularity_points(hackathon.engagement.view_count)
        + trust_points(hackathon);
    score.min(MAX_SCORE)
}

/// 0-40 points by deadline proximity. Elapsed deadlines score nothing.
fn deadline_proximity_points(deadline: Option<i64>, now: i64) -> i64 {
    let days = match deadline {
        Some(deadline) => days_until(deadline, now),
        None => return 0,
    };
    if days <= 0 {
        0
    } else if days <= 1 {
        40
    } else if days <= 3 {
        35
    } else if days <= 7 {
        30
    } else if days <= 14 {
        20
    } else if days <= 30 {
        10
    } else {
        5
    }
}

/// 0-25 points by prize pool size.
fn prize_points(total: Option<i64>) -> i64 {
    match total {
        Some(total) if total >= 1_000_000 => 25,
        Some(total) if total >= 500_000 => 22,
        Some(total) if total >= 100_000 => 18,
        Some(total) if total >= 50_000 => 14,
        Some(total) if total >= 10_000 => 10,
        Some(total) if total > 0 => 5,
        _ => 0,
    }
}

/// Up to 20 points, two per bookmark.
fn social_proof_points(bookmark_count: i64) -> i64 {
    (bookmark_count * 2).min(20)
}

/// Up to 10 points, one per ten views.
fn popularity_points(view_count: i64) -> i64 {
    (view_count / 10).min(10)
}

fn trust_points(hackathon: &Hackathon) -> i64 {
    match &hackathon.organizer {
        Some(organizer) if organizer.verified => 5,
        _ => 0,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{Engagement, Organizer, PrizePool, MILLIS_PER_DAY, MILLIS_PER_HOUR};

    const NOW: i64 = 1_700_000_000_000;

    fn hackathon() -> Hackathon {
        Hackathon::new("score-hack".into(), "Score Hack".into(), NOW)
    }

    #[test]
    fn deadline_in_twelve_hours_scores_forty() {
        let mut h = hackathon();
        h.registration_deadline = Some(NOW + 12 * MILLIS_PER_HOUR);
        assert_eq!(urgency_score(&h, NOW), 40);
    }

    #[test]
    fn fully_specified_event_sums_its_bands() {
        let mut h = hackathon();
        h.registration_deadline = Some(NOW + 10 * MILLIS_PER_DAY);
        h.prize = Some(PrizePool {
            total: Some(600_000),
            currency: "INR".into(),
            has_prize: true,
        });
        h.engagement = Engagement {
            view_count: 50,
            bookmark_count: 5,
        };
        h.organizer = Some(Organizer {
            name: "DevFoundry".into(),
            kind: Some("company".into()),
            verified: true,
        });
        // 20 (deadline) + 22 (prize) + 10 (bookmarks) + 5 (views) + 5 (verified)
        assert_eq!(urgency_score(&h, NOW), 62);
    }

    #[test]
    fn empty_event_scores_zero() {
        assert_eq!(urgency_score(&hackathon(), NOW), 0);
    }

    #[test]
    fn elapsed_deadline_scores_zero() {
        let mut h = hackathon();
        h.registration_deadline = Some(NOW - 1);
        assert_eq!(urgency_score(&h, NOW), 0);
    }

    #[test]
    fn deadline_bands() {
        let cases = vec![
            (1, 40),
            (2, 35),
            (3, 35),
            (4, 30),
            (7, 30),
            (8, 20),
            (14, 20),
            (15, 10),
            (30, 10),
            (31, 5),
            (365, 5),
        ];
        for (days, expected) in cases {
            let mut h = hackathon();
            h.registration_deadline = Some(NOW + days * MILLIS_PER_DAY);
            assert_eq!(urgency_score(&h, NOW), expected, "days: {}", days);
        }
    }

    #[test]
    fn prize_bands() {
        let cases = vec![
            (None, 0),
            (Some(0), 0),
            (Some(500), 5),
            (Some(9_999), 5),
            (Some(10_000), 10),
            (Some(50_000), 14),
            (Some(100_000), 18),
            (Some(500_000), 22),
            (Some(999_999), 22),
            (Some(1_000_000), 25),
            (Some(5_000_000), 25),
        ];
        for (total, expected) in cases {
            let mut h = hackathon();
            h.prize = Some(PrizePool {
                total,
                currency: "INR".into(),
                has_prize: total.is_some(),
            });
            assert_eq!(urgency_score(&h, NOW), expected, "total: {:?}", total);
        }
    }

    #[test]
    fn engagement_points_are_capped() {
        let mut h = hackathon();
        h.engagement = Engagement {
            view_count: 100_000,
            bookmark_count: 500,
        };
        // 20 social proof + 10 popularity
        assert_eq!(urgency_score(&h, NOW), 30);
    }

    #[test]
    fn maxed_out_event_hits_the_ceiling() {
        let mut h = hackathon();
        h.registration_deadline = Some(NOW + MILLIS_PER_DAY);
        h.prize = Some(PrizePool {
            total: Some(2_000_000),
            currency: "USD".into(),
            has_prize: true,
        });
        h.engagement = Engagement {
            view_count: 1000,
            bookmark_count: 100,
        };
        h.organizer = Some(Organizer {
            name: "MegaCorp".into(),
            kind: Some("company".into()),
            verified: true,
        });
        assert_eq!(urgency_score(&h, NOW), MAX_SCORE);
    }

    #[test]
    fn identical_inputs_score_identically() {
        let mut a = hackathon();
        a.registration_deadline = Some(NOW + 5 * MILLIS_PER_DAY);
        a.engagement.bookmark_count = 3;
        let mut b = hackathon();
        b.registration_deadline = Some(NOW + 5 * MILLIS_PER_DAY);
        b.engagement.bookmark_count = 3;

        assert_eq!(urgency_score(&a, NOW), urgency_score(&b, NOW));
    }
}
