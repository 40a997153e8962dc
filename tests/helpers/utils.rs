use hackwatch_domain::{Hackathon, Organizer, PrizePool, MILLIS_PER_DAY};

/// Event whose registration closes at `deadline`, starting a day later
/// and running for two days.
pub fn event_with_deadline(slug: &str, deadline: i64) -> Hackathon {
    let mut hackathon = Hackathon::new(slug.into(), slug.into(), 0);
    hackathon.registration_deadline = Some(deadline);
    hackathon.start_date = Some(deadline + MILLIS_PER_DAY);
    hackathon.end_date = Some(deadline + 3 * MILLIS_PER_DAY);
    hackathon
}

pub fn prize(total: i64) -> Option<PrizePool> {
    Some(PrizePool {
        total: Some(total),
        currency: "INR".into(),
        has_prize: true,
    })
}

pub fn verified_organizer(name: &str) -> Option<Organizer> {
    Some(Organizer {
        name: name.into(),
        kind: Some("company".into()),
        verified: true,
    })
}
