use super::IHackathonRepo;
use crate::repos::shared::inmemory_repo::*;
use hackwatch_domain::{ComputedFields, EventPredicate, Hackathon, HackathonStatus, SortSpec, ID};
use std::sync::Mutex;

pub struct InMemoryHackathonRepo {
    hackathons: Mutex<Vec<Hackathon>>,
}

impl InMemoryHackathonRepo {
    pub fn new() -> Self {
        Self {
            hackathons: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IHackathonRepo for InMemoryHackathonRepo {
    async fn insert(&self, hackathon: &Hackathon) -> anyhow::Result<()> {
        insert(hackathon, &self.hackathons);
        Ok(())
    }

    async fn save(&self, hackathon: &Hackathon) -> anyhow::Result<()> {
        save(hackathon, &self.hackathons);
        Ok(())
    }

    async fn update_derived(
        &self,
        hackathon_id: &ID,
        status: Option<HackathonStatus>,
        computed: &ComputedFields,
        updated_at: i64,
    ) -> anyhow::Result<()> {
        let computed = *computed;
        update_many(
            &self.hackathons,
            |h| h.id == *hackathon_id,
            |h| {
                h.status = status;
                h.computed = computed;
                h.updated_at = updated_at;
            },
        );
        Ok(())
    }

    async fn increment_view_count(&self, hackathon_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.hackathons,
            |h| h.id == *hackathon_id,
            |h| h.engagement.view_count += 1,
        );
        Ok(())
    }

    async fn set_bookmark_count(&self, hackathon_id: &ID, count: i64) -> anyhow::Result<()> {
        update_many(
            &self.hackathons,
            |h| h.id == *hackathon_id,
            |h| h.engagement.bookmark_count = count,
        );
        Ok(())
    }

    async fn find(&self, hackathon_id: &ID) -> Option<Hackathon> {
        find(hackathon_id, &self.hackathons)
    }

    async fn find_by_slug(&self, slug: &str) -> Option<Hackathon> {
        find_by(&self.hackathons, |h| h.slug == slug)
            .into_iter()
            .next()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Hackathon>> {
        Ok(find_by(&self.hackathons, |_| true))
    }

    async fn query(
        &self,
        predicate: &EventPredicate,
        sort: &SortSpec,
        skip: usize,
        limit: usize,
    ) -> anyhow::Result<Vec<Hackathon>> {
        let mut matches = find_by(&self.hackathons, |h| predicate.matches(h));
        matches.sort_by(|a, b| sort.compare(a, b));
        Ok(matches.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, predicate: &EventPredicate) -> anyhow::Result<i64> {
        Ok(find_by(&self.hackathons, |h| predicate.matches(h)).len() as i64)
    }
}
