use super::ISearchAnalyticsRepo;
use hackwatch_domain::SearchStat;
use std::sync::Mutex;

pub struct InMemorySearchAnalyticsRepo {
    stats: Mutex<Vec<SearchStat>>,
}

impl InMemorySearchAnalyticsRepo {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISearchAnalyticsRepo for InMemorySearchAnalyticsRepo {
    async fn record(&self, query: &str, results_count: i64, now: i64) -> anyhow::Result<()> {
        let mut stats = self.stats.lock().unwrap();
        for stat in stats.iter_mut() {
            if stat.query == query {
                stat.search_count += 1;
                stat.results_count = results_count;
                stat.last_searched = now;
                return Ok(());
            }
        }
        stats.push(SearchStat {
            query: query.to_string(),
            search_count: 1,
            results_count,
            last_searched: now,
        });
        Ok(())
    }

    async fn most_searched(&self, limit: usize) -> anyhow::Result<Vec<SearchStat>> {
        let mut stats = self.stats.lock().unwrap().clone();
        stats.sort_by(|a, b| b.search_count.cmp(&a.search_count));
        stats.truncate(limit);
        Ok(stats)
    }
}
