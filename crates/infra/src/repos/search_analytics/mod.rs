mod inmemory;
mod postgres;

use hackwatch_domain::SearchStat;
pub use inmemory::InMemorySearchAnalyticsRepo;
pub use postgres::PostgresSearchAnalyticsRepo;

#[async_trait::async_trait]
pub trait ISearchAnalyticsRepo: Send + Sync {
    /// Upserts the stat row for a normalized query: bumps its counter and
    /// records the latest result count and timestamp.
    async fn record(&self, query: &str, results_count: i64, now: i64) -> anyhow::Result<()>;
    async fn most_searched(&self, limit: usize) -> anyhow::Result<Vec<SearchStat>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context_inmemory;

    const NOW: i64 = 1_700_000_000_000;

    #[tokio::test]
    async fn repeated_queries_accumulate_and_rank() {
        let ctx = setup_context_inmemory();
        let analytics = &ctx.repos.search_analytics;

        analytics.record("rust", 4, NOW).await.expect("To record");
        analytics
            .record("rust", 6, NOW + 1000)
            .await
            .expect("To record");
        analytics.record("ai", 12, NOW).await.expect("To record");

        let top = analytics.most_searched(10).await.expect("To rank queries");
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].query, "rust");
        assert_eq!(top[0].search_count, 2);
        assert_eq!(top[0].results_count, 6);
        assert_eq!(top[0].last_searched, NOW + 1000);
        assert_eq!(top[1].query, "ai");

        let capped = analytics.most_searched(1).await.expect("To rank queries");
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].query, "rust");
    }
}
