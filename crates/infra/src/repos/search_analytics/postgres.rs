use super::ISearchAnalyticsRepo;
use hackwatch_domain::SearchStat;
use sqlx::{FromRow, PgPool};

pub struct PostgresSearchAnalyticsRepo {
    pool: PgPool,
}

impl PostgresSearchAnalyticsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SearchStatRaw {
    query: String,
    search_count: i64,
    results_count: i64,
    last_searched: i64,
}

impl Into<SearchStat> for SearchStatRaw {
    fn into(self) -> SearchStat {
        SearchStat {
            query: self.query,
            search_count: self.search_count,
            results_count: self.results_count,
            last_searched: self.last_searched,
        }
    }
}

#[async_trait::async_trait]
impl ISearchAnalyticsRepo for PostgresSearchAnalyticsRepo {
    async fn record(&self, query: &str, results_count: i64, now: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO search_stats(query, search_count, results_count, last_searched)
            VALUES($1, 1, $2, $3)
            ON CONFLICT (query) DO UPDATE
            SET search_count = search_stats.search_count + 1,
            results_count = EXCLUDED.results_count,
            last_searched = EXCLUDED.last_searched
            "#,
        )
        .bind(query)
        .bind(results_count)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn most_searched(&self, limit: usize) -> anyhow::Result<Vec<SearchStat>> {
        let stats: Vec<SearchStatRaw> = sqlx::query_as(
            r#"
            SELECT * FROM search_stats
            ORDER BY search_count DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(stats.into_iter().map(|stat| stat.into()).collect())
    }
}
