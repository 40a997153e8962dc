use super::ISavedFilterRepo;
use hackwatch_domain::{FilterRequest, SavedFilter, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresSavedFilterRepo {
    pool: PgPool,
}

impl PostgresSavedFilterRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SavedFilterRaw {
    saved_filter_uid: Uuid,
    user_uid: Uuid,
    name: String,
    criteria: Json<FilterRequest>,
    is_default: bool,
    usage_count: i64,
    created_at: i64,
}

impl Into<SavedFilter> for SavedFilterRaw {
    fn into(self) -> SavedFilter {
        SavedFilter {
            id: self.saved_filter_uid.into(),
            user_id: self.user_uid.into(),
            name: self.name,
            criteria: self.criteria.0,
            is_default: self.is_default,
            usage_count: self.usage_count,
            created_at: self.created_at,
        }
    }
}

#[async_trait::async_trait]
impl ISavedFilterRepo for PostgresSavedFilterRepo {
    async fn insert(&self, filter: &SavedFilter) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO saved_filters(
                saved_filter_uid, user_uid, name, criteria, is_default,
                usage_count, created_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(filter.id.inner_ref())
        .bind(filter.user_id.inner_ref())
        .bind(&filter.name)
        .bind(Json(filter.criteria.clone()))
        .bind(filter.is_default)
        .bind(filter.usage_count)
        .bind(filter.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, filter_id: &ID) -> Option<SavedFilter> {
        match sqlx::query_as::<_, SavedFilterRaw>(
            r#"
            SELECT * FROM saved_filters
            WHERE saved_filter_uid = $1
            "#,
        )
        .bind(filter_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(filter) => Some(filter.into()),
            Err(_) => None,
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<SavedFilter> {
        let filters: Vec<SavedFilterRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM saved_filters
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        {
            Ok(filters) => filters,
            Err(_) => return Vec::new(),
        };
        filters.into_iter().map(|filter| filter.into()).collect()
    }

    async fn clear_default_for_user(&self, user_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE saved_filters
            SET is_default = FALSE
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_usage(&self, filter_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE saved_filters
            SET usage_count = usage_count + 1
            WHERE saved_filter_uid = $1
            "#,
        )
        .bind(filter_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, filter_id: &ID) -> Option<SavedFilter> {
        match sqlx::query_as::<_, SavedFilterRaw>(
            r#"
            DELETE FROM saved_filters
            WHERE saved_filter_uid = $1
            RETURNING *
            "#,
        )
        .bind(filter_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(filter) => Some(filter.into()),
            Err(_) => None,
        }
    }
}
