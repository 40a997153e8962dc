use super::IHackathonRepo;
use hackwatch_domain::{
    ComputedFields, Engagement, EventPredicate, Hackathon, HackathonStatus, Location, Organizer,
    PrizePool, SortField, SortOrder, SortSpec, TeamSize, ID,
};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool, Postgres, QueryBuilder,
};
use tracing::debug;

pub struct PostgresHackathonRepo {
    pool: PgPool,
}

impl PostgresHackathonRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct HackathonRaw {
    hackathon_uid: Uuid,
    slug: String,
    title: String,
    description: Option<String>,
    url: Option<String>,
    platform: Option<String>,
    start_date: Option<i64>,
    end_date: Option<i64>,
    registration_deadline: Option<i64>,
    participation_mode: Option<String>,
    location: Option<Json<Location>>,
    organizer: Option<Json<Organizer>>,
    prize: Option<Json<PrizePool>>,
    team_size: Option<Json<TeamSize>>,
    tags: Vec<String>,
    status: Option<String>,
    view_count: i64,
    bookmark_count: i64,
    days_until_event: Option<i64>,
    days_until_deadline: Option<i64>,
    urgency_score: i64,
    added_at: i64,
    updated_at: i64,
}

impl Into<Hackathon> for HackathonRaw {
    fn into(self) -> Hackathon {
        Hackathon {
            id: self.hackathon_uid.into(),
            slug: self.slug,
            title: self.title,
            description: self.description,
            url: self.url,
            platform: self.platform,
            start_date: self.start_date,
            end_date: self.end_date,
            registration_deadline: self.registration_deadline,
            participation_mode: self.participation_mode.and_then(|mode| mode.parse().ok()),
            location: self.location.map(|location| location.0),
            organizer: self.organizer.map(|organizer| organizer.0),
            prize: self.prize.map(|prize| prize.0),
            team_size: self.team_size.map(|team_size| team_size.0),
            tags: self.tags,
            status: self.status.and_then(|status| status.parse().ok()),
            engagement: Engagement {
                view_count: self.view_count,
                bookmark_count: self.bookmark_count,
            },
            computed: ComputedFields {
                days_until_event: self.days_until_event,
                days_until_deadline: self.days_until_deadline,
                urgency_score: self.urgency_score,
            },
            added_at: self.added_at,
            updated_at: self.updated_at,
        }
    }
}

/// Appends the predicate as WHERE clauses. Every clause here must agree
/// with `EventPredicate::matches`; JSON fields fail the comparison when
/// absent, exactly like the in-memory evaluation.
fn push_predicate(query: &mut QueryBuilder<Postgres>, predicate: &EventPredicate) {
    if let Some(statuses) = &predicate.statuses {
        let statuses = statuses
            .iter()
            .map(|status| status.as_str().to_string())
            .collect::<Vec<_>>();
        query.push(" AND status = ANY(");
        query.push_bind(statuses);
        query.push(")");
    }
    if let Some(mode) = predicate.mode {
        query.push(" AND participation_mode = ");
        query.push_bind(mode.as_str());
    }
    if let Some(platform) = &predicate.platform {
        query.push(" AND platform = ");
        query.push_bind(platform.clone());
    }
    if let Some(country) = &predicate.country {
        query.push(" AND location->>'country' = ");
        query.push_bind(country.clone());
    }
    if let Some(state) = &predicate.state {
        query.push(" AND location->>'state' = ");
        query.push_bind(state.clone());
    }
    if let Some(city) = &predicate.city {
        query.push(" AND location->>'city' = ");
        query.push_bind(city.clone());
    }
    if let Some(tags) = &predicate.tags_any {
        query.push(" AND EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE lower(tag) = ANY(");
        query.push_bind(tags.clone());
        query.push("))");
    }
    if let Some(min) = predicate.prize_min {
        query.push(" AND (prize->>'total')::bigint >= ");
        query.push_bind(min);
    }
    if let Some(max) = predicate.prize_max {
        query.push(" AND (prize->>'total')::bigint <= ");
        query.push_bind(max);
    }
    if let Some(window) = &predicate.deadline_within {
        query.push(" AND registration_deadline >= ");
        query.push_bind(window.from);
        query.push(" AND registration_deadline <= ");
        query.push_bind(window.until);
    }
    if let Some(min) = predicate.team_size_min {
        query.push(" AND (team_size->>'min')::bigint >= ");
        query.push_bind(min);
    }
    if let Some(max) = predicate.team_size_max {
        query.push(" AND (team_size->>'max')::bigint <= ");
        query.push_bind(max);
    }
    if predicate.solo_allowed == Some(true) {
        query.push(" AND (team_size->>'solo_allowed')::boolean = TRUE");
    }
    if predicate.verified_organizer == Some(true) {
        query.push(" AND (organizer->>'verified')::boolean = TRUE");
    }
    if let Some(kind) = &predicate.organizer_type {
        query.push(" AND organizer->>'type' = ");
        query.push_bind(kind.clone());
    }
    if predicate.has_prize == Some(true) {
        query.push(" AND (prize->>'has_prize')::boolean = TRUE");
    }
}

fn sort_expression(sort: &SortSpec) -> String {
    let column = match &sort.field {
        SortField::UrgencyScore => "urgency_score",
        SortField::RegistrationDeadline => "COALESCE(registration_deadline, 0)",
        SortField::StartDate => "COALESCE(start_date, 0)",
        SortField::PrizeTotal => "COALESCE((prize->>'total')::bigint, 0)",
        SortField::BookmarkCount => "bookmark_count",
        SortField::ViewCount => "view_count",
        SortField::AddedDate => "added_at",
        SortField::Raw(alias) => {
            debug!("Unknown sort key: {}. Falling back to urgency", alias);
            "urgency_score"
        }
    };
    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!("{} {}", column, direction)
}

#[async_trait::async_trait]
impl IHackathonRepo for PostgresHackathonRepo {
    async fn insert(&self, hackathon: &Hackathon) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO hackathons(
                hackathon_uid, slug, title, description, url, platform,
                start_date, end_date, registration_deadline, participation_mode,
                location, organizer, prize, team_size, tags, status,
                view_count, bookmark_count, days_until_event, days_until_deadline,
                urgency_score, added_at, updated_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                   $15, $16, $17, $18, $19, $20, $21, $22, $23)
            "#,
        )
        .bind(hackathon.id.inner_ref())
        .bind(&hackathon.slug)
        .bind(&hackathon.title)
        .bind(&hackathon.description)
        .bind(&hackathon.url)
        .bind(&hackathon.platform)
        .bind(hackathon.start_date)
        .bind(hackathon.end_date)
        .bind(hackathon.registration_deadline)
        .bind(hackathon.participation_mode.map(|mode| mode.as_str()))
        .bind(hackathon.location.clone().map(Json))
        .bind(hackathon.organizer.clone().map(Json))
        .bind(hackathon.prize.clone().map(Json))
        .bind(hackathon.team_size.clone().map(Json))
        .bind(&hackathon.tags)
        .bind(hackathon.status.map(|status| status.as_str()))
        .bind(hackathon.engagement.view_count)
        .bind(hackathon.engagement.bookmark_count)
        .bind(hackathon.computed.days_until_event)
        .bind(hackathon.computed.days_until_deadline)
        .bind(hackathon.computed.urgency_score)
        .bind(hackathon.added_at)
        .bind(hackathon.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, hackathon: &Hackathon) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE hackathons
            SET slug = $2,
            title = $3,
            description = $4,
            url = $5,
            platform = $6,
            start_date = $7,
            end_date = $8,
            registration_deadline = $9,
            participation_mode = $10,
            location = $11,
            organizer = $12,
            prize = $13,
            team_size = $14,
            tags = $15,
            status = $16,
            view_count = $17,
            bookmark_count = $18,
            days_until_event = $19,
            days_until_deadline = $20,
            urgency_score = $21,
            added_at = $22,
            updated_at = $23
            WHERE hackathon_uid = $1
            "#,
        )
        .bind(hackathon.id.inner_ref())
        .bind(&hackathon.slug)
        .bind(&hackathon.title)
        .bind(&hackathon.description)
        .bind(&hackathon.url)
        .bind(&hackathon.platform)
        .bind(hackathon.start_date)
        .bind(hackathon.end_date)
        .bind(hackathon.registration_deadline)
        .bind(hackathon.participation_mode.map(|mode| mode.as_str()))
        .bind(hackathon.location.clone().map(Json))
        .bind(hackathon.organizer.clone().map(Json))
        .bind(hackathon.prize.clone().map(Json))
        .bind(hackathon.team_size.clone().map(Json))
        .bind(&hackathon.tags)
        .bind(hackathon.status.map(|status| status.as_str()))
        .bind(hackathon.engagement.view_count)
        .bind(hackathon.engagement.bookmark_count)
        .bind(hackathon.computed.days_until_event)
        .bind(hackathon.computed.days_until_deadline)
        .bind(hackathon.computed.urgency_score)
        .bind(hackathon.added_at)
        .bind(hackathon.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_derived(
        &self,
        hackathon_id: &ID,
        status: Option<HackathonStatus>,
        computed: &ComputedFields,
        updated_at: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE hackathons
            SET status = $2,
            days_until_event = $3,
            days_until_deadline = $4,
            urgency_score = $5,
            updated_at = $6
            WHERE hackathon_uid = $1
            "#,
        )
        .bind(hackathon_id.inner_ref())
        .bind(status.map(|status| status.as_str()))
        .bind(computed.days_until_event)
        .bind(computed.days_until_deadline)
        .bind(computed.urgency_score)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_view_count(&self, hackathon_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE hackathons
            SET view_count = view_count + 1
            WHERE hackathon_uid = $1
            "#,
        )
        .bind(hackathon_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_bookmark_count(&self, hackathon_id: &ID, count: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE hackathons
            SET bookmark_count = $2
            WHERE hackathon_uid = $1
            "#,
        )
        .bind(hackathon_id.inner_ref())
        .bind(count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, hackathon_id: &ID) -> Option<Hackathon> {
        match sqlx::query_as::<_, HackathonRaw>(
            r#"
            SELECT * FROM hackathons
            WHERE hackathon_uid = $1
            "#,
        )
        .bind(hackathon_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(hackathon) => Some(hackathon.into()),
            Err(_) => None,
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Option<Hackathon> {
        match sqlx::query_as::<_, HackathonRaw>(
            r#"
            SELECT * FROM hackathons
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        {
            Ok(hackathon) => Some(hackathon.into()),
            Err(_) => None,
        }
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Hackathon>> {
        let hackathons: Vec<HackathonRaw> = sqlx::query_as(
            r#"
            SELECT * FROM hackathons
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(hackathons
            .into_iter()
            .map(|hackathon| hackathon.into())
            .collect())
    }

    async fn query(
        &self,
        predicate: &EventPredicate,
        sort: &SortSpec,
        skip: usize,
        limit: usize,
    ) -> anyhow::Result<Vec<Hackathon>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM hackathons WHERE TRUE");
        push_predicate(&mut query, predicate);
        query.push(" ORDER BY ");
        query.push(sort_expression(sort));
        query.push(" LIMIT ");
        query.push_bind(limit as i64);
        query.push(" OFFSET ");
        query.push_bind(skip as i64);

        let hackathons: Vec<HackathonRaw> =
            query.build_query_as().fetch_all(&self.pool).await?;
        Ok(hackathons
            .into_iter()
            .map(|hackathon| hackathon.into())
            .collect())
    }

    async fn count(&self, predicate: &EventPredicate) -> anyhow::Result<i64> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM hackathons WHERE TRUE");
        push_predicate(&mut query, predicate);
        let count: i64 = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }
}
