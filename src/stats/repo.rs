use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Votes received by one option on one property.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct OptionCount {
    pub vote_option_id: i32,
    pub option_name: String,
    pub vote_count: i64,
}

#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct PlatformCounts {
    pub total_users: i64,
    pub total_properties: i64,
    pub total_votes: i64,
    pub total_images: i64,
    pub total_prospect_properties: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecentProperty {
    pub id: i32,
    pub title: String,
    pub created_at: OffsetDateTime,
    pub first_name: String,
    pub last_name: String,
}

/// Every option of the property's category plus any other option it was
/// voted with, each with its vote count.
pub async fn option_counts(db: &PgPool, property_id: i32) -> Result<Vec<OptionCount>, sqlx::Error> {
    sqlx::query_as::<_, OptionCount>(
        r#"
        SELECT vo.id AS vote_option_id, vo.name AS option_name, COUNT(v.id) AS vote_count
          FROM vote_options vo
          LEFT JOIN votes v ON v.vote_option_id = vo.id AND v.property_id = $1
         WHERE vo.category_id = (SELECT category_id FROM properties WHERE id = $1)
            OR v.id IS NOT NULL
         GROUP BY vo.id, vo.name
        "#,
    )
    .bind(property_id)
    .fetch_all(db)
    .await
}

pub async fn platform_counts(db: &PgPool) -> Result<PlatformCounts, sqlx::Error> {
    sqlx::query_as::<_, PlatformCounts>(
        r#"
        SELECT (SELECT COUNT(*) FROM users)               AS total_users,
               (SELECT COUNT(*) FROM properties)          AS total_properties,
               (SELECT COUNT(*) FROM votes)               AS total_votes,
               (SELECT COUNT(*) FROM property_images)     AS total_images,
               (SELECT COUNT(*) FROM prospect_properties) AS total_prospect_properties
        "#,
    )
    .fetch_one(db)
    .await
}

pub async fn recent_properties(db: &PgPool, limit: i64) -> Result<Vec<RecentProperty>, sqlx::Error> {
    sqlx::query_as::<_, RecentProperty>(
        r#"
        SELECT p.id, p.title, p.created_at, u.first_name, u.last_name
          FROM properties p
          JOIN users u ON p.user_id = u.id
         ORDER BY p.created_at DESC, p.id DESC
         LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
}
