use sqlx::PgPool;

use super::repo_types::{Vote, VoteRow};
use crate::query::ListQuery;

pub const FILTER_USER: &str = "v.user_id";
pub const FILTER_PROPERTY: &str = "v.property_id";

const ORDER: &str = "v.created_at DESC, v.id DESC";

const LIST_BASE: &str = r#"
    SELECT v.id, v.user_id, v.property_id, v.vote_option_id, v.created_at,
           u.first_name AS voter_first_name, u.last_name AS voter_last_name,
           p.title AS property_title, vo.name AS vote_option_name
    FROM votes v
    JOIN users u ON v.user_id = u.id
    JOIN properties p ON v.property_id = p.id
    JOIN vote_options vo ON v.vote_option_id = vo.id
"#;

impl Vote {
    pub async fn list(db: &PgPool, filter: &ListQuery) -> Result<Vec<VoteRow>, sqlx::Error> {
        filter
            .build(LIST_BASE, ORDER)
            .build_query_as::<VoteRow>()
            .fetch_all(db)
            .await
    }

    /// Inserts the vote unless the user already voted on the property.
    /// `None` means a vote for this (user, property) pair already exists.
    pub async fn cast(
        db: &PgPool,
        user_id: i32,
        property_id: i32,
        vote_option_id: i32,
    ) -> Result<Option<Vote>, sqlx::Error> {
        sqlx::query_as::<_, Vote>(
            r#"
            INSERT INTO votes (user_id, property_id, vote_option_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, property_id) DO NOTHING
            RETURNING id, user_id, property_id, vote_option_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(property_id)
        .bind(vote_option_id)
        .fetch_optional(db)
        .await
    }
}
