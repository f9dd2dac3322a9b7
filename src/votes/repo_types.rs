use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Vote {
    pub id: i32,
    pub user_id: i32,
    pub property_id: i32,
    pub vote_option_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Vote joined with voter, property title and option name.
#[derive(Debug, Clone, FromRow)]
pub struct VoteRow {
    #[sqlx(flatten)]
    pub vote: Vote,
    pub voter_first_name: String,
    pub voter_last_name: String,
    pub property_title: String,
    pub vote_option_name: String,
}
