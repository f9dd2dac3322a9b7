use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Vote option with the name of the category it belongs to.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct VoteOption {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub category_name: String,
}

/// `{ id, name }` as embedded in property details and per-category listings.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct VoteOptionRef {
    pub id: i32,
    pub name: String,
}
