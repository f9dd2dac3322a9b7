use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Row of the `properties` table.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Property {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub user_id: i32,
    pub category_id: i32,
    pub current_worth: Option<f64>,
    pub year_of_construction: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Property joined with its owner, category and vote count.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyWithOwner {
    #[sqlx(flatten)]
    pub property: Property,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email: String,
    pub owner_phone: Option<String>,
    pub category_name: String,
    pub vote_count: i64,
}

/// Listing row: [`PropertyWithOwner`] plus the primary image, if any.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyListRow {
    #[sqlx(flatten)]
    pub base: PropertyWithOwner,
    pub primary_image_id: Option<i32>,
    pub primary_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct PropertyImage {
    pub id: i32,
    pub image_url: String,
    pub is_primary: bool,
}

/// Validated values for inserting or overwriting a property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub category_id: i32,
    pub current_worth: Option<f64>,
    pub year_of_construction: Option<i32>,
}
