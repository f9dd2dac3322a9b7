use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Prospect row joined with its category name.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct ProspectProperty {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category_id: i32,
    pub estimated_worth: Option<f64>,
    pub year_of_construction: Option<i32>,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProspect<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub category_id: i32,
    pub estimated_worth: Option<f64>,
    pub year_of_construction: Option<i32>,
    pub image_url: Option<&'a str>,
}
