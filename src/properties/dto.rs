use serde::{Deserialize, Serialize};

use super::repo_types::{Property, PropertyImage, PropertyInput, PropertyListRow, PropertyWithOwner};
use crate::{
    auth::dto::required, catalog::repo_types::VoteOptionRef, error::ApiError, query::empty_as_none,
};

pub const MISSING_FIELDS: &str = "Please include all required fields";

/// Query string of `GET /api/properties`.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyListParams {
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
}

/// Body of property create and update.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category_id: Option<i32>,
    pub current_worth: Option<f64>,
    pub year_of_construction: Option<i32>,
}

/// Title, description, location and category shared by every listing kind.
pub struct ListingFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub category_id: i32,
}

pub fn listing_fields<'a>(
    title: &'a Option<String>,
    description: &'a Option<String>,
    location: &'a Option<String>,
    category_id: Option<i32>,
) -> Result<ListingFields<'a>, ApiError> {
    match (
        required(title),
        required(description),
        required(location),
        category_id,
    ) {
        (Some(title), Some(description), Some(location), Some(category_id)) => Ok(ListingFields {
            title,
            description,
            location,
            category_id,
        }),
        _ => Err(ApiError::validation(MISSING_FIELDS)),
    }
}

impl PropertyRequest {
    pub fn validate(&self) -> Result<PropertyInput<'_>, ApiError> {
        let fields = listing_fields(
            &self.title,
            &self.description,
            &self.location,
            self.category_id,
        )?;
        Ok(PropertyInput {
            title: fields.title,
            description: fields.description,
            location: fields.location,
            category_id: fields.category_id,
            current_worth: self.current_worth,
            year_of_construction: self.year_of_construction,
        })
    }
}

/// Image as shown in listings: only the primary one.
#[derive(Debug, Serialize, PartialEq)]
pub struct ListingImage {
    pub id: i32,
    pub image_url: String,
    pub is_primary: bool,
}

#[derive(Debug, Serialize)]
pub struct PropertyListItem {
    #[serde(flatten)]
    pub property: Property,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: Option<String>,
    pub category_name: String,
    pub vote_count: i64,
    pub images: Vec<ListingImage>,
}

impl From<PropertyListRow> for PropertyListItem {
    fn from(row: PropertyListRow) -> Self {
        let images = match (row.primary_image_id, row.primary_image_url) {
            (Some(id), Some(image_url)) => vec![ListingImage {
                id,
                image_url,
                is_primary: true,
            }],
            _ => Vec::new(),
        };
        let b = row.base;
        Self {
            owner_name: full_name(&b.owner_first_name, &b.owner_last_name),
            property: b.property,
            owner_email: b.owner_email,
            owner_phone: b.owner_phone,
            category_name: b.category_name,
            vote_count: b.vote_count,
            images,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyDetails {
    #[serde(flatten)]
    pub property: Property,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: Option<String>,
    pub category_name: String,
    pub vote_count: i64,
    pub images: Vec<PropertyImage>,
    pub vote_options: Vec<VoteOptionRef>,
}

impl PropertyDetails {
    pub fn assemble(
        row: PropertyWithOwner,
        images: Vec<PropertyImage>,
        vote_options: Vec<VoteOptionRef>,
    ) -> Self {
        Self {
            owner_name: full_name(&row.owner_first_name, &row.owner_last_name),
            property: row.property,
            owner_email: row.owner_email,
            owner_phone: row.owner_phone,
            category_name: row.category_name,
            vote_count: row.vote_count,
            images,
            vote_options,
        }
    }
}

pub fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}
