use serde::{Deserialize, Serialize};

use super::{analysis::AiAnalysis, repo_types::{NewProspect, ProspectProperty}};
use crate::{
    auth::dto::required, error::ApiError, properties::dto::listing_fields, query::empty_as_none,
};

#[derive(Debug, Default, Deserialize)]
pub struct ProspectListParams {
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProspectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category_id: Option<i32>,
    pub estimated_worth: Option<f64>,
    pub year_of_construction: Option<i32>,
    pub image_url: Option<String>,
}

impl ProspectRequest {
    pub fn validate(&self) -> Result<NewProspect<'_>, ApiError> {
        let fields = listing_fields(
            &self.title,
            &self.description,
            &self.location,
            self.category_id,
        )?;
        Ok(NewProspect {
            title: fields.title,
            description: fields.description,
            location: fields.location,
            category_id: fields.category_id,
            estimated_worth: self.estimated_worth,
            year_of_construction: self.year_of_construction,
            image_url: required(&self.image_url),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzedProspect {
    #[serde(flatten)]
    pub prospect: ProspectProperty,
    pub ai_analysis: AiAnalysis,
}
