use axum::{extract::State, routing::get, Router};
use tracing::instrument;

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiPath,
    properties::repo_types::Property,
    response::ApiResponse,
    state::AppState,
};

use super::{
    repo,
    report::{tally, PlatformStats, PropertyStats},
};

const RECENT_ACTIVITY_LIMIT: i64 = 5;

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/api/properties/:id/stats", get(property_stats))
        .route("/api/stats/platform", get(platform_stats))
}

#[instrument(skip(state))]
pub async fn property_stats(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<PropertyStats>> {
    if !Property::exists(&state.db, id).await? {
        return Err(ApiError::not_found("Property not found"));
    }
    let counts = repo::option_counts(&state.db, id).await?;
    Ok(ApiResponse::ok(tally(counts)))
}

#[instrument(skip(state))]
pub async fn platform_stats(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<PlatformStats>> {
    let counts = repo::platform_counts(&state.db).await?;
    let recent = repo::recent_properties(&state.db, RECENT_ACTIVITY_LIMIT).await?;
    Ok(ApiResponse::ok(PlatformStats::new(counts, recent)))
}
