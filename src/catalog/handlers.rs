use axum::{extract::State, routing::get, Router};
use tracing::instrument;

use crate::{
    error::ApiResult,
    extract::ApiPath,
    response::ApiResponse,
    state::AppState,
};

use super::repo_types::{Category, VoteOption, VoteOptionRef};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/vote_options", get(list_vote_options))
        .route(
            "/api/vote_options/category/:category_id",
            get(vote_options_by_category),
        )
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<Category>>> {
    Ok(ApiResponse::list(Category::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn list_vote_options(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<VoteOption>>> {
    Ok(ApiResponse::list(VoteOption::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn vote_options_by_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i32>,
) -> ApiResult<ApiResponse<Vec<VoteOptionRef>>> {
    Ok(ApiResponse::list(
        VoteOption::by_category(&state.db, category_id).await?,
    ))
}
