use axum::{extract::State, routing::get, Router};
use tracing::{debug, info, instrument};

use crate::{
    auth::extractors::AuthUser,
    db::is_foreign_key_violation,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, ApiQuery},
    query::{ListQuery, Page, PageParams},
    response::ApiResponse,
    state::AppState,
};

use super::{
    dto::{AnalyzedProspect, ProspectListParams, ProspectRequest},
    repo::FILTER_CATEGORY,
    repo_types::ProspectProperty,
};

pub fn prospect_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/prospect_properties",
            get(list_prospects).post(create_prospect),
        )
        .route("/api/prospect_properties/:id", get(get_prospect))
}

#[instrument(skip(state))]
pub async fn list_prospects(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProspectListParams>,
) -> ApiResult<ApiResponse<Vec<ProspectProperty>>> {
    let page = Page::from_params(&PageParams {
        limit: params.limit,
        offset: params.offset,
    })?;
    let filter = ListQuery::new()
        .ilike_opt(FILTER_CATEGORY, params.category)
        .page(page);

    Ok(ApiResponse::list(
        ProspectProperty::list(&state.db, &filter).await?,
    ))
}

#[instrument(skip(state, caller), fields(caller_id = caller.id()))]
pub async fn get_prospect(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<AnalyzedProspect>> {
    let prospect = ProspectProperty::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Prospect property not found"))?;

    let ai_analysis = state.analyzer.analyze(&prospect);
    debug!(prospect_id = id, sentiment = ?ai_analysis.overall_sentiment, "analysis generated");

    Ok(ApiResponse::ok(AnalyzedProspect {
        prospect,
        ai_analysis,
    }))
}

#[instrument(skip(state, caller, payload), fields(caller_id = caller.id()))]
pub async fn create_prospect(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(payload): ApiJson<ProspectRequest>,
) -> ApiResult<ApiResponse<ProspectProperty>> {
    let new = payload.validate()?;

    let prospect = ProspectProperty::create(&state.db, &new)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::validation("Category does not exist")
            } else {
                e.into()
            }
        })?;

    info!(prospect_id = prospect.id, "prospect property created");
    Ok(ApiResponse::created(prospect))
}
