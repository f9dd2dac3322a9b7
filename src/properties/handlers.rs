use axum::{extract::State, routing::get, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    catalog::repo_types::VoteOption,
    db::is_foreign_key_violation,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, ApiQuery},
    query::{ListQuery, Page, PageParams},
    response::ApiResponse,
    state::AppState,
};

use super::{
    dto::{PropertyDetails, PropertyListItem, PropertyListParams, PropertyRequest},
    repo::{FILTER_CATEGORY, FILTER_OWNER},
    repo_types::Property,
};

const NOT_FOUND: &str = "Property not found";
const UNKNOWN_CATEGORY: &str = "Category does not exist";

pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(list_properties).post(create_property))
        .route(
            "/api/properties/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
}

#[instrument(skip(state))]
pub async fn list_properties(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PropertyListParams>,
) -> ApiResult<ApiResponse<Vec<PropertyListItem>>> {
    let page = Page::from_params(&PageParams {
        limit: params.limit,
        offset: params.offset,
    })?;
    let filter = ListQuery::new()
        .ilike_opt(FILTER_CATEGORY, params.category)
        .eq_opt(FILTER_OWNER, params.user_id)
        .page(page);

    let rows = Property::list(&state.db, &filter).await?;
    Ok(ApiResponse::list(
        rows.into_iter().map(PropertyListItem::from).collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<PropertyDetails>> {
    let row = Property::find_with_owner(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    let images = Property::images(&state.db, id).await?;
    let vote_options = VoteOption::by_category(&state.db, row.property.category_id).await?;

    Ok(ApiResponse::ok(PropertyDetails::assemble(
        row,
        images,
        vote_options,
    )))
}

#[instrument(skip(state, caller, payload), fields(caller_id = caller.id()))]
pub async fn create_property(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(payload): ApiJson<PropertyRequest>,
) -> ApiResult<ApiResponse<Property>> {
    let input = payload.validate()?;

    let property = Property::create(&state.db, caller.id(), &input)
        .await
        .map_err(unknown_category)?;

    info!(property_id = property.id, "property created");
    Ok(ApiResponse::created(property))
}

#[instrument(skip(state, caller, payload), fields(caller_id = caller.id()))]
pub async fn update_property(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<PropertyRequest>,
) -> ApiResult<ApiResponse<Property>> {
    ensure_owner(&state, id, caller.id(), "Not authorized to update this property").await?;
    let input = payload.validate()?;

    let property = Property::update(&state.db, id, &input)
        .await
        .map_err(unknown_category)?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(property_id = id, "property updated");
    Ok(ApiResponse::ok(property))
}

#[instrument(skip(state, caller), fields(caller_id = caller.id()))]
pub async fn delete_property(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<()>> {
    ensure_owner(&state, id, caller.id(), "Not authorized to delete this property").await?;

    if !Property::delete(&state.db, id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!(property_id = id, "property deleted");
    Ok(ApiResponse::message("Property deleted successfully"))
}

/// 404 when the property is missing, 403 when `caller_id` does not own it.
async fn ensure_owner(
    state: &AppState,
    property_id: i32,
    caller_id: i32,
    forbidden: &'static str,
) -> Result<(), ApiError> {
    let owner = Property::owner_of(&state.db, property_id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    if owner != caller_id {
        warn!(property_id, owner, "property mutation by non-owner");
        return Err(ApiError::forbidden(forbidden));
    }
    Ok(())
}

fn unknown_category(e: sqlx::Error) -> ApiError {
    if is_foreign_key_violation(&e) {
        ApiError::validation(UNKNOWN_CATEGORY)
    } else {
        e.into()
    }
}
