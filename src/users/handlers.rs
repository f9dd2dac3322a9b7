use axum::{extract::State, routing::get, Router};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::required, extractors::AuthUser, repo_types::PublicUser, services::is_valid_email,
    },
    db::is_unique_violation,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    response::ApiResponse,
    state::AppState,
};

use super::repo::ProfileUpdate;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/api/users/:id", get(get_user).put(update_user))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

#[instrument(skip(state, _caller))]
pub async fn get_user(
    State(state): State<AppState>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ApiResponse<PublicUser>> {
    let user = PublicUser::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(ApiResponse::ok(user))
}

#[instrument(skip(state, caller, payload), fields(caller_id = caller.id()))]
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> ApiResult<ApiResponse<PublicUser>> {
    if id != caller.id() {
        warn!(target_id = id, "profile update by non-owner");
        return Err(ApiError::forbidden("Not authorized to update this user"));
    }

    let (Some(first_name), Some(last_name), Some(email)) = (
        required(&payload.first_name),
        required(&payload.last_name),
        required(&payload.email),
    ) else {
        return Err(ApiError::validation("Please enter all required fields"));
    };
    let email = email.to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::validation("Please enter a valid email"));
    }

    let update = ProfileUpdate {
        first_name,
        last_name,
        email: &email,
        phone_number: required(&payload.phone_number),
        profile_picture: required(&payload.profile_picture),
    };

    let user = PublicUser::update_profile(&state.db, id, update)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::validation("Email already in use")
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = user.id, "profile updated");
    Ok(ApiResponse::ok(user))
}
