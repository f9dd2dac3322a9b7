use axum::{
    extract::State,
    routing::get,
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    db::is_foreign_key_violation,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath, ApiQuery},
    query::ListQuery,
    response::ApiResponse,
    state::AppState,
};

use super::{
    dto::{CastVoteRequest, VoteListParams, VoteView},
    repo::{FILTER_PROPERTY, FILTER_USER},
    repo_types::Vote,
};

pub const ALREADY_VOTED: &str = "You have already voted for this property";

pub fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/api/votes", get(list_votes).post(cast_vote))
        .route("/api/votes/property/:property_id", get(votes_for_property))
}

#[instrument(skip(state, _caller))]
pub async fn list_votes(
    State(state): State<AppState>,
    _caller: AuthUser,
    ApiQuery(params): ApiQuery<VoteListParams>,
) -> ApiResult<ApiResponse<Vec<VoteView>>> {
    let filter = ListQuery::new()
        .eq_opt(FILTER_USER, params.user_id)
        .eq_opt(FILTER_PROPERTY, params.property_id);
    let rows = Vote::list(&state.db, &filter).await?;
    Ok(ApiResponse::list(rows.into_iter().map(VoteView::from).collect()))
}

#[instrument(skip(state, _caller))]
pub async fn votes_for_property(
    State(state): State<AppState>,
    _caller: AuthUser,
    ApiPath(property_id): ApiPath<i32>,
) -> ApiResult<ApiResponse<Vec<VoteView>>> {
    let filter = ListQuery::new().eq_opt(FILTER_PROPERTY, Some(property_id));
    let rows = Vote::list(&state.db, &filter).await?;
    Ok(ApiResponse::list(rows.into_iter().map(VoteView::from).collect()))
}

#[instrument(skip(state, caller), fields(caller_id = caller.id()))]
pub async fn cast_vote(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(payload): ApiJson<CastVoteRequest>,
) -> ApiResult<ApiResponse<Vote>> {
    let (Some(property_id), Some(vote_option_id)) = (payload.property_id, payload.vote_option_id)
    else {
        return Err(ApiError::validation(
            "Please provide property_id and vote_option_id",
        ));
    };

    let vote = Vote::cast(&state.db, caller.id(), property_id, vote_option_id)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::validation("Property or vote option does not exist")
            } else {
                e.into()
            }
        })?;

    let Some(vote) = vote else {
        warn!(property_id, "duplicate vote");
        return Err(ApiError::DuplicateVote(ALREADY_VOTED.into()));
    };

    info!(vote_id = vote.id, property_id, vote_option_id, "vote cast");
    Ok(ApiResponse::created(vote))
}
