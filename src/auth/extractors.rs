use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::{
    jwt::JwtKeys,
    repo_types::PublicUser,
    services::{verify_credentials, CredentialError},
};
use crate::{error::ApiError, state::AppState};

pub const NO_TOKEN: &str = "Not authorized, no token";
pub const TOKEN_FAILED: &str = "Not authorized, token failed";
pub const USER_NOT_FOUND: &str = "Not authorized, user not found";

/// Authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing or malformed, when the token
/// fails verification, or when its user no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

impl AuthUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }
}

/// Extracts the token from an `Authorization` header value.
/// Anything other than `Bearer <non-empty token>` yields `None`.
pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::unauthorized(NO_TOKEN))?;

        let keys = JwtKeys::from_ref(&state);
        match verify_credentials(&keys, &state.db, token).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(CredentialError::InvalidToken) => Err(ApiError::unauthorized(TOKEN_FAILED)),
            Err(CredentialError::UserNotFound(user_id)) => {
                warn!(user_id, "token for missing user");
                Err(ApiError::unauthorized(USER_NOT_FOUND))
            }
            Err(CredentialError::Database(e)) => Err(e.into()),
        }
    }
}
