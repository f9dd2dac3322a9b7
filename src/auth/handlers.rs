use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{required, AuthResponse, LoginRequest, MeResponse, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::NewUser,
        repo_types::User,
        services::is_valid_email,
    },
    db::is_unique_violation,
    error::{ApiError, ApiResult},
    extract::ApiJson,
    response::ApiResponse,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
}

const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<ApiResponse<AuthResponse>> {
    let (Some(first_name), Some(last_name), Some(email), Some(password)) = (
        required(&payload.first_name),
        required(&payload.last_name),
        required(&payload.email),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("Please enter all required fields"));
    };

    let email = email.to_lowercase();
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::validation("Please enter a valid email"));
    }

    if User::email_exists(&state.db, &email).await? {
        warn!(email = %email, "email already registered");
        return Err(ApiError::validation(USER_EXISTS));
    }

    let hash = hash_password(password)?;

    let user = User::create(
        &state.db,
        NewUser {
            first_name,
            last_name,
            email: &email,
            password_hash: &hash,
            phone_number: required(&payload.phone_number),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::validation(USER_EXISTS)
        } else {
            e.into()
        }
    })?;

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(ApiResponse::created(AuthResponse { user, token }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthResponse>> {
    let (Some(email), Some(password)) = (
        required(&payload.email),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("Please enter all fields"));
    };
    let email = email.to_lowercase();

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::validation(INVALID_CREDENTIALS));
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::validation(INVALID_CREDENTIALS));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::ok(AuthResponse {
        user: user.into(),
        token,
    }))
}

#[instrument(skip_all, fields(user_id = user.id()))]
pub async fn get_me(user: AuthUser) -> ApiResponse<MeResponse> {
    ApiResponse::ok(MeResponse { user: user.0 })
}
