use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use thiserror::Error;
use tracing::warn;

use super::{jwt::JwtKeys, repo_types::PublicUser};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token failed verification")]
    InvalidToken,
    #[error("user {0} referenced by token no longer exists")]
    UserNotFound(i32),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Resolves a bearer token to the public profile of the user it names.
///
/// Performs exactly one read against the database, and only after the token
/// itself has verified.
pub async fn verify_credentials(
    keys: &JwtKeys,
    db: &PgPool,
    token: &str,
) -> Result<PublicUser, CredentialError> {
    if token.is_empty() {
        return Err(CredentialError::InvalidToken);
    }

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        CredentialError::InvalidToken
    })?;

    PublicUser::find_by_id(db, claims.sub)
        .await?
        .ok_or(CredentialError::UserNotFound(claims.sub))
}
