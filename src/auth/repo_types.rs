use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Full user row, including the credential. Only used for login.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string, never serialized
    pub phone_number: Option<String>,
    pub firebase_uid: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// User fields safe to return to clients.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct PublicUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub firebase_uid: Option<String>,
    pub profile_picture: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            phone_number: u.phone_number,
            firebase_uid: u.firebase_uid,
            profile_picture: u.profile_picture,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Columns selected for [`PublicUser`].
pub const PUBLIC_USER_COLUMNS: &str = "id, first_name, last_name, email, phone_number, \
     firebase_uid, profile_picture, created_at, updated_at";
