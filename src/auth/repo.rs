use crate::auth::repo_types::{PublicUser, User, PUBLIC_USER_COLUMNS};
use sqlx::PgPool;

pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone_number: Option<&'a str>,
}

impl User {
    /// Find a user (with credential) by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, password_hash, phone_number,
                   firebase_uid, profile_picture, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn email_exists(db: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(db)
            .await
    }

    /// Insert a new user. The unique index on `email` is the final guard
    /// against concurrent registrations.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> Result<PublicUser, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, phone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PUBLIC_USER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, PublicUser>(&sql)
            .bind(new.first_name)
            .bind(new.last_name)
            .bind(new.email)
            .bind(new.password_hash)
            .bind(new.phone_number)
            .fetch_one(db)
            .await
    }
}
