use sqlx::PgPool;

use crate::auth::repo_types::{PublicUser, PUBLIC_USER_COLUMNS};

pub struct ProfileUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: Option<&'a str>,
    pub profile_picture: Option<&'a str>,
}

impl PublicUser {
    pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<PublicUser>, sqlx::Error> {
        let sql = format!("SELECT {PUBLIC_USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, PublicUser>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Overwrites every profile column and bumps `updated_at`.
    /// `None` when the row does not exist.
    pub async fn update_profile(
        db: &PgPool,
        id: i32,
        update: ProfileUpdate<'_>,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE users
               SET first_name = $1, last_name = $2, email = $3, phone_number = $4,
                   profile_picture = $5, updated_at = NOW()
             WHERE id = $6
            RETURNING {PUBLIC_USER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, PublicUser>(&sql)
            .bind(update.first_name)
            .bind(update.last_name)
            .bind(update.email)
            .bind(update.phone_number)
            .bind(update.profile_picture)
            .bind(id)
            .fetch_optional(db)
            .await
    }
}
