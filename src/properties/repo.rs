use sqlx::PgPool;

use super::repo_types::{Property, PropertyImage, PropertyInput, PropertyListRow, PropertyWithOwner};
use crate::query::ListQuery;

const PROPERTY_COLUMNS: &str = "p.id, p.title, p.description, p.location, p.user_id, \
     p.category_id, p.current_worth, p.year_of_construction, p.created_at, p.updated_at";

const OWNER_COLUMNS: &str = "u.first_name AS owner_first_name, u.last_name AS owner_last_name, \
     u.email AS owner_email, u.phone_number AS owner_phone, c.name AS category_name, \
     (SELECT COUNT(*) FROM votes WHERE property_id = p.id) AS vote_count";

pub const FILTER_CATEGORY: &str = "c.name";
pub const FILTER_OWNER: &str = "p.user_id";

fn list_base() -> String {
    format!(
        r#"
        SELECT {PROPERTY_COLUMNS}, {OWNER_COLUMNS},
               pi.id AS primary_image_id, pi.image_url AS primary_image_url
        FROM properties p
        JOIN users u ON p.user_id = u.id
        JOIN categories c ON p.category_id = c.id
        LEFT JOIN LATERAL (
            SELECT id, image_url FROM property_images
             WHERE property_id = p.id AND is_primary
             ORDER BY id
             LIMIT 1
        ) pi ON TRUE
        "#
    )
}

impl Property {
    pub async fn list(db: &PgPool, filter: &ListQuery) -> Result<Vec<PropertyListRow>, sqlx::Error> {
        filter
            .build(&list_base(), "p.created_at DESC, p.id DESC")
            .build_query_as::<PropertyListRow>()
            .fetch_all(db)
            .await
    }

    pub async fn find_with_owner(
        db: &PgPool,
        id: i32,
    ) -> Result<Option<PropertyWithOwner>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {PROPERTY_COLUMNS}, {OWNER_COLUMNS}
            FROM properties p
            JOIN users u ON p.user_id = u.id
            JOIN categories c ON p.category_id = c.id
            WHERE p.id = $1
            "#
        );
        sqlx::query_as::<_, PropertyWithOwner>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Images of a property, primary first.
    pub async fn images(db: &PgPool, property_id: i32) -> Result<Vec<PropertyImage>, sqlx::Error> {
        sqlx::query_as::<_, PropertyImage>(
            r#"
            SELECT id, image_url, is_primary
              FROM property_images
             WHERE property_id = $1
             ORDER BY is_primary DESC, id ASC
            "#,
        )
        .bind(property_id)
        .fetch_all(db)
        .await
    }

    /// Owner id of a property, `None` when the property does not exist.
    pub async fn owner_of(db: &PgPool, id: i32) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT user_id FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn exists(db: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM properties WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
    }

    pub async fn create(
        db: &PgPool,
        owner_id: i32,
        input: &PropertyInput<'_>,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties
                (title, description, location, user_id, category_id, current_worth, year_of_construction)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, location, user_id, category_id,
                      current_worth, year_of_construction, created_at, updated_at
            "#,
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.location)
        .bind(owner_id)
        .bind(input.category_id)
        .bind(input.current_worth)
        .bind(input.year_of_construction)
        .fetch_one(db)
        .await
    }

    /// Overwrites every mutable column and bumps `updated_at`.
    pub async fn update(
        db: &PgPool,
        id: i32,
        input: &PropertyInput<'_>,
    ) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
               SET title = $1, description = $2, location = $3, category_id = $4,
                   current_worth = $5, year_of_construction = $6, updated_at = NOW()
             WHERE id = $7
            RETURNING id, title, description, location, user_id, category_id,
                      current_worth, year_of_construction, created_at, updated_at
            "#,
        )
        .bind(input.title)
        .bind(input.description)
        .bind(input.location)
        .bind(input.category_id)
        .bind(input.current_worth)
        .bind(input.year_of_construction)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Images and votes go with it (`ON DELETE CASCADE`).
    pub async fn delete(db: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
