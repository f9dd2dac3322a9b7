use sqlx::PgPool;

use super::repo_types::{NewProspect, ProspectProperty};
use crate::query::ListQuery;

pub const FILTER_CATEGORY: &str = "c.name";

const LIST_BASE: &str = r#"
    SELECT pp.id, pp.title, pp.description, pp.location, pp.category_id,
           pp.estimated_worth, pp.year_of_construction, pp.image_url,
           pp.created_at, pp.updated_at, c.name AS category_name
    FROM prospect_properties pp
    JOIN categories c ON pp.category_id = c.id
"#;

impl ProspectProperty {
    pub async fn list(db: &PgPool, filter: &ListQuery) -> Result<Vec<ProspectProperty>, sqlx::Error> {
        filter
            .build(LIST_BASE, "pp.created_at DESC, pp.id DESC")
            .build_query_as::<ProspectProperty>()
            .fetch_all(db)
            .await
    }

    pub async fn find(db: &PgPool, id: i32) -> Result<Option<ProspectProperty>, sqlx::Error> {
        let sql = format!("{LIST_BASE} WHERE pp.id = $1");
        sqlx::query_as::<_, ProspectProperty>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn create(db: &PgPool, new: &NewProspect<'_>) -> Result<ProspectProperty, sqlx::Error> {
        sqlx::query_as::<_, ProspectProperty>(
            r#"
            WITH ins AS (
                INSERT INTO prospect_properties
                    (title, description, location, category_id, estimated_worth, year_of_construction, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT ins.id, ins.title, ins.description, ins.location, ins.category_id,
                   ins.estimated_worth, ins.year_of_construction, ins.image_url,
                   ins.created_at, ins.updated_at, c.name AS category_name
              FROM ins
              JOIN categories c ON ins.category_id = c.id
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.location)
        .bind(new.category_id)
        .bind(new.estimated_worth)
        .bind(new.year_of_construction)
        .bind(new.image_url)
        .fetch_one(db)
        .await
    }
}
