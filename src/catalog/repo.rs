use sqlx::PgPool;

use super::repo_types::{Category, VoteOption, VoteOptionRef};

impl Category {
    pub async fn list(db: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(db)
            .await
    }
}

impl VoteOption {
    pub async fn list(db: &PgPool) -> Result<Vec<VoteOption>, sqlx::Error> {
        sqlx::query_as::<_, VoteOption>(
            r#"
            SELECT vo.id, vo.name, vo.category_id, c.name AS category_name
              FROM vote_options vo
              JOIN categories c ON vo.category_id = c.id
             ORDER BY vo.name, vo.id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn by_category(
        db: &PgPool,
        category_id: i32,
    ) -> Result<Vec<VoteOptionRef>, sqlx::Error> {
        sqlx::query_as::<_, VoteOptionRef>(
            "SELECT id, name FROM vote_options WHERE category_id = $1 ORDER BY name, id",
        )
        .bind(category_id)
        .fetch_all(db)
        .await
    }
}
