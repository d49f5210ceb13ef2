use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

pub async fn get_categories(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, name
FROM categories
ORDER BY id
LIMIT ?1 OFFSET ?2
        "#,
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, name
FROM categories
WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, name: &str) -> sqlx::Result<Category> {
    let mut conn = pool.acquire().await?;

    sqlx::query_as::<_, Category>(
        r#"
INSERT INTO categories (name) VALUES (?1)
RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await
}

pub async fn update_category(pool: &SqlitePool, category: &Category) -> sqlx::Result<()> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
UPDATE categories SET name = ?1 WHERE categories.id = ?2
        "#,
    )
    .bind(&category.name)
    .bind(category.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn delete_category(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut conn = pool.acquire().await?;

    let result = sqlx::query(
        r#"
DELETE FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}
