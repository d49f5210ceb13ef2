use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub answer_text: String,
    pub category_id: Option<i64>,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question_text, answer_text, category_id
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question_text, answer_text, category_id
FROM questions
WHERE category_id = ?1
ORDER BY id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question_text, answer_text, category_id
FROM questions
WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_question(
    pool: &SqlitePool,
    question_text: &str,
    answer_text: &str,
    category_id: Option<i64>,
) -> sqlx::Result<Question> {
    let mut conn = pool.acquire().await?;

    sqlx::query_as::<_, Question>(
        r#"
INSERT INTO questions (question_text, answer_text, category_id) VALUES (?1, ?2, ?3)
RETURNING id, question_text, answer_text, category_id
        "#,
    )
    .bind(question_text)
    .bind(answer_text)
    .bind(category_id)
    .fetch_one(&mut *conn)
    .await
}

pub async fn update_question(pool: &SqlitePool, question: &Question) -> sqlx::Result<()> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
UPDATE questions SET question_text = ?1, answer_text = ?2, category_id = ?3
WHERE questions.id = ?4
        "#,
    )
    .bind(&question.question_text)
    .bind(&question.answer_text)
    .bind(question.category_id)
    .bind(question.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut conn = pool.acquire().await?;

    let result = sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::categories;
    use crate::db::queries::test_support::migrated_pool;

    #[tokio::test]
    async fn create_then_fetch_returns_the_same_row() {
        let pool = migrated_pool().await;

        let category = categories::create_category(&pool, "Python").await.unwrap();
        let created = create_question(&pool, "What is a list?", "A sequence.", Some(category.id))
            .await
            .unwrap();
        let fetched = get_question(&pool, created.id).await.unwrap().unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.category_id, Some(category.id));
    }

    #[tokio::test]
    async fn category_filter_returns_only_matching_questions() {
        let pool = migrated_pool().await;

        let python = categories::create_category(&pool, "Python").await.unwrap();
        let rust = categories::create_category(&pool, "Rust").await.unwrap();
        create_question(&pool, "What is a list?", "A sequence.", Some(python.id))
            .await
            .unwrap();
        create_question(&pool, "What is a Vec?", "A growable array.", Some(rust.id))
            .await
            .unwrap();

        let filtered = get_questions_for_category(&pool, rust.id).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].question_text, "What is a Vec?");

        assert!(get_questions_for_category(&pool, python.id + rust.id + 1)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn deleting_the_category_cascades_to_its_questions() {
        let pool = migrated_pool().await;

        let category = categories::create_category(&pool, "SQL").await.unwrap();
        let question = create_question(&pool, "What is a JOIN?", "A row combinator.", Some(category.id))
            .await
            .unwrap();

        categories::delete_category(&pool, category.id).await.unwrap();

        assert!(get_question(&pool, question.id).await.unwrap().is_none());
        assert!(get_all_questions(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rewrites_the_stored_row() {
        let pool = migrated_pool().await;

        let mut question = create_question(&pool, "What is borrow checking?", "TBD", None)
            .await
            .unwrap();
        question.answer_text = "Compile-time alias analysis.".to_owned();

        update_question(&pool, &question).await.unwrap();

        let fetched = get_question(&pool, question.id).await.unwrap().unwrap();
        assert_eq!(fetched, question);
    }

    #[tokio::test]
    async fn unknown_category_is_a_foreign_key_violation() {
        let pool = migrated_pool().await;

        let err = create_question(&pool, "Orphan?", "Yes.", Some(42))
            .await
            .unwrap_err();

        match err {
            sqlx::Error::Database(db) => assert!(db.is_foreign_key_violation()),
            other => panic!("expected a database error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_text_is_a_unique_violation_regardless_of_case() {
        let pool = migrated_pool().await;

        create_question(&pool, "What is a trait?", "An interface.", None)
            .await
            .unwrap();
        let err = create_question(&pool, "WHAT IS A TRAIT?", "Shouting.", None)
            .await
            .unwrap_err();

        match err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("expected a database error, got {other:?}"),
        }
    }
}
