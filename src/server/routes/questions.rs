use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{app::AppState, error::ApiError},
    telemetry::CRUD_CNTR,
};

use super::{ApiResponse, Deleted};

#[derive(Deserialize)]
struct NewQuestion {
    question_text: String,
    answer_text: String,
    #[serde(default)]
    category_id: Option<i64>,
}

#[derive(Deserialize)]
struct QuestionUpdate {
    question_text: Option<String>,
    answer_text: Option<String>,
    category_id: Option<i64>,
}

#[derive(Deserialize)]
struct QuestionsQuery {
    category_id: Option<i64>,
}

fn constraint_error(err: sqlx::Error, question_text: &str, category_id: Option<i64>) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict(format!("Question '{question_text}' already exists"))
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => match category_id {
            Some(id) => ApiError::Conflict(format!("Category with id {id} does not exist")),
            None => ApiError::Database(err),
        },
        _ => ApiError::Database(err),
    }
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(QuestionsQuery { category_id }): Query<QuestionsQuery>,
) -> ApiResponse<Json<Vec<Question>>> {
    let questions = match category_id {
        Some(id) => questions::get_questions_for_category(&pool, id).await?,
        None => questions::get_all_questions(&pool).await?,
    };
    Ok(Json(questions))
}

async fn question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<Question>> {
    let q = questions::get_question(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Question", id))?;
    Ok(Json(q))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    Json(new_question): Json<NewQuestion>,
) -> ApiResponse<(StatusCode, Json<Question>)> {
    let question = questions::create_question(
        &pool,
        &new_question.question_text,
        &new_question.answer_text,
        new_question.category_id,
    )
    .await
    .map_err(|e| constraint_error(e, &new_question.question_text, new_question.category_id))?;
    CRUD_CNTR.with_label_values(&["question", "create"]).inc();

    Ok((StatusCode::CREATED, Json(question)))
}

async fn update_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(update): Json<QuestionUpdate>,
) -> ApiResponse<Json<Question>> {
    let mut question = questions::get_question(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Question", id))?;

    if let Some(question_text) = update.question_text {
        question.question_text = question_text;
    }
    if let Some(answer_text) = update.answer_text {
        question.answer_text = answer_text;
    }
    if let Some(category_id) = update.category_id {
        question.category_id = Some(category_id);
    }

    questions::update_question(&pool, &question)
        .await
        .map_err(|e| constraint_error(e, &question.question_text, question.category_id))?;
    CRUD_CNTR.with_label_values(&["question", "update"]).inc();

    Ok(Json(question))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<Deleted>> {
    let affected = questions::delete_question(&pool, id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("Question", id));
    }
    CRUD_CNTR.with_label_values(&["question", "delete"]).inc();

    Ok(Json(Deleted { id, deleted: true }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route(
            "/questions/{id}",
            get(question).patch(update_question).delete(delete_question),
        )
        .with_state(state)
}
