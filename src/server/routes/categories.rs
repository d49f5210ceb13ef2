use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories, Category},
    server::{
        app::AppState,
        error::{conflict_on_unique, ApiError},
    },
    telemetry::CRUD_CNTR,
};

use super::{ApiResponse, Deleted};

#[derive(Deserialize)]
struct NewCategory {
    name: String,
}

#[derive(Deserialize)]
struct CategoryUpdate {
    name: Option<String>,
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    100
}

async fn get_categories(
    State(pool): State<SqlitePool>,
    Query(ListQuery { skip, limit }): Query<ListQuery>,
) -> ApiResponse<Json<Vec<Category>>> {
    let categories = categories::get_categories(&pool, skip, limit).await?;
    Ok(Json(categories))
}

async fn category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<Category>> {
    let c = categories::get_category(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    Ok(Json(c))
}

async fn create_category(
    State(pool): State<SqlitePool>,
    Json(new_category): Json<NewCategory>,
) -> ApiResponse<(StatusCode, Json<Category>)> {
    let category = categories::create_category(&pool, new_category.name.as_str())
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                format!("Category '{}' already exists", new_category.name),
            )
        })?;
    CRUD_CNTR.with_label_values(&["category", "create"]).inc();

    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(update): Json<CategoryUpdate>,
) -> ApiResponse<Json<Category>> {
    let mut category = categories::get_category(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;

    if let Some(name) = update.name {
        category.name = name;
    }

    categories::update_category(&pool, &category)
        .await
        .map_err(|e| {
            conflict_on_unique(e, format!("Category '{}' already exists", category.name))
        })?;
    CRUD_CNTR.with_label_values(&["category", "update"]).inc();

    Ok(Json(category))
}

async fn delete_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<Deleted>> {
    let affected = categories::delete_category(&pool, id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("Category", id));
    }
    CRUD_CNTR.with_label_values(&["category", "delete"]).inc();

    Ok(Json(Deleted { id, deleted: true }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(category).put(update_category).delete(delete_category),
        )
        .with_state(state)
}
