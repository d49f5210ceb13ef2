#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use interview_prep_api::db;
use interview_prep_api::server::app::{app_router, AppState};

// A single connection keeps every request on the same in-memory database.
pub async fn spawn_app() -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("failed to parse connection options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");
    db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    app_router(AppState {
        pool,
        static_dir: PathBuf::from("static"),
        database_url: "sqlite::memory:".to_owned(),
    })
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    app.clone().oneshot(request).await.expect("request failed")
}

pub async fn text_body(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

pub async fn json_body(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not json")
}

pub async fn create_category(app: &Router, name: &str) -> serde_json::Value {
    let resp = request(
        app,
        "POST",
        "/categories",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}

pub async fn create_question(
    app: &Router,
    question_text: &str,
    answer_text: &str,
    category_id: Option<i64>,
) -> serde_json::Value {
    let resp = request(
        app,
        "POST",
        "/questions",
        Some(serde_json::json!({
            "question_text": question_text,
            "answer_text": answer_text,
            "category_id": category_id,
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}
