use axum::body::Body;
use axum::extract::{FromRef, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::{routing::get, Json, Router};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes::{category_router, questions_router};
use crate::settings::Settings;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub static_dir: PathBuf,
    pub database_url: String,
}

pub async fn run_server(pool: SqlitePool, settings: Settings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.host, settings.port);
    let state = AppState {
        pool,
        static_dir: settings.static_dir.clone(),
        database_url: format!("sqlite:{}", settings.database_path),
    };

    let app = app_router(state);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(state.static_dir.clone()))
        .with_state(state.clone())
        .merge(category_router(state.clone()))
        .merge(questions_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            StatusCode::NOT_FOUND
        })
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Welcome to Interview Prep App!" }))
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
    database_url: String,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        database_url: state.database_url.clone(),
    })
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).unwrap();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .unwrap()
}
