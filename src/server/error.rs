use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{entity} with id {id} not found"))
    }
}

/// Translate a storage-level unique violation into a `Conflict` carrying
/// `detail`; anything else stays a database error.
pub fn conflict_on_unique(err: sqlx::Error, detail: String) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::Conflict(detail),
        _ => ApiError::Database(err),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Conflict(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Database(err) => {
                tracing::error!("Database failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
