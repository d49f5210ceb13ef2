mod categories;
mod questions;

pub use categories::category_router;
pub use questions::questions_router;

use serde::Serialize;

use super::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Serialize)]
pub(crate) struct Deleted {
    pub id: i64,
    pub deleted: bool,
}
