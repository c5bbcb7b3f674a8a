mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;

use super::error::ApiError;
use crate::db::Category;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

/// Category listings go out as `{"<id>": "<type>"}`.
pub type CategoryMap = BTreeMap<i64, String>;

fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
