use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::{Question, TriviaStore};
use crate::pagination::paginate;
use crate::server::{app::AppState, error::ApiError, extractors::Page};

use super::{category_map, ApiResponse, CategoryMap};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: CategoryMap,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_results: usize,
    current_category: i64,
}

async fn get_categories(
    State(store): State<Arc<dyn TriviaStore>>,
) -> ApiResponse<CategoriesResponse> {
    let categories = store.list_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories: category_map(categories),
    }))
}

async fn questions_for_category(
    State(store): State<Arc<dyn TriviaStore>>,
    id: Result<Path<i64>, PathRejection>,
    Page(page): Page,
) -> ApiResponse<CategoryQuestionsResponse> {
    let Path(id) = id?;
    let category = store.get_category(id).await?.ok_or(ApiError::NotFound)?;
    let questions = store.questions_in_category(category.id).await?;
    let current = paginate(&questions, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: current.to_vec(),
        total_results: questions.len(),
        current_category: category.id,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}
