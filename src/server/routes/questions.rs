use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{NewQuestion, Question, TriviaStore};
use crate::pagination::paginate;
use crate::server::{
    app::AppState, deserializers::Lenient, error::ApiError, extractors::Page,
};
use crate::telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED};

use super::{category_map, ApiResponse, CategoryMap};

#[derive(Deserialize)]
struct NewQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    category: Option<Lenient<i64>>,
    difficulty: Option<Lenient<i64>>,
}

impl NewQuestionBody {
    /// Missing or blank fields are a bad request, values of the wrong shape
    /// cannot be processed.
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let (Some(question), Some(answer), Some(category), Some(difficulty)) =
            (self.question, self.answer, self.category, self.difficulty)
        else {
            return Err(ApiError::BadRequest);
        };
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(ApiError::BadRequest);
        }
        let category = category.integer().ok_or(ApiError::Unprocessable)?;
        let difficulty = difficulty
            .integer()
            .filter(|d| *d >= 1)
            .ok_or(ApiError::Unprocessable)?;
        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryMap,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct QuestionResponse {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_results: usize,
}

async fn list_questions(
    State(store): State<Arc<dyn TriviaStore>>,
    Page(page): Page,
) -> ApiResponse<QuestionsPage> {
    let questions = store.list_questions().await?;
    let current = paginate(&questions, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = store.list_categories().await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn get_question(
    State(store): State<Arc<dyn TriviaStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<QuestionResponse> {
    let Path(id) = id?;
    let question = store.get_question(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(QuestionResponse {
        success: true,
        question,
    }))
}

async fn delete_question(
    State(store): State<Arc<dyn TriviaStore>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Deleted> {
    let Path(id) = id?;
    if store
        .get_question(id)
        .await
        .map_err(ApiError::unprocessable)?
        .is_none()
    {
        return Err(ApiError::NotFound);
    }
    if !store
        .delete_question(id)
        .await
        .map_err(ApiError::unprocessable)?
    {
        return Err(ApiError::NotFound);
    }
    QUESTIONS_DELETED.inc();
    tracing::info!(id, "Question deleted");
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn create_question(
    State(store): State<Arc<dyn TriviaStore>>,
    Page(page): Page,
    body: Result<Json<NewQuestionBody>, JsonRejection>,
) -> ApiResponse<Created> {
    let Json(body) = body?;
    let new_question = body.validate()?;
    let created = store
        .insert_question(new_question)
        .await
        .map_err(ApiError::unprocessable)?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id = created, "Question created");

    let questions = store
        .list_questions()
        .await
        .map_err(ApiError::unprocessable)?;
    Ok(Json(Created {
        success: true,
        created,
        questions: paginate(&questions, page).to_vec(),
        total_questions: questions.len(),
    }))
}

async fn search_questions(
    State(store): State<Arc<dyn TriviaStore>>,
    Page(page): Page,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResults> {
    let Json(body) = body?;
    let term = body.search_term.ok_or(ApiError::BadRequest)?;
    let results = store.search_questions(&term).await?;
    let current = paginate(&results, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResults {
        success: true,
        questions: current.to_vec(),
        total_results: results.len(),
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route(
            "/questions/{id}",
            get(get_question).delete(delete_question),
        )
}
