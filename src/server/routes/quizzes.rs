use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{Question, QuestionRef, TriviaStore};
use crate::quiz::{select_next, QuizScope};
use crate::server::{app::AppState, deserializers::Lenient, error::ApiError};
use crate::telemetry::{QUIZZES_COMPLETED, QUIZ_QUESTIONS_SERVED};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizBody {
    previous_questions: Option<Lenient<Vec<i64>>>,
    category: Option<Lenient<i64>>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    /// Absent once every question in scope has been played.
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn play_quiz(
    State(store): State<Arc<dyn TriviaStore>>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<QuizResponse> {
    let Json(body) = body?;
    let (Some(previous), Some(category)) = (body.previous_questions, body.category) else {
        return Err(ApiError::BadRequest);
    };
    let previous: HashSet<i64> = previous
        .valid()
        .ok_or(ApiError::Unprocessable)?
        .into_iter()
        .collect();
    let scope = QuizScope::from(category.integer().ok_or(ApiError::Unprocessable)?);

    let pool = store
        .question_refs()
        .await
        .map_err(ApiError::unprocessable)?;
    let next = {
        let mut rng = rand::thread_rng();
        select_next(&pool, scope, &previous, &mut rng)
    };
    let label = metric_label(scope, &pool);
    let Some(next) = next else {
        tracing::debug!(scope = %scope.label(), played = previous.len(), "Quiz complete");
        QUIZZES_COMPLETED.with_label_values(&[label.as_str()]).inc();
        return Ok(Json(QuizResponse {
            success: true,
            question: None,
        }));
    };

    let question = store
        .get_question(next)
        .await
        .map_err(ApiError::unprocessable)?
        .ok_or(ApiError::NotFound)?;
    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[label.as_str()])
        .inc();
    Ok(Json(QuizResponse {
        success: true,
        question: Some(question),
    }))
}

// Only categories that hold questions get their own series, so the label set
// stays bounded no matter what clients send.
fn metric_label(scope: QuizScope, pool: &[QuestionRef]) -> String {
    if pool.iter().any(|q| scope.contains(q)) {
        scope.label()
    } else {
        "unknown".to_owned()
    }
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .route("/quiz", post(play_quiz))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axum::http::StatusCode;
    use serde_json::json;

    use super::metric_label;
    use crate::db::QuestionRef;
    use crate::quiz::QuizScope;
    use crate::server::routes::test_client::{app, get_text, post_empty, post_json};

    #[tokio::test]
    async fn serves_unplayed_question() {
        let app = app().await;
        let previous = [6, 10, 11, 19];
        for _ in 0..20 {
            let (status, body) = post_json(
                &app,
                "/quizzes",
                json!({"previous_questions": previous, "category": 0}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], true);
            let id = body["question"]["id"].as_i64().unwrap();
            assert!(!previous.contains(&id));
        }
    }

    #[tokio::test]
    async fn category_round_stays_in_category() {
        let app = app().await;
        for _ in 0..20 {
            let (_, body) = post_json(
                &app,
                "/quiz",
                json!({"previous_questions": [], "category": 3}),
            )
            .await;
            assert_eq!(body["question"]["category"], 3);
        }
    }

    #[tokio::test]
    async fn round_runs_until_complete() {
        let app = app().await;
        let mut played: Vec<i64> = Vec::new();
        loop {
            let (status, body) = post_json(
                &app,
                "/quizzes",
                json!({"previous_questions": played, "category": 2}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            match body["question"]["id"].as_i64() {
                Some(id) => played.push(id),
                None => {
                    assert_eq!(body, json!({"success": true}));
                    break;
                }
            }
        }
        let played: HashSet<i64> = played.into_iter().collect();
        assert_eq!(played, HashSet::from([16, 17, 18, 19]));
    }

    #[tokio::test]
    async fn unknown_categories_share_one_metric_series() {
        let app = app().await;
        for category in 1000..1010 {
            let (status, body) = post_json(
                &app,
                "/quizzes",
                json!({"previous_questions": [], "category": category}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"success": true}));
        }
        let (status, text) = get_text(&app, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("trivia_quizzes_completed_total{category=\"unknown\"}"));
        assert!(!text.contains("category=\"1000\""));
        assert!(!text.contains("category=\"1009\""));
    }

    #[test]
    fn metric_label_buckets_empty_scopes() {
        let pool = [QuestionRef { id: 16, category: 2 }];
        assert_eq!(metric_label(QuizScope::All, &pool), "all");
        assert_eq!(metric_label(QuizScope::Category(2), &pool), "2");
        assert_eq!(metric_label(QuizScope::Category(7), &pool), "unknown");
        assert_eq!(metric_label(QuizScope::All, &[]), "unknown");
    }

    #[tokio::test]
    async fn missing_fields_are_bad_request() {
        let app = app().await;
        let (status, body) = post_empty(&app, "/quiz").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "bad request");

        let (status, _) =
            post_json(&app, "/quizzes", json!({"previous_questions": [1]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_history_is_unprocessable() {
        let app = app().await;
        let (status, body) = post_json(
            &app,
            "/quiz",
            json!({"previous_questions": 16, "category": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "request cannot be processed");
    }
}
