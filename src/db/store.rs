use async_trait::async_trait;
use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question, QuestionRef};

/// Data access the HTTP handlers depend on.
///
/// Handlers only ever see this trait, so the backing database can be swapped
/// without touching request handling.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    async fn list_categories(&self) -> sqlx::Result<Vec<Category>>;

    async fn get_category(&self, id: i64) -> sqlx::Result<Option<Category>>;

    /// All questions ordered by id.
    async fn list_questions(&self) -> sqlx::Result<Vec<Question>>;

    async fn questions_in_category(&self, category: i64) -> sqlx::Result<Vec<Question>>;

    /// Questions whose text contains `term`, ignoring case.
    async fn search_questions(&self, term: &str) -> sqlx::Result<Vec<Question>>;

    async fn question_refs(&self) -> sqlx::Result<Vec<QuestionRef>>;

    async fn get_question(&self, id: i64) -> sqlx::Result<Option<Question>>;

    /// Returns the id assigned to the new question.
    async fn insert_question(&self, question: NewQuestion) -> sqlx::Result<i64>;

    /// Returns `false` when no question had this id.
    async fn delete_question(&self, id: i64) -> sqlx::Result<bool>;
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TriviaStore for SqliteStore {
    async fn list_categories(&self) -> sqlx::Result<Vec<Category>> {
        categories::get_all_categories(&self.pool).await
    }

    async fn get_category(&self, id: i64) -> sqlx::Result<Option<Category>> {
        categories::get_category(&self.pool, id).await
    }

    async fn list_questions(&self) -> sqlx::Result<Vec<Question>> {
        questions::get_all_questions(&self.pool).await
    }

    async fn questions_in_category(&self, category: i64) -> sqlx::Result<Vec<Question>> {
        questions::get_questions_for_category(&self.pool, category).await
    }

    async fn search_questions(&self, term: &str) -> sqlx::Result<Vec<Question>> {
        questions::search_questions(&self.pool, term).await
    }

    async fn question_refs(&self) -> sqlx::Result<Vec<QuestionRef>> {
        questions::get_question_refs(&self.pool).await
    }

    async fn get_question(&self, id: i64) -> sqlx::Result<Option<Question>> {
        questions::get_question(&self.pool, id).await
    }

    async fn insert_question(&self, question: NewQuestion) -> sqlx::Result<i64> {
        questions::create_question(&self.pool, &question).await
    }

    async fn delete_question(&self, id: i64) -> sqlx::Result<bool> {
        questions::delete_question(&self.pool, id).await
    }
}
