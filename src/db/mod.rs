pub mod queries;
mod store;

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question, QuestionRef};
pub use store::{SqliteStore, TriviaStore};

pub async fn establish_connection(url: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new().connect_with(options).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Replaces the stored dataset with the given rows.
///
/// Rows are upserted by id and rows missing from the input are removed. Runs in
/// a single transaction so a failing row leaves the database untouched.
pub async fn import(
    pool: &SqlitePool,
    categories: Vec<Category>,
    questions: Vec<Question>,
) -> Result<(), Error> {
    let mut tx = pool.begin().await?;
    queries::categories::upsert_categories(&mut tx, &categories).await?;
    queries::questions::import_questions(&mut tx, &questions).await?;
    let keep: Vec<i64> = categories.iter().map(|c| c.id).collect();
    queries::categories::delete_categories_except(&mut tx, &keep).await?;
    tx.commit().await
}
