use std::sync::Arc;

use anyhow::Context;
use trivia::db::{self, SqliteStore};
use trivia::server::run_server;
use trivia::settings::Settings;
use trivia::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load().context("Failed to load settings")?;
    let pool = db::establish_connection(&settings.database_url)
        .await
        .with_context(|| format!("Cannot connect to {}", settings.database_url))?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    run_server(Arc::new(SqliteStore::new(pool)), &settings.addr()).await
}
