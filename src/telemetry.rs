use prometheus::{register_int_counter, register_int_counter_vec};
use prometheus::{IntCounter, IntCounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

/// Used when `LOG_LEVEL` is unset or unparsable. Keeps sqlx statement logs out.
const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "trivia_quiz_questions_served_total",
        "Number of questions handed out to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref QUIZZES_COMPLETED: IntCounterVec = register_int_counter_vec!(
        "trivia_quizzes_completed_total",
        "Number of quiz rounds that ran out of questions",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED: IntCounter = register_int_counter!(
        "trivia_questions_created_total",
        "Number of questions created through the API"
    )
    .unwrap();
    pub static ref QUESTIONS_DELETED: IntCounter = register_int_counter!(
        "trivia_questions_deleted_total",
        "Number of questions deleted through the API"
    )
    .unwrap();
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. Span enter/exit events are logged when
/// `INCLUDE_SPAN_EVENTS=true`.
pub fn init_tracing() {
    let span_events = match std::env::var("INCLUDE_SPAN_EVENTS") {
        Ok(value) if value.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    };

    let installed = tracing_subscriber::registry()
        .with(log_filter())
        .with(fmt::layer().with_span_events(span_events))
        .try_init();
    if let Err(err) = installed {
        tracing::warn!("Tracing already initialised: {err}");
    }
}
