use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUESTIONS_CREATED: IntCounter = register_int_counter!(
        "trivia_questions_created_total",
        "Number of questions created through the API"
    )
    .expect("questions created counter registers once");
    pub static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "trivia_quiz_questions_served_total",
        "Number of quiz questions handed out",
        &["category"]
    )
    .expect("quiz questions counter registers once");
}

/// Installs the global subscriber. `LOG_LEVEL` overrides `default_directives`,
/// `INCLUDE_SPAN_EVENTS=true` adds span enter/exit lines.
pub fn init_tracing(default_directives: &str) {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    let span_events = match std::env::var("INCLUDE_SPAN_EVENTS") {
        Ok(flag) if flag.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_span_events(span_events));
    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already installed");
    }
}

/// Forces counter registration so `/metrics` lists them before first use.
pub fn register_metrics() {
    lazy_static::initialize(&QUESTIONS_CREATED);
    lazy_static::initialize(&QUIZ_QUESTIONS_SERVED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_the_first_subscriber() {
        init_tracing("debug");
        init_tracing("info");
        tracing::info!("still logging");
    }
}
