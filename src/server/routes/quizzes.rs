use axum::{extract::State, routing::post, Json, Router};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_unseen_questions, Question},
    server::{app::AppState, deserializers::CategoryRef},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{ApiError, ApiJson, ApiResponse};

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    quiz_category: Option<Value>,
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
}

#[derive(Serialize)]
struct NextQuestion {
    success: bool,
    question: Option<Question>,
}

impl QuizRequest {
    fn category(&self) -> Option<i64> {
        let value = self.quiz_category.as_ref().filter(|v| !v.is_null())?;
        CategoryRef::deserialize(value).ok().map(|c| c.id())
    }
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<NextQuestion>> {
    let Some(category) = request.category() else {
        tracing::info!("quiz request without a usable quiz_category");
        return Err(ApiError::Unprocessable);
    };
    let seen = request.previous_questions.unwrap_or_default();

    let eligible = get_unseen_questions(&pool, category, &seen).await?;
    let question = eligible.choose(&mut rand::rng()).cloned();
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[category.to_string().as_str()])
                .inc();
            tracing::debug!(category, id = q.id, eligible = eligible.len(), "next quiz question");
        }
        None => tracing::debug!(category, seen = seen.len(), "quiz category exhausted"),
    }

    Ok(Json(NextQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
