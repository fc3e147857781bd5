use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{ensure_category, get_all_categories},
            questions::{self, get_questions_for_category},
        },
        Category, Question,
    },
    server::{
        app::AppState,
        deserializers::{deserialize_page, first_page},
        pagination::paginate,
    },
    telemetry::QUESTIONS_CREATED,
};

use super::{ApiError, ApiJson, ApiPath, ApiResponse};

#[derive(Deserialize)]
pub(super) struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

// everything is loosely typed here, missing or mistyped values are caught
// while storing so they end up as 422 rather than 400
#[derive(Deserialize)]
struct NewQuestion {
    question: Option<Value>,
    answer: Option<Value>,
    difficulty: Option<Value>,
}

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: Vec<Category>,
    total_categories: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesList>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesList {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(category_id): ApiPath<i64>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let page = paginate(get_questions_for_category(&pool, category_id).await?, page);
    Ok(Json(CategoryQuestions {
        success: true,
        questions: page.items,
        total_questions: page.total,
        current_category: category_id,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiPath(category_id): ApiPath<i64>,
    ApiJson(new_question): ApiJson<NewQuestion>,
) -> ApiResponse<Json<Created>> {
    let Some(difficulty) = new_question.difficulty.as_ref().filter(|d| !d.is_null()) else {
        tracing::info!(category_id, "question without difficulty");
        return Err(ApiError::Unprocessable);
    };

    let id = store_question(&pool, category_id, &new_question, difficulty)
        .await
        .map_err(|error| {
            tracing::warn!(%error, category_id, "failed to create question");
            ApiError::Unprocessable
        })?;

    QUESTIONS_CREATED.inc();
    tracing::info!(id, category_id, "question created");
    Ok(Json(Created { success: true }))
}

// the category row (if missing) and the question are written in one transaction
async fn store_question(
    pool: &SqlitePool,
    category_id: i64,
    new_question: &NewQuestion,
    difficulty: &Value,
) -> anyhow::Result<i64> {
    let mut tx = pool.begin().await?;

    if ensure_category(&mut *tx, category_id).await? {
        tracing::warn!(
            category_id,
            "created category labelled with its id, rename it to something meaningful"
        );
    }
    let difficulty = difficulty_value(difficulty)?;
    let question = text_value("question", new_question.question.as_ref())?;
    let answer = text_value("answer", new_question.answer.as_ref())?;
    let id = questions::create_question(
        &mut *tx,
        question,
        answer,
        category_id,
        difficulty,
    )
    .await?;

    tx.commit().await?;
    Ok(id)
}

// the column is an integer: accept JSON integers and strings holding one
fn difficulty_value(value: &Value) -> anyhow::Result<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("difficulty {n} is not an integer")),
        Value::String(s) => Ok(s.trim().parse()?),
        other => anyhow::bail!("difficulty {other} is not an integer"),
    }
}

// absent or null text is left for the NOT NULL constraint to reject
fn text_value<'a>(field: &str, value: Option<&'a Value>) -> anyhow::Result<Option<&'a str>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => anyhow::bail!("{field} {other} is not text"),
    }
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route(
            "/categories/{category_id}/questions",
            get(category_questions).post(create_question),
        )
        .with_state(state)
}
