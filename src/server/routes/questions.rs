use axum::{
    extract::{Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::{self, get_all_questions, search_questions},
        },
        Category, Question,
    },
    server::{app::AppState, pagination::paginate},
};

use super::{categories::PageQuery, ApiError, ApiJson, ApiPath, ApiResponse};

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default, rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: Vec<Category>,
    current_category: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<Category>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let page = paginate(get_all_questions(&pool).await?, page);
    let Some(first) = page.items.first() else {
        return Err(ApiError::NotFound);
    };
    let current_category = get_category(&pool, first.category).await?;

    Ok(Json(QuestionsPage {
        success: true,
        current_category: current_category.id,
        categories: get_all_categories(&pool).await?,
        total_questions: page.total,
        questions: page.items,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body.search_term.unwrap_or_default();
    let page = paginate(search_questions(&pool, &term).await?, page);
    tracing::debug!(term = %term, matches = page.total, "searched questions");

    let current_category = match page.items.first() {
        Some(first) => Some(get_category(&pool, first.category).await?),
        None => None,
    };

    Ok(Json(SearchResults {
        success: true,
        questions: page.items,
        total_questions: page.total,
        current_category,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    let Some(question) = questions::get_question(&pool, id).await? else {
        return Err(ApiError::NotFound);
    };
    // a concurrent delete may have won the race since the lookup
    if !questions::delete_question(&pool, question.id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "question deleted");
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
