use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::idiom::Idiom;
use crate::response::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getIdiomList", post(get_idiom_list))
        .route("/getIdiomDetail", post(get_idiom_detail))
}

/// 缺失字段按空字符串处理
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GetIdiomListRequest {
    start_word: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GetIdiomDetailRequest {
    word: String,
}

async fn get_idiom_list(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GetIdiomListRequest>,
) -> Json<Vec<String>> {
    let words = state.catalog().find_by_prefix(&req.start_word);
    tracing::debug!(start_word = %req.start_word, matches = words.len(), "Idiom list query");
    Json(words)
}

async fn get_idiom_detail(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GetIdiomDetailRequest>,
) -> Result<Json<Idiom>, AppError> {
    state
        .catalog()
        .get_detail(&req.word)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found("成语不存在"))
}
