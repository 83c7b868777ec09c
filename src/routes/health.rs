use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::response::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "uptimeSecs": state.uptime_secs(),
        "dataset": {
            "idioms": state.catalog().len(),
        }
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// 空数据集时所有查询都只会返回空结果，不视为就绪
pub async fn readiness(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if state.catalog().is_empty() {
        return Err(AppError::service_unavailable("Idiom dataset is empty"));
    }
    Ok(StatusCode::OK)
}
