use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use crate::response::AppError;

/// 查询接口的 JSON 请求体，解析失败时返回统一的 `AppError` 而非 axum 默认的纯文本
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| JsonBody(value))
            .map_err(rejection_to_app_error)
    }
}

fn rejection_to_app_error(rejection: JsonRejection) -> AppError {
    // 超过 DefaultBodyLimit 的请求体同样以 BytesRejection 出现，需要单独区分
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %rejection, "Request body exceeds limit");
        return AppError::payload_too_large("请求体过大");
    }

    let kind = match &rejection {
        JsonRejection::JsonDataError(_) => "data",
        JsonRejection::JsonSyntaxError(_) => "syntax",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        JsonRejection::BytesRejection(_) => "bytes",
        _ => "other",
    };
    tracing::warn!(kind, error = %rejection, "Rejected idiom query body");
    AppError::bad_request("INVALID_REQUEST_BODY", "请求体格式无效")
}
