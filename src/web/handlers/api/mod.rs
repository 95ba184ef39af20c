//! API 处理器

pub mod cache;
pub mod faqs;
pub mod translation;

pub use cache::*;
pub use faqs::*;
pub use translation::*;

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};

/// 处理器统一的错误返回
pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// 构造 `{"error": ...}` 错误体
pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({
            "error": message.into()
        })),
    )
}

/// 请求体无法解析时同样返回 `{"error": ...}`
pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!("请求体解析失败: {}", rejection.body_text());
    error_response(rejection.status(), rejection.body_text())
}
