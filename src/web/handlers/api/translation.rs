//! 独立翻译API处理器
//!
//! 与记录投影不同，这里翻译服务失败会以 500 返回给调用方，不回显原文。

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json as ExtractJson, State},
    http::StatusCode,
    response::Json,
};
use tokio::task;

use crate::translation::TranslationError;
use crate::web::handlers::api::{error_response, json_rejection, ApiError};
use crate::web::types::{AppState, TranslateTextRequest, TranslateTextResponse};

/// 翻译任意文本
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    payload: Result<ExtractJson<TranslateTextRequest>, JsonRejection>,
) -> Result<Json<TranslateTextResponse>, ApiError> {
    let ExtractJson(request) = payload.map_err(json_rejection)?;
    let text = request.text.unwrap_or_default();
    let target_language = request.target_language.unwrap_or_default();

    // 在访问缓存和翻译服务之前验证
    if text.is_empty() || target_language.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Text and target_language are required.",
        ));
    }

    let translator = Arc::clone(&state.translator);
    let source_language = request.source_language;
    let result = task::spawn_blocking(move || {
        translator.translate_adhoc(&text, source_language.as_deref(), &target_language)
    })
    .await
    .map_err(|e| {
        tracing::error!("翻译任务失败: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("处理失败: {}", e))
    })?;

    match result {
        Ok(translated_text) => Ok(Json(TranslateTextResponse { translated_text })),
        Err(TranslationError::InvalidInput(msg)) => {
            Err(error_response(StatusCode::BAD_REQUEST, msg))
        }
        Err(e) => {
            tracing::error!("独立翻译失败: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
