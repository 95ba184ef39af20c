//! FAQ 资源API处理器
//!
//! 列表和详情按 `?lang=` 投影；写操作返回英文视图并在后台预热翻译缓存。

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json as ExtractJson, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tokio::task;

use crate::faq::{project, project_all, FaqId, FaqInput, FaqRecord, FaqView, StoreError};
use crate::translation::Language;
use crate::web::handlers::api::{error_response, json_rejection, ApiError};
use crate::web::types::{AppState, LangQuery};

/// 列出所有 FAQ
pub async fn list_faqs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<FaqView>>, ApiError> {
    let lang = Language::from_query(query.lang.as_deref());
    let records = state.repository.list().await.map_err(store_error)?;

    if lang.is_default() {
        return Ok(Json(project_all(&records, lang, &state.translator)));
    }

    let translator = Arc::clone(&state.translator);
    let views = task::spawn_blocking(move || project_all(&records, lang, &translator))
        .await
        .map_err(join_error)?;

    Ok(Json(views))
}

/// 创建 FAQ
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    payload: Result<ExtractJson<FaqInput>, JsonRejection>,
) -> Result<(StatusCode, Json<FaqView>), ApiError> {
    let ExtractJson(input) = payload.map_err(json_rejection)?;
    let new = input
        .into_new()
        .map_err(|msg| error_response(StatusCode::BAD_REQUEST, msg))?;

    let record = state.repository.create(new).await.map_err(store_error)?;
    tracing::info!("创建 FAQ #{}", record.id);
    schedule_warmup(&state, &record);

    Ok((
        StatusCode::CREATED,
        Json(project(&record, Language::En, &state.translator)),
    ))
}

/// 获取单个 FAQ
pub async fn get_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FaqId>,
    Query(query): Query<LangQuery>,
) -> Result<Json<FaqView>, ApiError> {
    let lang = Language::from_query(query.lang.as_deref());
    let record = state.repository.get(id).await.map_err(store_error)?;

    if lang.is_default() {
        return Ok(Json(project(&record, lang, &state.translator)));
    }

    let translator = Arc::clone(&state.translator);
    let view = task::spawn_blocking(move || project(&record, lang, &translator))
        .await
        .map_err(join_error)?;

    Ok(Json(view))
}

/// 整体更新 FAQ（两个字段都必须提供）
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FaqId>,
    payload: Result<ExtractJson<FaqInput>, JsonRejection>,
) -> Result<Json<FaqView>, ApiError> {
    let ExtractJson(input) = payload.map_err(json_rejection)?;
    let new = input
        .into_new()
        .map_err(|msg| error_response(StatusCode::BAD_REQUEST, msg))?;

    let record = state
        .repository
        .update(id, new.into())
        .await
        .map_err(store_error)?;
    tracing::info!("更新 FAQ #{}", record.id);
    schedule_warmup(&state, &record);

    Ok(Json(project(&record, Language::En, &state.translator)))
}

/// 部分更新 FAQ
pub async fn patch_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FaqId>,
    payload: Result<ExtractJson<FaqInput>, JsonRejection>,
) -> Result<Json<FaqView>, ApiError> {
    let ExtractJson(input) = payload.map_err(json_rejection)?;
    let patch = input
        .into_patch()
        .map_err(|msg| error_response(StatusCode::BAD_REQUEST, msg))?;

    let record = state.repository.update(id, patch).await.map_err(store_error)?;
    tracing::info!("部分更新 FAQ #{}", record.id);
    schedule_warmup(&state, &record);

    Ok(Json(project(&record, Language::En, &state.translator)))
}

/// 删除 FAQ
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FaqId>,
) -> Result<StatusCode, ApiError> {
    state.repository.delete(id).await.map_err(store_error)?;
    tracing::info!("删除 FAQ #{}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// 后台预热，结果不影响写操作的响应
fn schedule_warmup(state: &AppState, record: &FaqRecord) {
    if !state.warmup_enabled {
        return;
    }

    let translator = Arc::clone(&state.translator);
    let question = record.question.clone();
    let answer = record.answer.clone();
    let id = record.id;

    task::spawn_blocking(move || {
        let report = translator.warm(&[&question, &answer]);
        tracing::debug!("FAQ #{} 预热结果: {:?}", id, report);
    });
}

fn store_error(error: StoreError) -> ApiError {
    match error {
        StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, error.to_string()),
        StoreError::Backend(_) => {
            tracing::error!("{}", error);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

fn join_error(error: task::JoinError) -> ApiError {
    tracing::error!("投影任务失败: {}", error);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("处理失败: {}", error),
    )
}
