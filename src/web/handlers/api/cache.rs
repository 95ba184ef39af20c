//! 缓存相关API处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, CacheStatsResponse, HealthResponse};

/// 获取翻译缓存统计信息
pub async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let translator = &state.translator;
    let stats = translator.stats();
    let policy = translator.policy();

    Json(CacheStatsResponse {
        cache_backend: translator.cache_backend().to_string(),
        provider: translator.provider_name().to_string(),
        key_scheme: policy.scheme().to_string(),
        ttl_secs: policy.ttl().as_secs(),
        hit_rate: stats.hit_rate(),
        stats,
    })
}

/// 健康检查
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        storage: state.repository.backend_name(),
        cache: state.translator.cache_backend(),
    })
}
