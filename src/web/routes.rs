//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // FAQ 资源
        .route("/faqs", get(list_faqs).post(create_faq))
        .route(
            "/faqs/:id",
            get(get_faq).put(update_faq).patch(patch_faq).delete(delete_faq),
        )
        // 独立翻译
        .route("/translate", post(translate_text))
        // 管理功能
        .route("/cache/stats", get(get_cache_stats))
        .route("/health", get(health))
}
