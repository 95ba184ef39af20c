//! Web 模块的数据类型定义

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::faq::FaqRepository;
use crate::translation::{StatsSnapshot, TranslationCacheService};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<TranslationCacheService>,
    pub repository: FaqRepository,
    /// 写入记录后是否预热翻译缓存
    pub warmup_enabled: bool,
}

impl AppState {
    pub fn new(translator: Arc<TranslationCacheService>, repository: FaqRepository) -> Self {
        Self {
            translator,
            repository,
            warmup_enabled: true,
        }
    }

    pub fn with_warmup(mut self, enabled: bool) -> Self {
        self.warmup_enabled = enabled;
        self
    }
}

/// `?lang=` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// 独立翻译请求
#[derive(Debug, Default, Deserialize)]
pub struct TranslateTextRequest {
    pub text: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

/// 独立翻译响应
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateTextResponse {
    pub translated_text: String,
}

/// 缓存统计响应
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub cache_backend: String,
    pub provider: String,
    pub key_scheme: String,
    pub ttl_secs: u64,
    pub hit_rate: f64,
    pub stats: StatsSnapshot,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub cache: &'static str,
}
