//! 翻译缓存服务核心实现
//!
//! 本模块实现缓存旁路（cache-aside）翻译策略：给定源文本和目标语言，
//! 先查询缓存，未命中时调用外部翻译服务并写回缓存。
//!
//! ## 失败策略
//!
//! - 记录渲染路径（`translate`）从不失败：翻译服务或缓存出错时返回原文，
//!   只记录日志。
//! - 独立翻译接口（`translate_adhoc`）将翻译服务错误返回给调用方。
//! - 翻译失败不会写入缓存，下一次请求会重试。
//!
//! ## 并发
//!
//! 服务本身不持有锁。同一个冷键的并发未命中可能各自调用翻译服务并各自写入，
//! 结果相同，最后一次写入生效。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use multilingual_faq::translation::{
//!     DeeplxProvider, Language, MemoryCache, TranslationCacheService,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = DeeplxProvider::new("http://localhost:1188/translate", std::time::Duration::from_secs(10))?;
//! let service = TranslationCacheService::new(Arc::new(MemoryCache::new()), Arc::new(provider));
//!
//! let hindi = service.translate("What is Rust?", Language::Hi);
//! println!("{}", hindi);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::language::Language;
use crate::translation::provider::TranslationProvider;
use crate::translation::storage::{CacheKeyPolicy, CacheStore};

/// 记录翻译的源语言
pub const SOURCE_LANGUAGE: &str = "en";

/// 独立翻译接口未指定源语言时使用
pub const AUTO_DETECT_LANGUAGE: &str = "auto";

/// 翻译缓存服务
pub struct TranslationCacheService {
    cache: Arc<dyn CacheStore>,
    provider: Arc<dyn TranslationProvider>,
    policy: CacheKeyPolicy,
    stats: ServiceStats,
}

impl TranslationCacheService {
    /// 使用默认键策略（原样文本，24小时有效期）创建服务
    pub fn new(cache: Arc<dyn CacheStore>, provider: Arc<dyn TranslationProvider>) -> Self {
        Self::with_policy(cache, provider, CacheKeyPolicy::default())
    }

    pub fn with_policy(
        cache: Arc<dyn CacheStore>,
        provider: Arc<dyn TranslationProvider>,
        policy: CacheKeyPolicy,
    ) -> Self {
        Self {
            cache,
            provider,
            policy,
            stats: ServiceStats::default(),
        }
    }

    pub fn policy(&self) -> &CacheKeyPolicy {
        &self.policy
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend_name()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// 翻译一段英文文本
    ///
    /// 空文本或英文直接返回原文，不访问缓存也不调用翻译服务。
    /// 任何下层错误都降级为返回原文。
    pub fn translate(&self, text: &str, lang: Language) -> String {
        if text.is_empty() || lang.is_default() {
            return text.to_string();
        }

        let key = self.policy.translation_key(text, lang);
        match self.cached_or_translate(&key, text, SOURCE_LANGUAGE, lang.code()) {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("翻译失败，返回原文 (lang={}): {}", lang, e);
                text.to_string()
            }
        }
    }

    /// 独立翻译接口
    ///
    /// 缓存键额外包含源语言；翻译服务错误会直接返回给调用方。
    /// 源语言与目标语言相同时同样交给翻译服务处理。
    pub fn translate_adhoc(
        &self,
        text: &str,
        source_language: Option<&str>,
        target_language: &str,
    ) -> TranslationResult<String> {
        if text.is_empty() || target_language.is_empty() {
            return Err(TranslationError::InvalidInput(
                "Text and target_language are required.".to_string(),
            ));
        }

        let source_language = source_language
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(AUTO_DETECT_LANGUAGE);

        let key = self.policy.adhoc_key(text, source_language, target_language);
        self.cached_or_translate(&key, text, source_language, target_language)
    }

    /// 为所有支持的非英文语言预热缓存
    ///
    /// 尽力而为：已存在的键被跳过，失败只计数不返回错误。
    pub fn warm(&self, texts: &[&str]) -> WarmupReport {
        let mut report = WarmupReport::default();

        for text in texts.iter().filter(|t| !t.is_empty()) {
            for lang in Language::TRANSLATABLE {
                let key = self.policy.translation_key(text, lang);

                match self.cache.exists(&key) {
                    Ok(true) => {
                        report.skipped += 1;
                        continue;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        self.record_cache_error(&e);
                    }
                }

                match self.call_provider(&key, text, SOURCE_LANGUAGE, lang.code()) {
                    Ok(_) => report.translated += 1,
                    Err(e) => {
                        tracing::warn!("缓存预热失败 (lang={}): {}", lang, e);
                        report.failed += 1;
                    }
                }
            }
        }

        tracing::info!(
            "缓存预热完成: 翻译 {}，跳过 {}，失败 {}",
            report.translated,
            report.skipped,
            report.failed
        );
        report
    }

    /// 获取统计信息快照
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn cached_or_translate(
        &self,
        key: &str,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        self.stats.requests.fetch_add(1, Ordering::Relaxed);

        match self.cache.get(key) {
            Ok(Some(cached)) => {
                self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("faq_translation_cache_hits_total").increment(1);
                tracing::debug!("翻译缓存命中: {}", key);
                return Ok(cached);
            }
            Ok(None) => {}
            // 缓存不可用等同于未命中
            Err(e) => self.record_cache_error(&e),
        }

        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("faq_translation_cache_misses_total").increment(1);
        tracing::info!("翻译缓存未命中，调用翻译服务 ({} -> {})", source_lang, target_lang);

        self.call_provider(key, text, source_lang, target_lang)
    }

    fn call_provider(
        &self,
        key: &str,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        self.stats.provider_calls.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("faq_translation_provider_calls_total").increment(1);

        let translated = match self.provider.translate(text, source_lang, target_lang) {
            Ok(translated) => translated,
            Err(e) => {
                self.stats.provider_failures.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("faq_translation_provider_failures_total").increment(1);
                return Err(e);
            }
        };

        if let Err(e) = self.cache.set(key, &translated, self.policy.ttl()) {
            self.record_cache_error(&e);
        }

        Ok(translated)
    }

    fn record_cache_error(&self, error: &TranslationError) {
        self.stats.cache_errors.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("缓存操作失败 ({}): {}", self.cache.backend_name(), error);
    }
}

/// 缓存预热结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarmupReport {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// 服务统计信息
#[derive(Debug, Default)]
struct ServiceStats {
    requests: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    provider_calls: AtomicU64,
    provider_failures: AtomicU64,
    cache_errors: AtomicU64,
}

impl ServiceStats {
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            provider_calls: self.provider_calls.load(Ordering::Relaxed),
            provider_failures: self.provider_failures.load(Ordering::Relaxed),
            cache_errors: self.cache_errors.load(Ordering::Relaxed),
        }
    }
}

/// 统计信息快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub provider_calls: u64,
    pub provider_failures: u64,
    pub cache_errors: u64,
}

impl StatsSnapshot {
    /// 缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.requests as f64
        }
    }
}
