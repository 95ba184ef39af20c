//! 翻译模块
//!
//! 采用缓存旁路策略为 FAQ 内容提供翻译：
//! - **core**: 翻译缓存服务
//! - **storage**: 缓存存储抽象和缓存键策略
//! - **provider**: 外部翻译服务
//! - **language**: 支持的语言集合
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use multilingual_faq::translation::{
//!     ConfigManager, DeeplxProvider, Language, MemoryCache, TranslationCacheService,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigManager::new().load()?;
//! let provider = DeeplxProvider::new(config.api_url.clone(), config.provider_timeout())?;
//! let service = TranslationCacheService::with_policy(
//!     Arc::new(MemoryCache::new()),
//!     Arc::new(provider),
//!     config.key_policy(),
//! );
//! let text = service.translate("What is Rust?", Language::Bn);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod language;
pub mod provider;
pub mod storage;

pub use self::config::{ConfigManager, TranslationConfig};
pub use self::core::{StatsSnapshot, TranslationCacheService, WarmupReport};
pub use self::error::{TranslationError, TranslationResult};
pub use self::language::Language;
pub use self::provider::{DeeplxProvider, TranslationProvider};
pub use self::storage::{
    CacheKeyPolicy, CacheStore, Clock, KeyScheme, ManualClock, MemoryCache, NoopCache,
    SystemClock, CACHE_NAMESPACE, DEFAULT_TRANSLATION_TTL, SWEEP_INTERVAL,
};
