//! # Multilingual FAQ
//!
//! 带机器翻译缓存的 FAQ 服务。记录只以英文保存，读取时按 `?lang=` 投影，
//! 翻译结果通过 cache-aside 方式缓存。
//!
//! ## 模块组织
//!
//! - `faq` - FAQ 记录、存储和按语言投影
//! - `translation` - 翻译服务、缓存键策略和缓存存储
//! - `web` - HTTP 接口
//! - `env` - 类型安全的环境变量
//! - `redis_cache` - Redis 缓存存储（可选）

pub mod env;
pub mod faq;
#[cfg(feature = "redis-cache")]
pub mod redis_cache;
pub mod translation;
pub mod web;

pub use faq::{FaqRecord, FaqRepository, FaqView};
pub use translation::{Language, TranslationCacheService, TranslationError};
