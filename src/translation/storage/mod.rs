//! 存储模块
//!
//! 提供翻译缓存存储抽象和缓存键策略。

pub mod cache;
pub mod key;

pub use cache::{
    CacheStore, Clock, ManualClock, MemoryCache, NoopCache, SystemClock, SWEEP_INTERVAL,
};
pub use key::{CacheKeyPolicy, KeyScheme, CACHE_NAMESPACE, DEFAULT_TRANSLATION_TTL};
