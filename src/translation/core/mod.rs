//! 核心翻译服务模块

pub mod service;

pub use service::{
    StatsSnapshot, TranslationCacheService, WarmupReport, AUTO_DETECT_LANGUAGE, SOURCE_LANGUAGE,
};
