//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    // 翻译服务
    pub const DEFAULT_API_URL: &str = crate::translation::provider::DEFAULT_API_URL;
    pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

    // 缓存设置
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
    pub const DEFAULT_CACHE_NAMESPACE: &str = crate::translation::storage::CACHE_NAMESPACE;

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &["faq-config.toml", "config/faq.toml"];
}
