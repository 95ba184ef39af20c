//! 简化的配置管理器
//!
//! 加载顺序：默认值 → 配置文件 → 环境变量，最后统一验证

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::storage::{CacheKeyPolicy, KeyScheme};

/// 翻译配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 翻译服务
    pub api_url: String,
    pub provider_timeout_secs: u64,

    // 缓存配置
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub cache_namespace: String,
    pub key_scheme: KeyScheme,
    pub redis_url: Option<String>,

    // 写入时预热
    pub warmup_enabled: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            provider_timeout_secs: constants::DEFAULT_PROVIDER_TIMEOUT_SECS,
            cache_enabled: true,
            cache_ttl_secs: constants::DEFAULT_CACHE_TTL_SECS,
            cache_namespace: constants::DEFAULT_CACHE_NAMESPACE.to_string(),
            key_scheme: KeyScheme::Raw,
            redis_url: None,
            warmup_enabled: true,
        }
    }
}

impl TranslationConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(TranslationError::ConfigError(format!(
                "翻译API地址无效: {}",
                self.api_url
            )));
        }

        if self.provider_timeout_secs == 0 {
            return Err(TranslationError::ConfigError("翻译超时不能为0".to_string()));
        }

        if self.cache_ttl_secs == 0 {
            return Err(TranslationError::ConfigError("缓存有效期不能为0".to_string()));
        }

        if self.cache_namespace.trim().is_empty() {
            return Err(TranslationError::ConfigError("缓存命名空间不能为空".to_string()));
        }

        Ok(())
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// 由配置生成缓存键策略
    pub fn key_policy(&self) -> CacheKeyPolicy {
        CacheKeyPolicy::new(self.cache_namespace.clone(), self.key_scheme, self.cache_ttl())
    }

    /// 应用环境变量覆盖
    ///
    /// 只覆盖已设置的变量，无效值会被记录并忽略。
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{cache, translation, EnvVar};

        match translation::ApiUrl::get_optional() {
            Ok(Some(api_url)) => self.api_url = api_url,
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
        }

        match translation::Timeout::get_optional() {
            Ok(Some(timeout)) => self.provider_timeout_secs = timeout.as_secs(),
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
        }

        match cache::Enabled::get_optional() {
            Ok(Some(enabled)) => self.cache_enabled = enabled,
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
        }

        match cache::Ttl::get_optional() {
            Ok(Some(ttl)) => self.cache_ttl_secs = ttl.as_secs(),
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
        }

        match cache::KeyScheme::get_optional() {
            Ok(Some(scheme)) => self.key_scheme = scheme,
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
        }

        match cache::WarmupEnabled::get_optional() {
            Ok(Some(enabled)) => self.warmup_enabled = enabled,
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
        }

        match cache::RedisUrl::get_optional() {
            Ok(Some(url)) => self.redis_url = Some(url),
            Ok(None) => {}
            Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
        }
    }
}

/// 配置管理器
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 在默认搜索路径中查找配置文件
    pub fn new() -> Self {
        let config_path = constants::CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists());

        Self { config_path }
    }

    /// 使用指定的配置文件
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 加载配置：文件（如果有）→ 环境变量 → 验证
    pub fn load(&self) -> TranslationResult<TranslationConfig> {
        let mut config = match &self.config_path {
            Some(path) => {
                tracing::info!("加载配置文件: {}", path.display());
                Self::load_file(path)?
            }
            None => TranslationConfig::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 只读取配置文件，不应用环境变量
    pub fn load_file(path: &Path) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::ConfigError(format!("无法读取 {}: {}", path.display(), e)))?;
        let config: TranslationConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
