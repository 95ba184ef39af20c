//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 翻译服务不可用（超时、网络错误、配额）
    #[error("翻译服务不可用: {0}")]
    ProviderUnavailable(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 缓存错误
    #[error("缓存不可用: {0}")]
    CacheUnavailable(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::ProviderUnavailable(format!("请求超时: {}", error))
        } else {
            TranslationError::ProviderUnavailable(format!("网络错误: {}", error))
        }
    }
}

#[cfg(feature = "redis-cache")]
impl From<redis::RedisError> for TranslationError {
    fn from(error: redis::RedisError) -> Self {
        TranslationError::CacheUnavailable(format!("Redis错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_is_config_error() {
        let err: TranslationError = toml::from_str::<toml::Value>("key = ")
            .unwrap_err()
            .into();
        assert!(matches!(err, TranslationError::ConfigError(_)));
        assert!(err.to_string().starts_with("配置错误"));
    }

    #[test]
    fn test_display_includes_message() {
        let err = TranslationError::ProviderUnavailable("502".to_string());
        assert_eq!(err.to_string(), "翻译服务不可用: 502");
    }
}
