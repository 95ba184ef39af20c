//! 缓存键与TTL策略
//!
//! 键按 `(源文本, 目标语言)` 组织，而不是按记录ID：相同文本在不同记录之间
//! 共用一个缓存条目。记录文本被修改后，旧条目不再可达，等待自然过期。

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::translation::error::TranslationError;
use crate::translation::language::Language;

/// 缓存命名空间
pub const CACHE_NAMESPACE: &str = "faq_system";

/// 翻译标记
pub const TRANSLATION_MARKER: &str = "translation";

/// 键分隔符
pub const KEY_DELIMITER: &str = ":";

/// 翻译缓存默认有效期（24小时）
pub const DEFAULT_TRANSLATION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// 键中文本部分的编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// 原样拼接源文本，与已部署的缓存兼容
    #[default]
    Raw,
    /// 使用源文本的 blake3 摘要，键长度固定
    Hashed,
}

impl FromStr for KeyScheme {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(KeyScheme::Raw),
            "hashed" | "hash" | "blake3" => Ok(KeyScheme::Hashed),
            other => Err(TranslationError::ConfigError(format!(
                "未知的缓存键方案 '{}'，可选: raw, hashed",
                other
            ))),
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyScheme::Raw => f.write_str("raw"),
            KeyScheme::Hashed => f.write_str("hashed"),
        }
    }
}

/// 缓存键策略
#[derive(Debug, Clone)]
pub struct CacheKeyPolicy {
    namespace: String,
    scheme: KeyScheme,
    ttl: Duration,
}

impl Default for CacheKeyPolicy {
    fn default() -> Self {
        Self::new(CACHE_NAMESPACE, KeyScheme::Raw, DEFAULT_TRANSLATION_TTL)
    }
}

impl CacheKeyPolicy {
    pub fn new(namespace: impl Into<String>, scheme: KeyScheme, ttl: Duration) -> Self {
        Self {
            namespace: namespace.into(),
            scheme,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn scheme(&self) -> KeyScheme {
        self.scheme
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 记录翻译的缓存键：`namespace:translation:{lang}:{text}`
    ///
    /// 对文本不做任何规范化，每个字符都参与键的构成。
    pub fn translation_key(&self, text: &str, lang: Language) -> String {
        [
            self.namespace.as_str(),
            TRANSLATION_MARKER,
            lang.code(),
            &self.text_component(text),
        ]
        .join(KEY_DELIMITER)
    }

    /// 独立翻译接口的缓存键：`namespace:translation:{source}:{target}:{text}`
    pub fn adhoc_key(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        [
            self.namespace.as_str(),
            TRANSLATION_MARKER,
            source_lang,
            target_lang,
            &self.text_component(text),
        ]
        .join(KEY_DELIMITER)
    }

    fn text_component<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.scheme {
            KeyScheme::Raw => Cow::Borrowed(text),
            KeyScheme::Hashed => Cow::Owned(blake3::hash(text.as_bytes()).to_hex().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_key_format_is_stable() {
        let policy = CacheKeyPolicy::default();
        assert_eq!(
            policy.translation_key("What is Rust?", Language::Hi),
            "faq_system:translation:hi:What is Rust?"
        );
        assert_eq!(
            policy.adhoc_key("Hello", "auto", "bn"),
            "faq_system:translation:auto:bn:Hello"
        );
    }

    #[test]
    fn test_keys_are_sensitive_to_every_character() {
        let policy = CacheKeyPolicy::default();
        let base = policy.translation_key("Hello", Language::Hi);
        assert_ne!(base, policy.translation_key("hello", Language::Hi));
        assert_ne!(base, policy.translation_key("Hello ", Language::Hi));
        assert_ne!(base, policy.translation_key("Hello", Language::Bn));
    }

    #[test]
    fn test_hashed_keys_have_fixed_width() {
        let policy = CacheKeyPolicy::new(CACHE_NAMESPACE, KeyScheme::Hashed, DEFAULT_TRANSLATION_TTL);
        let short = policy.translation_key("Q", Language::Hi);
        let long = policy.translation_key(&"A".repeat(10_000), Language::Hi);
        assert_eq!(short.len(), long.len());
        assert_eq!(short, policy.translation_key("Q", Language::Hi));
        assert_ne!(short, policy.translation_key("Q", Language::Bn));
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("RAW".parse::<KeyScheme>().unwrap(), KeyScheme::Raw);
        assert_eq!("blake3".parse::<KeyScheme>().unwrap(), KeyScheme::Hashed);
        assert!("md5".parse::<KeyScheme>().is_err());
    }

    #[test]
    fn test_default_ttl_is_one_day() {
        assert_eq!(CacheKeyPolicy::default().ttl(), Duration::from_secs(86_400));
    }
}
