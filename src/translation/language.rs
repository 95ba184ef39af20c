//! 支持的语言集合
//!
//! 英文是源语言，永远不翻译；请求集合之外的语言一律回退到英文。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::translation::error::TranslationError;

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// 英文（默认，源语言）
    #[default]
    En,
    /// 印地语
    Hi,
    /// 孟加拉语
    Bn,
}

impl Language {
    /// 所有需要翻译的目标语言
    pub const TRANSLATABLE: [Language; 2] = [Language::Hi, Language::Bn];

    /// ISO 639-1 语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
        }
    }

    /// 是否为默认语言（不需要翻译）
    pub fn is_default(&self) -> bool {
        *self == Language::En
    }

    /// 解析查询参数中的语言，缺失或不支持时回退到英文
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!("不支持的语言 '{}'，回退到英文", raw);
                Language::En
            }),
            None => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            "bn" => Ok(Language::Bn),
            other => Err(TranslationError::InvalidInput(format!(
                "不支持的语言代码: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
