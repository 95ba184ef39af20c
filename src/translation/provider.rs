//! 翻译服务提供方
//!
//! 提供方是阻塞的外部调用：文本 + 源语言 + 目标语言 → 译文，可能失败。
//! 调用方需要在阻塞线程中使用（`tokio::task::spawn_blocking`）。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::translation::error::{TranslationError, TranslationResult};

/// 默认 API 地址（DeepLX 兼容接口）
pub const DEFAULT_API_URL: &str = "http://localhost:1188/translate";

/// 默认请求超时
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// 外部翻译服务
pub trait TranslationProvider: Send + Sync {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String>;

    fn name(&self) -> &'static str;
}

#[derive(Serialize)]
struct DeeplxRequest<'a> {
    text: &'a str,
    source_lang: String,
    target_lang: String,
}

#[derive(Deserialize)]
struct DeeplxResponse {
    code: Option<u16>,
    data: Option<String>,
    message: Option<String>,
}

/// DeepLX 兼容的 HTTP 翻译服务
pub struct DeeplxProvider {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl DeeplxProvider {
    /// 创建带超时的客户端，超时视为服务不可用
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> TranslationResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("无法创建HTTP客户端: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl TranslationProvider for DeeplxProvider {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        let request = DeeplxRequest {
            text,
            source_lang: source_lang.to_uppercase(),
            target_lang: target_lang.to_uppercase(),
        };

        let response = self.client.post(&self.api_url).json(&request).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::ProviderUnavailable(format!(
                "翻译API返回状态码 {}",
                status
            )));
        }

        let body: DeeplxResponse = response.json()?;
        if let Some(code) = body.code {
            if code != 200 {
                return Err(TranslationError::ProviderUnavailable(format!(
                    "翻译API返回错误 {}: {}",
                    code,
                    body.message.unwrap_or_default()
                )));
            }
        }

        body.data
            .ok_or_else(|| TranslationError::ProviderUnavailable("翻译API响应缺少 data 字段".to_string()))
    }

    fn name(&self) -> &'static str {
        "deeplx"
    }
}
