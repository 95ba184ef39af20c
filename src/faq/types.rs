//! FAQ 数据类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// FAQ 记录标识
pub type FaqId = u64;

/// 存储层中的 FAQ 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id: FaqId,
    pub question: String,
    /// 富文本（HTML）答案
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 按请求语言投影后的 FAQ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqView {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建或整体更新请求体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqInput {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// 通过验证的新记录内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
}

/// 部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl FaqInput {
    /// 两个字段都必须存在且非空
    pub fn into_new(self) -> Result<NewFaq, String> {
        let question = required_field("question", self.question)?;
        let answer = required_field("answer", self.answer)?;
        Ok(NewFaq { question, answer })
    }

    /// 缺失的字段保持不变，提供的字段不能为空
    pub fn into_patch(self) -> Result<FaqPatch, String> {
        let question = self
            .question
            .map(|value| required_field("question", Some(value)))
            .transpose()?;
        let answer = self
            .answer
            .map(|value| required_field("answer", Some(value)))
            .transpose()?;
        Ok(FaqPatch { question, answer })
    }
}

impl From<NewFaq> for FaqPatch {
    fn from(new: NewFaq) -> Self {
        Self {
            question: Some(new.question),
            answer: Some(new.answer),
        }
    }
}

impl FaqRecord {
    /// 应用更新；`updated_at` 不会早于之前的值
    pub fn apply(&mut self, patch: FaqPatch, now: DateTime<Utc>) {
        if let Some(question) = patch.question {
            self.question = question;
        }
        if let Some(answer) = patch.answer {
            self.answer = answer;
        }
        self.updated_at = now.max(self.updated_at);
    }
}

fn required_field(name: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(format!("{}: This field may not be blank.", name)),
        None => Err(format!("{}: This field is required.", name)),
    }
}
