//! 记录投影
//!
//! 把存储的 FAQ 记录映射为指定语言的视图。纯函数，不修改记录。

use crate::faq::types::{FaqRecord, FaqView};
use crate::translation::{Language, TranslationCacheService};

/// 按语言投影记录
///
/// 英文直接透传字段，完全不经过翻译服务；其他语言逐字段翻译，
/// 翻译失败时字段保持原文。
pub fn project(record: &FaqRecord, lang: Language, service: &TranslationCacheService) -> FaqView {
    let (question, answer) = if lang.is_default() {
        (record.question.clone(), record.answer.clone())
    } else {
        (
            service.translate(&record.question, lang),
            service.translate(&record.answer, lang),
        )
    };

    FaqView {
        id: record.id,
        question,
        answer,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// 批量投影
pub fn project_all(
    records: &[FaqRecord],
    lang: Language,
    service: &TranslationCacheService,
) -> Vec<FaqView> {
    records
        .iter()
        .map(|record| project(record, lang, service))
        .collect()
}
