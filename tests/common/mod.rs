// 集成测试公共模块
//
// 提供测试用翻译服务、缓存存储和应用构建器

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;

use multilingual_faq::faq::FaqRepository;
use multilingual_faq::translation::{
    CacheStore, MemoryCache, TranslationCacheService, TranslationError, TranslationProvider,
    TranslationResult,
};
use multilingual_faq::web::{create_router, AppState};

/// 可控的翻译服务
///
/// 默认返回 `"{text}-{target}"`，可以预置固定译文或切换为失败模式。
#[derive(Default)]
pub struct MockProvider {
    calls: AtomicUsize,
    failing: AtomicBool,
    fixed: Mutex<HashMap<(String, String), String>>,
    last_source: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let provider = Self::default();
        provider.failing.store(true, Ordering::SeqCst);
        Arc::new(provider)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn with_translation(&self, text: &str, target: &str, translated: &str) {
        self.fixed
            .lock()
            .unwrap()
            .insert((text.to_string(), target.to_string()), translated.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_source(&self) -> Option<String> {
        self.last_source.lock().unwrap().clone()
    }
}

impl TranslationProvider for MockProvider {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_source.lock().unwrap() = Some(source_lang.to_string());

        if self.failing.load(Ordering::SeqCst) {
            return Err(TranslationError::ProviderUnavailable(
                "mock provider is down".to_string(),
            ));
        }

        let fixed = self.fixed.lock().unwrap();
        if let Some(translated) = fixed.get(&(text.to_string(), target_lang.to_string())) {
            return Ok(translated.clone());
        }

        Ok(format!("{}-{}", text, target_lang))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// 所有操作都失败的缓存存储
pub struct FailingCache;

impl CacheStore for FailingCache {
    fn get(&self, _key: &str) -> TranslationResult<Option<String>> {
        Err(TranslationError::CacheUnavailable("connection refused".to_string()))
    }

    fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> TranslationResult<()> {
        Err(TranslationError::CacheUnavailable("connection refused".to_string()))
    }

    fn exists(&self, _key: &str) -> TranslationResult<bool> {
        Err(TranslationError::CacheUnavailable("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// 测试环境：共享的缓存、翻译服务和路由
pub struct TestApp {
    pub cache: Arc<MemoryCache>,
    pub provider: Arc<MockProvider>,
    pub translator: Arc<TranslationCacheService>,
    pub router: Router,
}

impl TestApp {
    /// 内存存储，关闭写入预热以保证调用计数确定
    pub fn new() -> Self {
        Self::with_provider(MockProvider::new())
    }

    pub fn with_provider(provider: Arc<MockProvider>) -> Self {
        let cache = Arc::new(MemoryCache::new());
        let translator = Arc::new(TranslationCacheService::new(
            cache.clone(),
            provider.clone(),
        ));
        let state = AppState::new(translator.clone(), FaqRepository::in_memory()).with_warmup(false);

        Self {
            cache,
            provider,
            translator,
            router: create_router(Arc::new(state)),
        }
    }
}

/// 构建只包含内存缓存的翻译服务
pub fn memory_service(provider: Arc<MockProvider>) -> (Arc<MemoryCache>, TranslationCacheService) {
    let cache = Arc::new(MemoryCache::new());
    let service = TranslationCacheService::new(cache.clone(), provider);
    (cache, service)
}
