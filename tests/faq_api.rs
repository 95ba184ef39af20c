//! FAQ HTTP 接口集成测试

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use multilingual_faq::faq::FaqRepository;
use multilingual_faq::translation::{CacheStore, TranslationCacheService, DEFAULT_TRANSLATION_TTL};
use multilingual_faq::web::{create_router, AppState};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{MockProvider, TestApp};

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(router: &Router, question: &str, answer: &str) -> Value {
    let (status, body) = send(
        router,
        "POST",
        "/faqs",
        Some(json!({ "question": question, "answer": answer })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_create_and_fetch_faq() {
    let app = TestApp::new();

    let created = create(&app.router, "What is Rust?", "A systems language.").await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["question"], "What is Rust?");
    assert_eq!(created["answer"], "A systems language.");
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());

    let (status, fetched) = send(&app.router, "GET", "/faqs/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, list) = send(&app.router, "GET", "/faqs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // 英文读取不调用翻译服务
    assert_eq!(app.provider.calls(), 0);
    println!("✅ 创建与读取测试通过");
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let app = TestApp::new();
    create(&app.router, "First", "1").await;
    create(&app.router, "Second", "2").await;
    create(&app.router, "Third", "3").await;

    let (_, list) = send(&app.router, "GET", "/faqs", None).await;
    let ids: Vec<u64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|faq| faq["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_create_requires_both_fields() {
    let app = TestApp::new();

    let (status, body) = send(&app.router, "POST", "/faqs", Some(json!({ "question": "Q" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "answer: This field is required.");

    let (status, body) = send(
        &app.router,
        "POST",
        "/faqs",
        Some(json!({ "question": "  ", "answer": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "question: This field may not be blank.");

    let (_, list) = send(&app.router, "GET", "/faqs", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_faq_is_not_found() {
    let app = TestApp::new();

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app.router, method, "/faqs/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    let (status, _) = send(
        &app.router,
        "PUT",
        "/faqs/42",
        Some(json!({ "question": "Q", "answer": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_patch_and_delete() {
    let app = TestApp::new();
    let created = create(&app.router, "Q", "A").await;

    let (status, updated) = send(
        &app.router,
        "PUT",
        "/faqs/1",
        Some(json!({ "question": "Q2", "answer": "A2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["question"], "Q2");
    assert_eq!(updated["answer"], "A2");
    assert_eq!(updated["created_at"], created["created_at"]);

    // PUT 必须提供完整记录
    let (status, _) = send(&app.router, "PUT", "/faqs/1", Some(json!({ "answer": "A3" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, patched) = send(&app.router, "PATCH", "/faqs/1", Some(json!({ "answer": "A3" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["question"], "Q2");
    assert_eq!(patched["answer"], "A3");

    let (status, body) = send(&app.router, "DELETE", "/faqs/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app.router, "GET", "/faqs/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 读取非英文语言时优先使用缓存
#[tokio::test]
async fn test_get_translated_faq_uses_cache() {
    let app = TestApp::new();
    create(&app.router, "Q", "A").await;

    app.cache
        .set("faq_system:translation:hi:Q", "प्रश्न", DEFAULT_TRANSLATION_TTL)
        .unwrap();

    let (status, view) = send(&app.router, "GET", "/faqs/1?lang=hi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["question"], "प्रश्न");
    assert_eq!(view["answer"], "A-hi");
    assert_eq!(app.provider.calls(), 1);

    // 第二次读取全部命中缓存
    let (_, again) = send(&app.router, "GET", "/faqs/1?lang=hi", None).await;
    assert_eq!(again, view);
    assert_eq!(app.provider.calls(), 1);
    println!("✅ 翻译读取测试通过");
}

#[tokio::test]
async fn test_list_translated_faqs() {
    let app = TestApp::new();
    create(&app.router, "Q1", "A1").await;
    create(&app.router, "Q2", "A2").await;

    let (status, list) = send(&app.router, "GET", "/faqs?lang=bn", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list[0]["question"], "Q1-bn");
    assert_eq!(list[1]["answer"], "A2-bn");
    assert_eq!(app.provider.calls(), 4);
}

/// 不支持的语言回退为英文
#[tokio::test]
async fn test_unsupported_language_falls_back_to_english() {
    let app = TestApp::new();
    create(&app.router, "Q", "A").await;

    for uri in ["/faqs/1?lang=fr", "/faqs/1?lang=", "/faqs/1?lang=en"] {
        let (status, view) = send(&app.router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["question"], "Q");
        assert_eq!(view["answer"], "A");
    }
    assert_eq!(app.provider.calls(), 0);
}

/// 翻译服务失败时读取仍成功并返回英文
#[tokio::test]
async fn test_translation_failure_serves_original_text() {
    let app = TestApp::with_provider(MockProvider::failing());
    create(&app.router, "Q", "A").await;

    let (status, view) = send(&app.router, "GET", "/faqs/1?lang=hi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["question"], "Q");
    assert_eq!(view["answer"], "A");
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_translate_endpoint() {
    let app = TestApp::new();

    let request = json!({ "text": "Hello", "source_language": "en", "target_language": "fr" });
    let (status, body) = send(&app.router, "POST", "/translate", Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translated_text": "Hello-fr" }));

    let (status, _) = send(&app.router, "POST", "/translate", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.provider.calls(), 1);
}

#[tokio::test]
async fn test_translate_endpoint_validation() {
    let app = TestApp::new();

    for request in [
        json!({ "target_language": "fr" }),
        json!({ "text": "Hello" }),
        json!({ "text": "", "target_language": "fr" }),
    ] {
        let (status, body) = send(&app.router, "POST", "/translate", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Text and target_language are required." }));
    }
    assert_eq!(app.provider.calls(), 0);
}

#[tokio::test]
async fn test_translate_endpoint_provider_failure() {
    let app = TestApp::with_provider(MockProvider::failing());

    let (status, body) = send(
        &app.router,
        "POST",
        "/translate",
        Some(json!({ "text": "Hello", "target_language": "fr" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("mock provider is down"));
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_cache_stats_and_health() {
    let app = TestApp::new();
    create(&app.router, "Q", "A").await;
    send(&app.router, "GET", "/faqs/1?lang=hi", None).await;
    send(&app.router, "GET", "/faqs/1?lang=hi", None).await;

    let (status, stats) = send(&app.router, "GET", "/cache/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["cache_backend"], "memory");
    assert_eq!(stats["provider"], "mock");
    assert_eq!(stats["key_scheme"], "raw");
    assert_eq!(stats["ttl_secs"], 86400);
    assert_eq!(stats["stats"]["cache_hits"], 2);
    assert_eq!(stats["stats"]["cache_misses"], 2);

    let (status, health) = send(&app.router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({ "status": "ok", "storage": "memory", "cache": "memory" }));
}

/// 写入记录后在后台预热缓存
#[tokio::test]
async fn test_create_warms_cache_in_background() {
    let provider = MockProvider::new();
    let cache = Arc::new(multilingual_faq::translation::MemoryCache::new());
    let translator = Arc::new(TranslationCacheService::new(cache.clone(), provider.clone()));
    let router = create_router(Arc::new(AppState::new(translator, FaqRepository::in_memory())));

    create(&router, "Q", "A").await;

    let deadline = Instant::now() + Duration::from_secs(5);
    while cache.len() < 4 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(cache.len(), 4);
    assert_eq!(provider.calls(), 4);

    // 预热后读取不再调用翻译服务
    let (_, view) = send(&router, "GET", "/faqs/1?lang=bn", None).await;
    assert_eq!(view["question"], "Q-bn");
    assert_eq!(provider.calls(), 4);
}

/// 预热失败不影响写操作
#[tokio::test]
async fn test_failed_warmup_does_not_fail_write() {
    let provider = MockProvider::failing();
    let cache = Arc::new(multilingual_faq::translation::MemoryCache::new());
    let translator = Arc::new(TranslationCacheService::new(cache.clone(), provider.clone()));
    let router = create_router(Arc::new(AppState::new(translator, FaqRepository::in_memory())));

    let created = create(&router, "Q", "A").await;
    assert_eq!(created["question"], "Q");
    assert_eq!(created["answer"], "A");

    // 等待后台预热尝试完所有语言
    let deadline = Instant::now() + Duration::from_secs(5);
    while provider.calls() < 4 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(provider.calls(), 4);
    assert!(cache.is_empty());

    let (status, view) = send(&router, "GET", "/faqs/1?lang=hi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["question"], "Q");
    assert_eq!(view["answer"], "A");
    assert!(cache.is_empty());
}

/// 无法解析的请求体也返回 `{"error": ...}`
#[tokio::test]
async fn test_malformed_body_returns_error_payload() {
    let app = TestApp::new();

    for (method, uri) in [("POST", "/faqs"), ("PUT", "/faqs/1"), ("POST", "/translate")] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string(), "{} {} -> {}", method, uri, body);
    }

    // 缺少 content-type
    let request = Request::builder()
        .method("POST")
        .uri("/faqs")
        .body(Body::from(r#"{"question":"Q","answer":"A"}"#))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

/// 仅含空白的文本照常翻译
#[tokio::test]
async fn test_translate_endpoint_accepts_whitespace_text() {
    let app = TestApp::new();

    let (status, body) = send(
        &app.router,
        "POST",
        "/translate",
        Some(json!({ "text": " ", "target_language": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translated_text": " -hi" }));
    assert_eq!(app.provider.calls(), 1);
}
