//! Web 服务器模块
//!
//! 提供多语言 FAQ 的 REST 接口以及独立翻译接口

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::faq::FaqRepository;
use crate::translation::{
    CacheStore, DeeplxProvider, MemoryCache, NoopCache, TranslationCacheService,
    TranslationConfig, TranslationError,
};

/// 服务器启动和运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("翻译服务初始化失败: {0}")]
    Translation(#[from] TranslationError),

    #[error("绑定地址 {addr} 失败: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("服务器错误: {0}")]
    Serve(#[from] std::io::Error),

    #[error("后台任务失败: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    translation_config: TranslationConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, translation_config: TranslationConfig) -> Self {
        Self {
            config,
            translation_config,
        }
    }

    /// 启动 Web 服务器，直到收到 Ctrl+C
    pub async fn start(&self) -> Result<(), ServerError> {
        self.config
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        // 阻塞式 HTTP 客户端不能在异步上下文中构造
        let translation_config = self.translation_config.clone();
        let translator =
            tokio::task::spawn_blocking(move || build_translator(&translation_config)).await??;
        tracing::info!(
            "翻译服务就绪: provider={}, cache={}",
            translator.provider_name(),
            translator.cache_backend()
        );

        let repository = self.connect_repository().await;
        tracing::info!("FAQ 存储: {}", repository.backend_name());

        let app_state = AppState::new(Arc::new(translator), repository)
            .with_warmup(self.translation_config.warmup_enabled);
        let app = create_router(Arc::new(app_state));

        let addr = self.config.listen_address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!("Web server starting at http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Web server stopped");
        Ok(())
    }

    async fn connect_repository(&self) -> FaqRepository {
        #[cfg(feature = "mongo")]
        if let Some(ref mongo) = self.config.mongo_config {
            match crate::faq::MongoFaqStore::connect(
                &mongo.connection_string,
                &mongo.database_name,
                &mongo.collection_name,
            )
            .await
            {
                Ok(store) => {
                    tracing::info!(
                        "MongoDB 连接成功: {}/{}",
                        mongo.database_name,
                        mongo.collection_name
                    );
                    return FaqRepository::Mongo(store);
                }
                Err(e) => {
                    tracing::warn!("MongoDB 连接失败: {}，改用内存存储", e);
                }
            }
        }

        #[cfg(not(feature = "mongo"))]
        if self.config.mongo_config.is_some() {
            tracing::warn!("未启用 mongo 特性，忽略 MONGODB_URL，使用内存存储");
        }

        FaqRepository::in_memory()
    }
}

/// 按配置组装翻译缓存服务
///
/// 必须在阻塞线程中调用：会构造阻塞式 HTTP 客户端，并可能探测 Redis。
pub fn build_translator(config: &TranslationConfig) -> Result<TranslationCacheService, TranslationError> {
    let provider = DeeplxProvider::new(config.api_url.as_str(), config.provider_timeout())?;
    let cache = build_cache(config);

    Ok(TranslationCacheService::with_policy(
        cache,
        Arc::new(provider),
        config.key_policy(),
    ))
}

fn build_cache(config: &TranslationConfig) -> Arc<dyn CacheStore> {
    if !config.cache_enabled {
        tracing::info!("翻译缓存已禁用");
        return Arc::new(NoopCache);
    }

    #[cfg(feature = "redis-cache")]
    if let Some(ref url) = config.redis_url {
        use crate::redis_cache::{RedisCache, RedisCacheConfig};

        let redis_config = RedisCacheConfig {
            url: url.clone(),
            ..RedisCacheConfig::default()
        };
        match RedisCache::new(redis_config) {
            Ok(cache) => match cache.test_connection() {
                Ok(()) => {
                    tracing::info!("Redis 缓存连接成功: {}", cache.url());
                    return Arc::new(cache);
                }
                Err(e) => {
                    tracing::warn!("Redis 连接失败: {}，改用进程内缓存", e);
                }
            },
            Err(e) => {
                tracing::warn!("无法初始化 Redis 缓存: {}，改用进程内缓存", e);
            }
        }
    }

    #[cfg(not(feature = "redis-cache"))]
    if config.redis_url.is_some() {
        tracing::warn!("未启用 redis-cache 特性，使用进程内缓存");
    }

    Arc::new(MemoryCache::new())
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听关闭信号: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("收到关闭信号");
}
