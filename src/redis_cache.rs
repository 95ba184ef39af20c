//! Redis 缓存模块
//!
//! 为翻译缓存服务提供共享的 Redis 存储。键由缓存键策略生成，
//! 过期完全交给 Redis 的 `SETEX` 处理。

use std::time::Duration;

use redis::{Client, Connection, RedisResult};

use crate::translation::error::TranslationResult;
use crate::translation::storage::CacheStore;

/// 连接、读、写的默认超时
pub const DEFAULT_REDIS_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis 缓存配置
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    pub url: String,
    /// 超时后按缓存不可用处理
    pub timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            timeout: DEFAULT_REDIS_TIMEOUT,
        }
    }
}

/// Redis 缓存客户端
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    config: RedisCacheConfig,
}

impl RedisCache {
    /// 创建新的 Redis 缓存实例（不立即建立连接）
    pub fn new(config: RedisCacheConfig) -> RedisResult<Self> {
        let client = Client::open(config.url.as_str())?;
        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// 测试 Redis 连接
    pub fn test_connection(&self) -> RedisResult<()> {
        let mut conn = self.connection()?;
        let _: String = redis::cmd("PING").query(&mut conn)?;
        Ok(())
    }

    fn connection(&self) -> RedisResult<Connection> {
        let timeout = self.config.timeout;
        let conn = self.client.get_connection_with_timeout(timeout)?;
        conn.set_read_timeout(Some(timeout))?;
        conn.set_write_timeout(Some(timeout))?;
        Ok(conn)
    }
}

impl CacheStore for RedisCache {
    fn get(&self, key: &str) -> TranslationResult<Option<String>> {
        let mut conn = self.connection()?;
        let cached: Option<String> = redis::cmd("GET").arg(key).query(&mut conn)?;
        Ok(cached)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> TranslationResult<()> {
        let mut conn = self.connection()?;
        // SETEX 不接受 0 秒
        let seconds = ttl.as_secs().max(1);
        let _: () = redis::cmd("SETEX")
            .arg(key)
            .arg(seconds)
            .arg(value)
            .query(&mut conn)?;
        Ok(())
    }

    fn exists(&self, key: &str) -> TranslationResult<bool> {
        let mut conn = self.connection()?;
        let count: u32 = redis::cmd("EXISTS").arg(key).query(&mut conn)?;
        Ok(count > 0)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
