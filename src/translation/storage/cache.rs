//! 翻译缓存存储
//!
//! `CacheStore` 是带逐条过期时间的键值存储抽象。服务通过构造参数注入存储，
//! 测试中可以替换为内存实现或故障实现。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::translation::error::TranslationResult;

/// 带过期时间的键值存储
///
/// 实现自身负责并发安全（单键原子读写）。
pub trait CacheStore: Send + Sync {
    /// 读取未过期的值
    fn get(&self, key: &str) -> TranslationResult<Option<String>>;

    /// 写入值并设置有效期
    fn set(&self, key: &str, value: &str, ttl: Duration) -> TranslationResult<()>;

    /// 检查未过期的键是否存在
    fn exists(&self, key: &str) -> TranslationResult<bool>;

    /// 后端名称，用于统计输出
    fn backend_name(&self) -> &'static str;
}

/// 时钟抽象，便于在测试中模拟过期
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// 系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 手动推进的时钟
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_millis: AtomicU64,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_millis: AtomicU64::new(0),
        }
    }

    /// 将时钟向前推进
    pub fn advance(&self, by: Duration) {
        self.offset_millis
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_millis.load(Ordering::SeqCst))
    }
}

/// 每写入这么多次清理一遍过期条目
pub const SWEEP_INTERVAL: u64 = 256;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

/// 进程内缓存，没有配置 Redis 时使用
pub struct MemoryCache {
    entries: DashMap<String, MemoryEntry>,
    clock: Arc<dyn Clock>,
    writes: AtomicU64,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            writes: AtomicU64::new(0),
        }
    }

    /// 当前条目数（包括尚未清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// 清理过期条目，返回删除数量
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            // 过期条目在读取时移除
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        None
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> TranslationResult<Option<String>> {
        Ok(self.live_value(key))
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> TranslationResult<()> {
        let entry = MemoryEntry {
            value: value.to_string(),
            expires_at: self.clock.now() + ttl,
        };
        self.entries.insert(key.to_string(), entry);

        // 不再被读取的过期键由周期清理回收
        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % SWEEP_INTERVAL == 0 {
            let removed = self.cleanup_expired();
            if removed > 0 {
                tracing::debug!("清理过期缓存条目 {} 个", removed);
            }
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> TranslationResult<bool> {
        Ok(self.live_value(key).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// 禁用缓存时使用：永远未命中，写入被丢弃
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl CacheStore for NoopCache {
    fn get(&self, _key: &str) -> TranslationResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> TranslationResult<()> {
        Ok(())
    }

    fn exists(&self, _key: &str) -> TranslationResult<bool> {
        Ok(false)
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}
