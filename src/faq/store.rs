//! FAQ 记录存储
//!
//! `FaqRepository` 在内存存储和 MongoDB 存储之间分派。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use thiserror::Error;

use crate::faq::types::{FaqId, FaqPatch, FaqRecord, NewFaq};

#[cfg(feature = "mongo")]
use crate::faq::mongo_store::MongoFaqStore;

/// 存储错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("FAQ #{0} 不存在")]
    NotFound(FaqId),

    #[error("存储后端错误: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 进程内 FAQ 存储
pub struct MemoryFaqStore {
    records: DashMap<FaqId, FaqRecord>,
    next_id: AtomicU64,
}

impl Default for MemoryFaqStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFaqStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn list(&self) -> Vec<FaqRecord> {
        let mut records: Vec<FaqRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.id);
        records
    }

    pub fn get(&self, id: FaqId) -> Option<FaqRecord> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }

    pub fn create(&self, new: NewFaq) -> FaqRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let record = FaqRecord {
            id,
            question: new.question,
            answer: new.answer,
            created_at: now,
            updated_at: now,
        };
        self.records.insert(id, record.clone());
        record
    }

    pub fn update(&self, id: FaqId, patch: FaqPatch) -> StoreResult<FaqRecord> {
        let mut entry = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entry.apply(patch, Utc::now());
        Ok(entry.value().clone())
    }

    pub fn delete(&self, id: FaqId) -> StoreResult<()> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

/// FAQ 存储
#[derive(Clone)]
pub enum FaqRepository {
    Memory(Arc<MemoryFaqStore>),
    #[cfg(feature = "mongo")]
    Mongo(MongoFaqStore),
}

impl FaqRepository {
    /// 新建空的内存存储
    pub fn in_memory() -> Self {
        FaqRepository::Memory(Arc::new(MemoryFaqStore::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            FaqRepository::Memory(_) => "memory",
            #[cfg(feature = "mongo")]
            FaqRepository::Mongo(_) => "mongodb",
        }
    }

    /// 按 id 升序列出所有记录
    pub async fn list(&self) -> StoreResult<Vec<FaqRecord>> {
        match self {
            FaqRepository::Memory(store) => Ok(store.list()),
            #[cfg(feature = "mongo")]
            FaqRepository::Mongo(store) => store.list().await,
        }
    }

    pub async fn get(&self, id: FaqId) -> StoreResult<FaqRecord> {
        match self {
            FaqRepository::Memory(store) => store.get(id).ok_or(StoreError::NotFound(id)),
            #[cfg(feature = "mongo")]
            FaqRepository::Mongo(store) => store.get(id).await,
        }
    }

    pub async fn create(&self, new: NewFaq) -> StoreResult<FaqRecord> {
        match self {
            FaqRepository::Memory(store) => Ok(store.create(new)),
            #[cfg(feature = "mongo")]
            FaqRepository::Mongo(store) => store.create(new).await,
        }
    }

    pub async fn update(&self, id: FaqId, patch: FaqPatch) -> StoreResult<FaqRecord> {
        match self {
            FaqRepository::Memory(store) => store.update(id, patch),
            #[cfg(feature = "mongo")]
            FaqRepository::Mongo(store) => store.update(id, patch).await,
        }
    }

    pub async fn delete(&self, id: FaqId) -> StoreResult<()> {
        match self {
            FaqRepository::Memory(store) => store.delete(id),
            #[cfg(feature = "mongo")]
            FaqRepository::Mongo(store) => store.delete(id).await,
        }
    }
}
