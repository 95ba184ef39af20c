//! MongoDB FAQ 存储
//!
//! 记录使用自增整数作为 `_id`，序号保存在 `counters` 集合中。

use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use crate::faq::store::{StoreError, StoreResult};
use crate::faq::types::{FaqId, FaqPatch, FaqRecord, NewFaq};

const COUNTERS_COLLECTION: &str = "counters";

/// MongoDB 中存储的 FAQ 文档
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FaqDocument {
    #[serde(rename = "_id")]
    id: i64,
    question: String,
    answer: String,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<FaqDocument> for FaqRecord {
    fn from(doc: FaqDocument) -> Self {
        Self {
            id: doc.id as FaqId,
            question: doc.question,
            answer: doc.answer,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

impl From<&FaqRecord> for FaqDocument {
    fn from(record: &FaqRecord) -> Self {
        Self {
            id: record.id as i64,
            question: record.question.clone(),
            answer: record.answer.clone(),
            created_at: bson::DateTime::from_chrono(record.created_at),
            updated_at: bson::DateTime::from_chrono(record.updated_at),
        }
    }
}

/// 基于 MongoDB 的 FAQ 存储
#[derive(Clone)]
pub struct MongoFaqStore {
    collection: Collection<FaqDocument>,
    counters: Collection<Document>,
    collection_name: String,
}

impl MongoFaqStore {
    /// 连接数据库并验证连通性
    pub async fn connect(
        connection_string: &str,
        database_name: &str,
        collection_name: &str,
    ) -> StoreResult<Self> {
        let client = Client::with_uri_str(connection_string)
            .await
            .map_err(|e| StoreError::Backend(format!("连接MongoDB失败: {}", e)))?;
        let database = client.database(database_name);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Backend(format!("MongoDB不可用: {}", e)))?;

        Ok(Self::new(database, collection_name))
    }

    pub fn new(database: Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection::<FaqDocument>(collection_name),
            counters: database.collection::<Document>(COUNTERS_COLLECTION),
            collection_name: collection_name.to_string(),
        }
    }

    pub async fn list(&self) -> StoreResult<Vec<FaqRecord>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| StoreError::Backend(format!("查询数据库失败: {}", e)))?;

        let documents: Vec<FaqDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Backend(format!("读取结果失败: {}", e)))?;

        Ok(documents.into_iter().map(FaqRecord::from).collect())
    }

    pub async fn get(&self, id: FaqId) -> StoreResult<FaqRecord> {
        self.collection
            .find_one(doc! { "_id": id as i64 })
            .await
            .map_err(|e| StoreError::Backend(format!("查询数据库失败: {}", e)))?
            .map(FaqRecord::from)
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, new: NewFaq) -> StoreResult<FaqRecord> {
        let id = self.next_id().await?;
        let now = chrono::Utc::now();
        let record = FaqRecord {
            id,
            question: new.question,
            answer: new.answer,
            created_at: now,
            updated_at: now,
        };

        self.collection
            .insert_one(FaqDocument::from(&record))
            .await
            .map_err(|e| StoreError::Backend(format!("插入文档失败: {}", e)))?;

        Ok(record)
    }

    pub async fn update(&self, id: FaqId, patch: FaqPatch) -> StoreResult<FaqRecord> {
        let mut record = self.get(id).await?;
        record.apply(patch, chrono::Utc::now());

        let result = self
            .collection
            .replace_one(doc! { "_id": id as i64 }, FaqDocument::from(&record))
            .await
            .map_err(|e| StoreError::Backend(format!("更新文档失败: {}", e)))?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(record)
    }

    pub async fn delete(&self, id: FaqId) -> StoreResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id as i64 })
            .await
            .map_err(|e| StoreError::Backend(format!("删除文档失败: {}", e)))?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn next_id(&self) -> StoreResult<FaqId> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": self.collection_name.as_str() },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError::Backend(format!("生成记录ID失败: {}", e)))?
            .ok_or_else(|| StoreError::Backend("计数器文档缺失".to_string()))?;

        counter
            .get_i64("seq")
            .map(|seq| seq as FaqId)
            .map_err(|e| StoreError::Backend(format!("计数器格式错误: {}", e)))
    }
}
