//! # FAQ 模块
//!
//! - `types` - 记录与视图类型
//! - `projection` - 按语言投影记录
//! - `store` - 记录存储（内存 / MongoDB）

#[cfg(feature = "mongo")]
pub mod mongo_store;
pub mod projection;
pub mod store;
pub mod types;

#[cfg(feature = "mongo")]
pub use mongo_store::MongoFaqStore;
pub use projection::{project, project_all};
pub use store::{FaqRepository, MemoryFaqStore, StoreError, StoreResult};
pub use types::{FaqId, FaqInput, FaqPatch, FaqRecord, FaqView, NewFaq};
