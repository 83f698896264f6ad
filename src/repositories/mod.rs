//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 엔티티 컬렉션 핸들을 [`DocumentStore`](document_store::DocumentStore) trait으로 추상화합니다.
//!
//! - [`document_store`] - 컬렉션 핸들 trait
//! - [`mongo_store`] - MongoDB 컬렉션 구현체
//! - [`memory_store`] - 인메모리 구현체
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::{DocumentStore, MongoStore};
//!
//! let users = MongoStore::new(database.collection("users"));
//! let user = users.find_by_id("u1").await?;
//! ```

pub mod document_store;
pub mod memory_store;
pub mod mongo_store;

pub use document_store::DocumentStore;
pub use memory_store::{CallCounts, MemoryStore};
pub use mongo_store::MongoStore;
