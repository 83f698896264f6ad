//! 저장소 계층 전역에서 사용하는 에러 시스템
//!
//! `thiserror` 기반의 [`StoreError`]로 드라이버 오류, 연결 실패, 중복 키 충돌 등을
//! 하나의 타입으로 통합합니다. "설정되지 않음"과 "찾을 수 없음"은 에러가 아니라
//! [`Lookup`](crate::domain::models::lookup::Lookup) 변형으로 표현됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{StoreError, StoreResult};
//!
//! async fn load(store: &dyn DocumentStore, id: &str) -> StoreResult<Document> {
//!     store.find_by_id(id).await?
//!         .ok_or_else(|| StoreError::Internal(format!("{} 문서가 사라졌습니다", id)))
//! }
//! ```

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB 중복 키 에러 코드
pub const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// 클라이언트 생성 또는 ping 실패
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),

    /// 동일한 `_id` 문서가 이미 존재함
    #[error("Conflict error: {0}")]
    Conflict(String),

    /// 저장 대상 문서가 사라짐
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// 중복 키 충돌 여부
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                StoreError::Conflict(write_error.message.clone())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
