//! # 문서 저장소 추상화
//!
//! 컬렉션 핸들이 제공해야 하는 최소 연산 집합입니다.
//! [`StoreConnector`](crate::services::connector::StoreConnector)는 이 trait만을 통해
//! 저장소에 접근하므로, MongoDB 컬렉션과 인메모리 저장소를 같은 방식으로 다룰 수 있습니다.

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::errors::errors::StoreResult;

/// 엔티티 컬렉션 핸들
///
/// ## 구현체
///
/// - [`MongoStore`](super::mongo_store::MongoStore) - `mongodb::Collection<Document>` 기반
/// - [`MemoryStore`](super::memory_store::MemoryStore) - 프로세스 내부 저장소
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 컬렉션 이름
    fn name(&self) -> &str;

    /// 기본 키(`_id`)로 조회합니다.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Document>>;

    /// 최상위 필드 동등 비교 필터로 첫 문서를 조회합니다.
    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>>;

    /// 문서를 삽입하고 삽입된 문서를 반환합니다.
    ///
    /// 같은 `_id`가 이미 있으면 `StoreError::Conflict`를 반환합니다.
    async fn create(&self, document: Document) -> StoreResult<Document>;

    /// 필터에 맞는 첫 문서의 필드를 `$set`으로 갱신하고, 갱신 후 문서를 반환합니다.
    ///
    /// `fields`의 `_id`는 무시됩니다. 맞는 문서가 없으면 `Ok(None)`입니다.
    async fn find_one_and_update(
        &self,
        filter: Document,
        fields: Document,
    ) -> StoreResult<Option<Document>>;

    /// 필터에 맞는 첫 문서의 `field` 배열 끝에 `element`를 원자적으로 추가합니다(`$push`).
    ///
    /// 배열이 없으면 새로 만듭니다. 갱신 후 문서를 반환하며, 맞는 문서가 없으면 `Ok(None)`입니다.
    async fn push_element(
        &self,
        filter: Document,
        field: &str,
        element: Document,
    ) -> StoreResult<Option<Document>>;

    /// `field` 배열에서 `_id`가 `element_id`인 원소 하나만 `element`로 교체합니다.
    ///
    /// 필터에 맞는 문서가 없거나 배열에 해당 원소가 없으면 `Ok(None)`입니다.
    async fn replace_element(
        &self,
        filter: Document,
        field: &str,
        element_id: &str,
        element: Document,
    ) -> StoreResult<Option<Document>>;
}
