//! # MongoDB 컬렉션 저장소
//!
//! `mongodb::Collection<Document>`를 [`DocumentStore`]로 감싼 구현체입니다.
//!
//! ## 특징
//!
//! - **스키마 없는 문서**: 컬렉션 타입은 `Document`이며 스키마는 템플릿으로만 표현
//! - **중복 키 감지**: 코드 11000 쓰기 에러는 `StoreError::Conflict`로 변환
//! - **원자적 갱신**: `find_one_and_update` + `ReturnDocument::After`
//! - **배열 원소 단위 쓰기**: `$push`와 위치 연산자 `$`로 배열 전체를 덮어쓰지 않음

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

use crate::domain::entities::{ID_FIELD, id_filter};
use crate::errors::errors::{StoreError, StoreResult};
use crate::repositories::document_store::DocumentStore;

#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    async fn update_returning_after(
        &self,
        filter: Document,
        update: Document,
    ) -> StoreResult<Option<Document>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(filter, update)
            .with_options(options)
            .await
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn name(&self) -> &str {
        self.collection.name()
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        self.find_one(id_filter(id)).await
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        self.collection
            .find_one(filter)
            .await
            .map_err(StoreError::from)
    }

    async fn create(&self, document: Document) -> StoreResult<Document> {
        self.collection
            .insert_one(&document)
            .await
            .map_err(StoreError::from)?;

        Ok(document)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        fields: Document,
    ) -> StoreResult<Option<Document>> {
        let mut fields = fields;
        fields.remove(ID_FIELD);

        // 빈 `$set`은 서버가 거부하므로 조회로 대체
        if fields.is_empty() {
            return self.find_one(filter).await;
        }

        self.update_returning_after(filter, doc! { "$set": fields }).await
    }

    async fn push_element(
        &self,
        filter: Document,
        field: &str,
        element: Document,
    ) -> StoreResult<Option<Document>> {
        let mut push = Document::new();
        push.insert(field, element);

        self.update_returning_after(filter, doc! { "$push": push }).await
    }

    async fn replace_element(
        &self,
        filter: Document,
        field: &str,
        element_id: &str,
        element: Document,
    ) -> StoreResult<Option<Document>> {
        let mut filter = filter;
        filter.insert(format!("{}.{}", field, ID_FIELD), element_id);

        let mut set = Document::new();
        set.insert(format!("{}.$", field), element);

        self.update_returning_after(filter, doc! { "$set": set }).await
    }
}
