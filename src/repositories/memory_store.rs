//! # 인메모리 문서 저장소
//!
//! 프로세스 내부에서 동작하는 [`DocumentStore`] 구현체입니다.
//! 연산별 호출 횟수를 기록하고 생성/갱신 실패를 주입할 수 있어 테스트와
//! 데이터베이스 없는 임베딩에 사용됩니다.
//!
//! 모든 연산은 실제 작업 전에 한 번 양보(`yield_now`)합니다. 같은 태스크에서
//! 동시에 진행되는 호출들이 드라이버 왕복처럼 서로 교차하게 됩니다.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mongodb::bson::{Bson, Document, oid::ObjectId};
use tokio::sync::Mutex;

use crate::domain::entities::{ID_FIELD, document_id};
use crate::errors::errors::{StoreError, StoreResult};
use crate::repositories::document_store::DocumentStore;

/// 연산별 호출 횟수 스냅샷
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub find_by_id: usize,
    pub find_one: usize,
    pub create: usize,
    pub find_one_and_update: usize,
    pub push_element: usize,
    pub replace_element: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.find_by_id + self.find_one + self.create + self.writes()
    }

    /// 갱신 계열 호출 수 (`find_one_and_update`, `push_element`, `replace_element`)
    pub fn writes(&self) -> usize {
        self.find_one_and_update + self.push_element + self.replace_element
    }
}

#[derive(Default)]
struct Counters {
    find_by_id: AtomicUsize,
    find_one: AtomicUsize,
    create: AtomicUsize,
    find_one_and_update: AtomicUsize,
    push_element: AtomicUsize,
    replace_element: AtomicUsize,
}

#[derive(Default)]
pub struct MemoryStore {
    name: String,
    documents: Mutex<Vec<Document>>,
    updates: Mutex<Vec<(Document, Document)>>,
    counters: Counters,
    failing_creates: AtomicUsize,
    failing_updates: AtomicUsize,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 초기 문서를 가진 저장소를 생성합니다. 초기 문서는 호출 횟수에 포함되지 않습니다.
    pub fn with_documents(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            documents: Mutex::new(documents),
            ..Self::default()
        }
    }

    /// 다음 `count`번의 `create` 호출을 실패시킵니다.
    pub fn fail_next_creates(&self, count: usize) {
        self.failing_creates.store(count, Ordering::SeqCst);
    }

    /// 다음 `count`번의 갱신 계열 호출을 실패시킵니다.
    pub fn fail_next_updates(&self, count: usize) {
        self.failing_updates.store(count, Ordering::SeqCst);
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            find_by_id: self.counters.find_by_id.load(Ordering::SeqCst),
            find_one: self.counters.find_one.load(Ordering::SeqCst),
            create: self.counters.create.load(Ordering::SeqCst),
            find_one_and_update: self.counters.find_one_and_update.load(Ordering::SeqCst),
            push_element: self.counters.push_element.load(Ordering::SeqCst),
            replace_element: self.counters.replace_element.load(Ordering::SeqCst),
        }
    }

    /// 저장된 문서 사본
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.lock().await.clone()
    }

    /// 실제로 적용된 (필터, 갱신 연산자 문서) 기록
    pub async fn update_log(&self) -> Vec<(Document, Document)> {
        self.updates.lock().await.clone()
    }

    /// 호출 횟수에 포함되지 않는 직접 조회
    pub async fn get(&self, id: &str) -> Option<Document> {
        self.documents
            .lock()
            .await
            .iter()
            .find(|document| document.get_str(ID_FIELD).ok() == Some(id))
            .cloned()
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok()
    }

    fn check_update_failure(&self) -> StoreResult<()> {
        if Self::take_failure(&self.failing_updates) {
            return Err(StoreError::Database(format!(
                "{}: injected update failure",
                self.name
            )));
        }
        Ok(())
    }

    async fn record_update(&self, filter: &Document, operator: &str, fields: Document) {
        let mut update = Document::new();
        update.insert(operator, fields);
        self.updates.lock().await.push((filter.clone(), update));
    }
}

/// 필터의 모든 최상위 필드가 문서와 같은지 확인합니다.
fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        self.counters.find_by_id.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        Ok(self.get(id).await)
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        self.counters.find_one.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        Ok(self
            .documents
            .lock()
            .await
            .iter()
            .find(|document| matches_filter(document, &filter))
            .cloned())
    }

    async fn create(&self, document: Document) -> StoreResult<Document> {
        self.counters.create.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if Self::take_failure(&self.failing_creates) {
            return Err(StoreError::Database(format!(
                "{}: injected create failure",
                self.name
            )));
        }

        let mut document = document;
        if !document.contains_key(ID_FIELD) {
            document.insert(ID_FIELD, ObjectId::new());
        }

        let mut documents = self.documents.lock().await;
        let id = document.get(ID_FIELD).cloned().unwrap_or(Bson::Null);
        if documents.iter().any(|existing| existing.get(ID_FIELD) == Some(&id)) {
            return Err(StoreError::Conflict(format!(
                "E11000 duplicate key error collection: {} dup key: {{ _id: {} }}",
                self.name, id
            )));
        }

        documents.push(document.clone());
        Ok(document)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        fields: Document,
    ) -> StoreResult<Option<Document>> {
        self.counters.find_one_and_update.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        let mut fields = fields;
        fields.remove(ID_FIELD);

        // 갱신할 필드가 없으면 조회만 수행
        if fields.is_empty() {
            return Ok(self
                .documents
                .lock()
                .await
                .iter()
                .find(|document| matches_filter(document, &filter))
                .cloned());
        }

        self.check_update_failure()?;
        self.record_update(&filter, "$set", fields.clone()).await;

        let mut documents = self.documents.lock().await;
        let Some(target) = documents
            .iter_mut()
            .find(|document| matches_filter(document, &filter))
        else {
            return Ok(None);
        };

        for (key, value) in fields {
            target.insert(key, value);
        }

        Ok(Some(target.clone()))
    }

    async fn push_element(
        &self,
        filter: Document,
        field: &str,
        element: Document,
    ) -> StoreResult<Option<Document>> {
        self.counters.push_element.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        self.check_update_failure()?;
        let mut pushed = Document::new();
        pushed.insert(field, element.clone());
        self.record_update(&filter, "$push", pushed).await;

        let mut documents = self.documents.lock().await;
        let Some(target) = documents
            .iter_mut()
            .find(|document| matches_filter(document, &filter))
        else {
            return Ok(None);
        };

        match target.get_mut(field) {
            Some(Bson::Array(array)) => array.push(Bson::Document(element)),
            None => {
                target.insert(field, Bson::Array(vec![Bson::Document(element)]));
            }
            Some(_) => {
                return Err(StoreError::Database(format!(
                    "{}: field {} is not an array",
                    self.name, field
                )));
            }
        }

        Ok(Some(target.clone()))
    }

    async fn replace_element(
        &self,
        filter: Document,
        field: &str,
        element_id: &str,
        element: Document,
    ) -> StoreResult<Option<Document>> {
        self.counters.replace_element.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        self.check_update_failure()?;
        let mut replaced = Document::new();
        replaced.insert(format!("{}.$", field), element.clone());
        self.record_update(&filter, "$set", replaced).await;

        let mut documents = self.documents.lock().await;
        let Some(target) = documents
            .iter_mut()
            .find(|document| matches_filter(document, &filter))
        else {
            return Ok(None);
        };
        let Ok(array) = target.get_array_mut(field) else {
            return Ok(None);
        };
        let Some(slot) = array.iter_mut().find(|existing| match existing {
            Bson::Document(existing) => document_id(existing) == Some(element_id),
            _ => false,
        }) else {
            return Ok(None);
        };

        *slot = Bson::Document(element);
        Ok(Some(target.clone()))
    }
}
