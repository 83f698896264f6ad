//! # Domain Layer Module
//!
//! 저장소가 다루는 엔티티와 모델 타입을 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 엔티티 종류, 문서 필드 규약, 길드 멤버 배열 조작
//! └── models    - ModelDescriptor, Lookup
//!      │
//!      ▼
//! Services (StoreConnector)
//!      │
//!      ▼
//! Repositories (DocumentStore: MongoStore / MemoryStore)
//! ```

pub mod entities;
pub mod models;
