//! 길드 저장소
//!
//! MongoDB 위에서 사용자, 길드, 길드 멤버 세 가지 논리 컬렉션을 다루는 얇은 데이터 액세스 계층입니다.
//!
//! # Features
//!
//! - **Get-or-create**: 조회 실패 시 `_id`만 가진 문서를 생성하고, 생성 충돌 시 한 번 재조회
//! - **템플릿 병합 업데이트**: 빈 스키마 템플릿 위에 저장된 문서를 딥 머지해 다시 저장
//! - **내장 멤버**: 길드 문서의 `members` 배열에 멤버 서브 문서를 추가/교체
//! - **비활성 엔티티 종류**: 디스크립터가 없는 종류는 저장소 호출 없이 `NotConfigured`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  StoreConnector  │ ← get / create / update 연산
//! └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  DocumentStore   │ ← MongoStore / MemoryStore
//! └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     MongoDB      │ ← 저장소
//! └──────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use guild_store::config::StoreConfig;
//! use guild_store::domain::models::ModelDescriptor;
//! use guild_store::services::connector::StoreConnectorBuilder;
//!
//! StoreConfig::load_env_file();
//!
//! let connector = StoreConnectorBuilder::from_env()
//!     .user(ModelDescriptor::from_default::<UserSchema>("users")?)
//!     .guild(ModelDescriptor::schemaless("guilds"))
//!     .guild_member(ModelDescriptor::from_default::<MemberSchema>("guild_members")?)
//!     .connect()
//!     .await?;
//!
//! let member = connector.get_guild_member("m1", "g1").await?;
//! let normalized = connector.update_guild_member("m1", "g1").await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;
