//! 저장소 커넥터 모듈
//!
//! [`StoreConnector`]는 사용자, 길드, 길드 멤버 컬렉션에 대한 get-or-create와
//! 템플릿 병합 업데이트를 제공합니다.
//!
//! # Modules
//!
//! - [`builder`] - 연결 후에만 커넥터를 돌려주는 [`StoreConnectorBuilder`]
//! - [`store_connector`] - 사용자/길드 연산
//! - [`members`] - 길드 멤버 연산
//!
//! # Examples
//!
//! ```rust,ignore
//! use guild_store::services::connector::StoreConnector;
//!
//! let connector = StoreConnector::builder(StoreConfig::mongodb_uri())
//!     .user(ModelDescriptor::schemaless("users"))
//!     .connect()
//!     .await?;
//!
//! match connector.get_user("u1").await? {
//!     Lookup::Found(user) => println!("{}", user),
//!     Lookup::NotFound => println!("생성 충돌 후에도 찾지 못함"),
//!     Lookup::NotConfigured => println!("사용자 모델 비활성화"),
//! }
//! ```

pub mod builder;
pub mod members;
pub mod store_connector;

pub use builder::StoreConnectorBuilder;
pub use store_connector::StoreConnector;
