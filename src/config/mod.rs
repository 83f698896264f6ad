//! # Configuration Module
//!
//! 환경 변수 기반의 저장소 설정값을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`store_config`] - MongoDB 연결 정보와 실행 환경 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, StoreConfig};
//!
//! StoreConfig::load_env_file();
//!
//! let uri = StoreConfig::mongodb_uri();
//! let database = StoreConfig::database_name();
//! println!("{:?}: {} / {}", Environment::current(), uri, database);
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export PROFILE="dev"                              # dev, prod, 기타
//! export ENVIRONMENT="development"                  # development, test, staging, production
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="guild_store_dev"
//! export MONGODB_APP_NAME="guild_store"
//! ```

pub mod store_config;

pub use store_config::*;
