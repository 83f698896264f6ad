//! 서비스 계층 모듈
//!
//! - [`connector`] - 엔티티 컬렉션을 중개하는 저장소 커넥터

pub mod connector;
