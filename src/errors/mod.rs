//! 에러 타입 모듈
//!
//! - [`errors`] - [`StoreError`](errors::StoreError), [`StoreResult`](errors::StoreResult)

#[allow(clippy::module_inception)]
pub mod errors;

pub use errors::*;
