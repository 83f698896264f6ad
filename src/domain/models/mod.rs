//! # Domain Models Module
//!
//! - [`descriptor`] - 컬렉션 이름과 빈 템플릿을 묶은 [`ModelDescriptor`](descriptor::ModelDescriptor)
//! - [`lookup`] - 조회 결과 [`Lookup`](lookup::Lookup)

pub mod descriptor;
pub mod lookup;

pub use descriptor::*;
pub use lookup::*;
