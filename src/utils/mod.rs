//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`merge`] - BSON 문서 딥 머지
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::merge::merge_deep;
//!
//! let mut template = descriptor.template().clone();
//! merge_deep(&mut template, &[&stored]);
//! ```

pub mod merge;
