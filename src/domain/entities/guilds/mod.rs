//! Guild Entity Module
//!
//! 길드 문서와 내장 멤버 배열을 다루는 함수들입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::guilds::guild;
//!
//! if let Some(member) = guild::find_member(&guild_doc, "m1") {
//!     return Ok(Lookup::Found(member));
//! }
//! ```

pub mod guild;
