//! # Domain Entities Module
//!
//! 저장소가 다루는 세 가지 엔티티 종류와 문서 필드 규약을 정의합니다.
//!
//! 엔티티는 문자열 `_id`로 식별되는 BSON 문서입니다.
//!
//! ```text
//! users   { _id, ... }
//! guilds  { _id, ..., members: [ { _id, ... }, ... ] }
//!                      └─ GuildMember: 길드에 내장되며 독립적으로 존재하지 않음
//! ```
//!
//! - [`guilds`] - 길드 문서의 `members` 배열을 다루는 함수들

use std::fmt;

use mongodb::bson::Document;

pub mod guilds;

/// 문서 식별자 필드
pub const ID_FIELD: &str = "_id";

/// 길드 문서에 내장된 멤버 배열 필드
pub const MEMBERS_FIELD: &str = "members";

/// 엔티티 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Guild,
    GuildMember,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Guild => "guild",
            EntityKind::GuildMember => "guild_member",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `_id`만 채워진 최소 문서
pub fn bare_document(id: &str) -> Document {
    let mut document = Document::new();
    document.insert(ID_FIELD, id);
    document
}

/// `_id` 동등 비교 필터
pub fn id_filter(id: &str) -> Document {
    bare_document(id)
}

/// 문서의 문자열 `_id`를 반환합니다.
pub fn document_id(document: &Document) -> Option<&str> {
    document.get_str(ID_FIELD).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_document_has_only_id() {
        let document = bare_document("u1");

        assert_eq!(document.len(), 1);
        assert_eq!(document_id(&document), Some("u1"));
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::GuildMember.to_string(), "guild_member");
        assert_eq!(EntityKind::User.as_str(), "user");
    }
}
