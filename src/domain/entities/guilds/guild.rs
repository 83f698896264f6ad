//! Guild Entity Implementation
//!
//! 길드 문서의 `members` 배열 조회 함수입니다.
//! 멤버 `_id`는 소유 길드의 배열 안에서 유일해야 합니다.
//! 배열 쓰기는 저장소의 원소 단위 연산(`push_element`, `replace_element`)으로만 이루어집니다.

use mongodb::bson::{Bson, Document};

use crate::domain::entities::{MEMBERS_FIELD, document_id};

/// 멤버 배열을 반환합니다. 필드가 없으면 빈 슬라이스입니다.
pub fn members(guild: &Document) -> &[Bson] {
    match guild.get(MEMBERS_FIELD) {
        Some(Bson::Array(members)) => members.as_slice(),
        _ => &[],
    }
}

/// 멤버 `_id`의 배열 위치
pub fn member_index(guild: &Document, member_id: &str) -> Option<usize> {
    members(guild).iter().position(|member| match member {
        Bson::Document(member) => document_id(member) == Some(member_id),
        _ => false,
    })
}

/// 멤버 서브 문서 사본을 반환합니다.
pub fn find_member(guild: &Document, member_id: &str) -> Option<Document> {
    member_index(guild, member_id).and_then(|index| match &members(guild)[index] {
        Bson::Document(member) => Some(member.clone()),
        _ => None,
    })
}
