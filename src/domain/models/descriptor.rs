//! # 모델 디스크립터
//!
//! 엔티티 종류가 저장소에서 어떻게 표현되는지를 기술합니다.
//! 컬렉션 이름과 "빈 템플릿" 문서로 구성됩니다. 빈 템플릿은 새 모델 인스턴스를
//! 기본 생성했을 때의 모습(`_id: null` + 스키마 기본값)이며, 업데이트 시
//! 저장된 문서를 병합할 구조적 뼈대로 사용됩니다.

use mongodb::bson::{self, Bson, Document};
use serde::Serialize;

use crate::domain::entities::{ID_FIELD, MEMBERS_FIELD};
use crate::errors::errors::StoreResult;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    name: String,
    template: Document,
}

impl ModelDescriptor {
    /// 컬렉션 이름과 템플릿으로 디스크립터를 생성합니다.
    ///
    /// 템플릿에 `_id`가 없으면 `null`로 채워집니다.
    ///
    /// # 예제
    ///
    /// ```rust
    /// use mongodb::bson::{doc, Bson};
    /// use guild_store::domain::models::descriptor::ModelDescriptor;
    ///
    /// let users = ModelDescriptor::new("users", doc! { "nickname": Bson::Null });
    /// assert_eq!(users.template().get("_id"), Some(&Bson::Null));
    /// ```
    pub fn new(name: impl Into<String>, template: Document) -> Self {
        let mut template = template;
        if !template.contains_key(ID_FIELD) {
            let mut with_id = Document::new();
            with_id.insert(ID_FIELD, Bson::Null);
            for (key, value) in template {
                with_id.insert(key, value);
            }
            template = with_id;
        }

        Self {
            name: name.into(),
            template,
        }
    }

    /// 스키마 필드가 정해지지 않은 디스크립터
    pub fn schemaless(name: impl Into<String>) -> Self {
        Self::new(name, Document::new())
    }

    /// `Default` 구조체를 직렬화하여 템플릿을 만듭니다.
    ///
    /// ```rust,ignore
    /// #[derive(Default, Serialize)]
    /// struct UserSchema {
    ///     nickname: Option<String>,
    ///     #[serde(rename = "joinedAt")]
    ///     joined_at: Option<bson::DateTime>,
    /// }
    ///
    /// let users = ModelDescriptor::from_default::<UserSchema>("users")?;
    /// ```
    pub fn from_default<T>(name: impl Into<String>) -> StoreResult<Self>
    where
        T: Default + Serialize,
    {
        let template = bson::to_document(&T::default())?;
        Ok(Self::new(name, template))
    }

    /// 길드 디스크립터로 사용할 수 있도록 `members` 배열을 보장합니다.
    pub fn with_members(mut self) -> Self {
        if !matches!(self.template.get(MEMBERS_FIELD), Some(Bson::Array(_))) {
            self.template.insert(MEMBERS_FIELD, Bson::Array(Vec::new()));
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 빈 템플릿
    pub fn template(&self) -> &Document {
        &self.template
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[derive(Default, Serialize)]
    struct UserSchema {
        nickname: Option<String>,
        #[serde(rename = "joinedAt")]
        joined_at: Option<String>,
    }

    #[test]
    fn test_new_inserts_null_id_first() {
        let descriptor = ModelDescriptor::new("users", doc! { "nickname": Bson::Null });

        assert_eq!(descriptor.name(), "users");
        assert_eq!(
            descriptor.template(),
            &doc! { "_id": Bson::Null, "nickname": Bson::Null }
        );
        assert_eq!(descriptor.template().keys().next().map(String::as_str), Some("_id"));
    }

    #[test]
    fn test_new_keeps_explicit_id_default() {
        let descriptor = ModelDescriptor::new("users", doc! { "_id": "", "level": 0 });

        assert_eq!(descriptor.template(), &doc! { "_id": "", "level": 0 });
    }

    #[test]
    fn test_from_default_serializes_schema() {
        let descriptor = ModelDescriptor::from_default::<UserSchema>("users").unwrap();

        assert_eq!(
            descriptor.template(),
            &doc! { "_id": Bson::Null, "nickname": Bson::Null, "joinedAt": Bson::Null }
        );
    }

    #[test]
    fn test_with_members_adds_empty_array() {
        let descriptor = ModelDescriptor::schemaless("guilds").with_members();

        assert_eq!(descriptor.template(), &doc! { "_id": Bson::Null, "members": [] });
    }

    #[test]
    fn test_with_members_keeps_declared_array() {
        let descriptor =
            ModelDescriptor::new("guilds", doc! { "members": [{ "_id": "seed" }] }).with_members();

        assert_eq!(
            descriptor.template().get_array("members").unwrap().len(),
            1
        );
    }
}
