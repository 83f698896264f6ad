//! # 문서 딥 머지
//!
//! BSON 문서의 구조적 병합 유틸리티입니다.
//!
//! ## 규칙
//!
//! - 소스 값이 하위 문서이면 타깃의 같은 키에 하위 문서를 보장한 뒤 재귀적으로 병합
//! - 그 외의 값(배열 포함)은 타깃 값을 통째로 덮어씀
//! - 타깃에만 있는 키는 그대로 유지
//!
//! 빈 템플릿 위에 저장된 문서를 병합하면, 스키마에 새로 추가되었지만 오래된 문서에는
//! 없는 필드가 기본값으로 채워집니다.

use mongodb::bson::{Bson, Document};

/// 여러 소스 문서를 왼쪽부터 순서대로 타깃에 병합합니다.
///
/// 타깃을 직접 변경하며, 변경된 타깃을 반환합니다.
///
/// # 예제
///
/// ```rust
/// use mongodb::bson::doc;
/// use guild_store::utils::merge::merge_deep;
///
/// let mut template = doc! { "a": { "b": 0, "c": 2 } };
/// merge_deep(&mut template, &[&doc! { "a": { "b": 1 } }]);
///
/// assert_eq!(template, doc! { "a": { "b": 1, "c": 2 } });
/// ```
pub fn merge_deep<'a>(target: &'a mut Document, sources: &[&Document]) -> &'a mut Document {
    for source in sources {
        merge_deep_into(target, source);
    }
    target
}

/// 단일 소스 문서를 타깃에 병합합니다.
pub fn merge_deep_into<'a>(target: &'a mut Document, source: &Document) -> &'a mut Document {
    for (key, value) in source {
        match value {
            Bson::Document(nested) => {
                // 타깃에 하위 문서가 없거나 스칼라/배열이면 빈 문서로 교체
                if !matches!(target.get(key), Some(Bson::Document(_))) {
                    target.insert(key.clone(), Document::new());
                }
                if let Some(Bson::Document(child)) = target.get_mut(key) {
                    merge_deep_into(child, nested);
                }
            }
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
    target
}

/// 두 문서를 병합한 새 문서를 반환합니다. 입력은 변경되지 않습니다.
pub fn merged(template: &Document, source: &Document) -> Document {
    let mut result = template.clone();
    merge_deep(&mut result, &[source]);
    result
}
