//! 조회 결과 타입

/// 조회형 연산의 결과
///
/// 설정되지 않은 엔티티 종류, 존재하지 않는 문서, 성공을 명시적으로 구분합니다.
/// 드라이버 오류는 이 타입이 아니라 `StoreError`로 전달됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// 디스크립터가 없어 비활성화된 엔티티 종류
    NotConfigured,
    /// 생성 충돌 후 재조회에서도 찾지 못함
    NotFound,
    Found(T),
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(Lookup::from(Some(1)), Lookup::Found(1));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }
}
