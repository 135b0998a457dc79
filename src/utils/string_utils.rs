//! # 문자열 유틸리티
//!
//! 요청 DTO의 역직렬화/검증 단계에서 쓰는 문자열 정리 함수들입니다.

use serde::Deserialize;
use validator::ValidationError;

/// 공백만 있는 선택 문자열을 `None`으로 정리
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  3  ".into())), Some("3".into()));
/// assert_eq!(clean_optional_string(Some("   ".into())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// validator `custom` 함수: 공백만 있는 값 거부
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("이 필드는 비워둘 수 없습니다".into()));
    }
    Ok(())
}

/// 앞뒤 공백을 제거하며 역직렬화
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 부분 수정(PATCH)용 선택 필드
///
/// `#[serde(default)]`와 함께 사용합니다.
/// 필드 없음 → `None` (변경 없음), `null`/빈 문자열 → `Some(None)` (값 제거),
/// 문자열 → `Some(Some(..))`.
pub fn deserialize_patch_string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(Some(clean_optional_string(opt)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Location {
        #[serde(deserialize_with = "deserialize_trimmed")]
        city: String,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        flat: Option<String>,
        #[serde(default, deserialize_with = "deserialize_patch_string")]
        floor: Option<Option<String>>,
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some(" 12 ".to_string())), Some("12".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Lenina").is_ok());
        assert!(not_blank(" \t").is_err());
    }

    #[test]
    fn test_trimmed_and_optional_fields() {
        let location: Location = serde_json::from_str(r#"{"city": "  Kazan ", "flat": "  "}"#).unwrap();

        assert_eq!(location.city, "Kazan");
        assert_eq!(location.flat, None);
        assert_eq!(location.floor, None);
    }

    #[test]
    fn test_patch_field_distinguishes_null_from_absent() {
        let cleared: Location = serde_json::from_str(r#"{"city": "Kazan", "floor": null}"#).unwrap();
        let set: Location = serde_json::from_str(r#"{"city": "Kazan", "floor": " 4 "}"#).unwrap();

        assert_eq!(cleared.floor, Some(None));
        assert_eq!(set.floor, Some(Some("4".to_string())));
    }
}
