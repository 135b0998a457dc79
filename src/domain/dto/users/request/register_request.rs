//! 회원가입 요청 DTO
//!
//! 필수 필드가 빠진 경우에도 serde 단계가 아닌 validator 단계에서
//! 필드별 에러로 응답하도록 모든 필드에 기본값을 둡니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::string_utils::deserialize_trimmed;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 150, message = "사용자명은 1-150자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 8, max = 128, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 150, message = "이름은 1-150자 사이여야 합니다"))]
    pub first_name: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 150, message = "성은 1-150자 사이여야 합니다"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(required(message = "생년월일은 필수입니다"))]
    pub birthday: Option<NaiveDate>,
}

/// 영문/숫자/한글 등 문자와 `@ . + - _`만 허용
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 문자, 숫자, @/./+/-/_ 만 사용할 수 있습니다".into()));
    }
    Ok(())
}

/// 숫자로만 된 비밀번호 거부
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("numeric_password")
            .with_message("비밀번호는 숫자로만 구성될 수 없습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegisterRequest {
        RegisterRequest {
            username: "ivan.petrov".to_string(),
            password: "s3cure-pass".to_string(),
            email: "ivan@example.com".to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported_per_field() {
        let request: RegisterRequest = serde_json::from_str(r#"{"username": "ivan"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("birthday"));
        assert!(!fields.contains_key("username"));
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("courier_01@city").is_ok());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("semi;colon").is_err());
    }

    #[test]
    fn test_numeric_password_rejected() {
        let mut request = valid();
        request.password = "1234567890".to_string();

        assert!(request.validate().unwrap_err().field_errors().contains_key("password"));
    }

    #[test]
    fn test_birthday_wire_format() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"birthday": "1990-05-17"}"#).unwrap();
        assert_eq!(request.birthday, NaiveDate::from_ymd_opt(1990, 5, 17));
    }
}
