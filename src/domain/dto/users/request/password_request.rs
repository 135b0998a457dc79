//! 비밀번호 재설정 요청 DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::register_request::validate_password_strength;

/// `password1`과 `password2`가 같아야 하며, 다르면 해시는 바뀌지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 8, max = 128, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password1: String,

    #[serde(default)]
    pub password2: String,
}

fn validate_passwords_match(req: &ResetPasswordRequest) -> Result<(), ValidationError> {
    if req.password1 != req.password2 {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_passwords_pass() {
        let request = ResetPasswordRequest {
            password1: "brand-new-pass".to_string(),
            password2: "brand-new-pass".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_mismatch_is_schema_error() {
        let request = ResetPasswordRequest {
            password1: "brand-new-pass".to_string(),
            password2: "brand-new-pasS".to_string(),
        };
        let errors = request.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("__all__"));
    }
}
