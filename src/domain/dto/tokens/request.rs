use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /users/token/refresh` 본문
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "refresh 토큰은 필수입니다"))]
    pub refresh: String,
}

/// `POST /users/logout` 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh: String,
}
