use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::string_utils::deserialize_trimmed;

/// 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "사용자명은 필수입니다"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,
}
