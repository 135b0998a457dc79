use serde::{Deserialize, Serialize};

/// 토큰 갱신 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access: String,
}
