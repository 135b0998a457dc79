//! JWT 클레임과 토큰 수명주기 기록
//!
//! 액세스 토큰은 서명과 만료만으로 검증되는 무상태 토큰입니다.
//! 리프레시 토큰은 발급 시 [`OutstandingToken`]으로 기록되고,
//! 로그아웃 시 [`BlacklistedToken`]으로 한 번만 폐기됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// HS256 JWT 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ObjectId (hex)
    pub sub: String,
    pub role: Role,
    pub token_type: TokenType,
    /// 토큰 고유 ID (uuid v4)
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 발급된 액세스/리프레시 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// 발급된 리프레시 토큰 기록 (`outstanding_tokens`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutstandingToken {
    pub jti: String,
    pub user_id: ObjectId,
    pub created_at: DateTime,
    pub expires_at: DateTime,
}

/// 폐기 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlacklistReason {
    Logout,
}

/// 폐기된 리프레시 토큰 기록 (`token_blacklist`, jti unique)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistedToken {
    pub jti: String,
    pub user_id: ObjectId,
    pub reason: BlacklistReason,
    pub blacklisted_at: DateTime,
    /// 원래 토큰의 만료 시각
    pub expires_at: DateTime,
}

impl BlacklistedToken {
    pub fn logout(jti: String, user_id: ObjectId, expires_at: DateTime) -> Self {
        Self {
            jti,
            user_id,
            reason: BlacklistReason::Logout,
            blacklisted_at: DateTime::now(),
            expires_at,
        }
    }

    /// 캐시 TTL로 쓰는 남은 수명 (초, 최소 1)
    pub fn remaining_seconds(&self) -> u64 {
        let remaining_ms = self.expires_at.timestamp_millis() - DateTime::now().timestamp_millis();
        (remaining_ms / 1000).max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_wire_format() {
        assert_eq!(serde_json::to_string(&TokenType::Refresh).unwrap(), "\"refresh\"");
        assert_eq!(
            serde_json::from_str::<TokenType>("\"access\"").unwrap(),
            TokenType::Access
        );
    }

    #[test]
    fn test_remaining_seconds_never_zero() {
        let expired = BlacklistedToken::logout(
            "jti".to_string(),
            ObjectId::new(),
            DateTime::from_millis(0),
        );
        assert_eq!(expired.remaining_seconds(), 1);

        let later = DateTime::from_millis(DateTime::now().timestamp_millis() + 3_600_000);
        let live = BlacklistedToken::logout("jti".to_string(), ObjectId::new(), later);
        assert!(live.remaining_seconds() > 3_500);
    }
}
