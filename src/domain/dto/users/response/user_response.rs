//! 사용자 응답 DTO
//!
//! 비밀번호 해시와 권한 플래그는 어떤 응답에도 포함되지 않습니다.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{Role, User};
use crate::domain::models::token::TokenPair;

pub(crate) fn to_utc(value: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// 계정 조회/수정 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            created_at: to_utc(user.created_at),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birthday: user.birthday,
            role: user.role,
        }
    }
}

/// 회원가입 응답 (201)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub tokens: TokenPair,
}

impl RegisterResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            created_at: to_utc(user.created_at),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birthday: user.birthday,
            tokens,
        }
    }
}

/// 로그인 응답 (200)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub tokens: TokenPair,
}

impl LoginResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            birthday: user.birthday,
            tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_never_exposes_hash() {
        let mut user = User::new(
            "ivan".to_string(),
            "ivan@example.com".to_string(),
            "$2b$04$secrethash".to_string(),
            "Ivan".to_string(),
            "Petrov".to_string(),
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        );
        user.id = Some(mongodb::bson::oid::ObjectId::new());

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(!json.contains("secrethash"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"birthday\":\"1990-05-17\""));
    }

    #[test]
    fn test_to_utc_preserves_millis() {
        let now = mongodb::bson::DateTime::now();
        assert_eq!(to_utc(now).timestamp_millis(), now.timestamp_millis());
    }
}
