//! User Entity Implementation
//!
//! 배송 서비스 계정 엔티티입니다.
//! `username`과 `email`은 전역 유일하며, 비밀번호는 bcrypt 해시로만 저장됩니다.

use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 계정 역할 (단일 값, 권한 엔진 아님)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    Client,
    Courier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Client => "Client",
            Role::Courier => "Courier",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 아이디 (unique)
    pub username: String,
    /// 이메일 (unique)
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    /// 비활성 계정은 로그인할 수 없음
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub role: Role,
    /// 가입 시각, 이후 변경되지 않음
    pub created_at: DateTime,
}

impl User {
    /// 새 일반 사용자 (활성, Client 역할)
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        birthday: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            username,
            email,
            password_hash,
            first_name,
            last_name,
            birthday,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            role: Role::default(),
            created_at: DateTime::now(),
        }
    }

    /// 관리자 권한 부여 (staff + superuser + Admin 역할)
    pub fn into_superuser(mut self) -> Self {
        self.is_staff = true;
        self.is_superuser = true;
        self.role = Role::Admin;
        self
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// 프로필 변경 사항 적용 (해시/생성 시각은 건드리지 않음)
    pub fn apply(&mut self, changes: &ProfileChanges) {
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(first_name) = &changes.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(birthday) = changes.birthday {
            self.birthday = birthday;
        }
    }
}

/// 계정 정보 부분 수정
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self == &ProfileChanges::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            "ivan".to_string(),
            "ivan@example.com".to_string(),
            "hash".to_string(),
            "Ivan".to_string(),
            "Petrov".to_string(),
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample();

        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert_eq!(user.role, Role::Client);
        assert_eq!(user.full_name(), "Ivan Petrov");
    }

    #[test]
    fn test_into_superuser() {
        let admin = sample().into_superuser();

        assert!(admin.is_staff && admin.is_superuser);
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_apply_profile_changes() {
        let mut user = sample();
        let created_at = user.created_at;
        user.apply(&ProfileChanges {
            email: Some("new@example.com".to_string()),
            last_name: Some("Sidorov".to_string()),
            ..Default::default()
        });

        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.first_name, "Ivan");
        assert_eq!(user.last_name, "Sidorov");
        assert_eq!(user.created_at, created_at);
        assert_eq!(user.password_hash, "hash");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Courier).unwrap(), "\"Courier\"");
        assert_eq!(Role::Admin.to_string(), "Admin");
    }
}
