//! # 자격 증명 서비스
//!
//! 사용자 생성, 비밀번호 검증, 비밀번호 교체를 담당합니다.
//!
//! ## 보안 규칙
//!
//! - 평문 비밀번호는 저장하지 않고 bcrypt 해시만 저장
//! - 인증 실패는 원인(없는 사용자, 틀린 비밀번호, 비활성 계정)과 무관하게 같은 메시지
//! - 없는 사용자도 더미 해시로 검증을 한 번 수행해 응답 시간으로 존재 여부가 드러나지 않음

use std::sync::Arc;

use bcrypt::{hash, verify};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::{AppError, AppResult};
use crate::domain::dto::users::request::RegisterRequest;
use crate::domain::entities::users::User;
use crate::repositories::UserStore;

const INVALID_CREDENTIALS: &str = "사용자명 또는 비밀번호가 올바르지 않습니다";

/// 자격 증명 서비스
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
    /// 없는 사용자 검증용 해시 (같은 cost)
    dummy_hash: String,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> AppResult<Self> {
        let dummy_hash = hash("timing-equalizer", bcrypt_cost)?;

        Ok(Self {
            users,
            bcrypt_cost,
            dummy_hash,
        })
    }

    fn build_user(&self, request: RegisterRequest) -> AppResult<User> {
        let birthday = request
            .birthday
            .ok_or_else(|| AppError::field("birthday", "생년월일은 필수입니다"))?;

        let start = std::time::Instant::now();
        let password_hash = hash(&request.password, self.bcrypt_cost)?;
        log::debug!("Password hashing took: {:?}", start.elapsed());

        Ok(User::new(
            request.username,
            request.email,
            password_hash,
            request.first_name,
            request.last_name,
            birthday,
        ))
    }

    /// 새 사용자 등록
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidFields` - 입력 검증 실패 또는 username/email 중복 (저장되지 않음)
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        let user = self.build_user(request)?;
        self.users.insert(user).await
    }

    /// 관리자 계정 생성 (staff + superuser + Admin 역할)
    pub async fn provision_superuser(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        let user = self.build_user(request)?.into_superuser();
        let created = self.users.insert(user).await?;

        log::info!("관리자 계정 생성 - username: {}", created.username);
        Ok(created)
    }

    /// 사용자명과 비밀번호로 인증
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 모든 인증 실패에 같은 메시지
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.users.find_by_username(username).await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(self.dummy_hash.as_str());

        let password_ok = verify(password, stored_hash).unwrap_or(false);

        match user {
            Some(user) if password_ok && user.is_active => Ok(user),
            Some(user) => {
                log::warn!(
                    "로그인 실패 - username: {}, 비밀번호 일치: {}, 활성: {}",
                    username,
                    password_ok,
                    user.is_active
                );
                Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))
            }
            None => {
                log::warn!("로그인 실패 - 존재하지 않는 사용자: {}", username);
                Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    /// 비밀번호 해시 교체
    ///
    /// 확인 비밀번호 일치 여부는 호출 전에 검증되어야 합니다.
    pub async fn reset_password(&self, user_id: &ObjectId, new_password: &str) -> AppResult<()> {
        let password_hash = hash(new_password, self.bcrypt_cost)?;

        if !self.users.update_password_hash(user_id, &password_hash).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("비밀번호 변경 - user_id: {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::Role;
    use crate::repositories::MemoryStore;
    use chrono::NaiveDate;

    const TEST_COST: u32 = 4;

    fn request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: "s3cure-pass".to_string(),
            email: email.to_string(),
            first_name: "Anna".to_string(),
            last_name: "Ivanova".to_string(),
            birthday: NaiveDate::from_ymd_opt(1992, 7, 14),
        }
    }

    fn service(store: Arc<MemoryStore>) -> CredentialService {
        CredentialService::new(store, TEST_COST).unwrap()
    }

    #[actix_web::test]
    async fn test_register_hashes_password() {
        let store = Arc::new(MemoryStore::new());
        let user = service(store).register(request("anna", "anna@example.com")).await.unwrap();

        assert_ne!(user.password_hash, "s3cure-pass");
        assert!(verify("s3cure-pass", &user.password_hash).unwrap());
        assert_eq!(user.role, Role::Client);
        assert!(user.is_active);
    }

    #[actix_web::test]
    async fn test_duplicate_username_creates_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());
        service.register(request("anna", "anna@example.com")).await.unwrap();

        let err = service
            .register(request("anna", "other@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidFields(ref f) if f.contains_key("username")));
        assert_eq!(store.user_count().unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_authentication_failures_share_message() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store);
        service.register(request("anna", "anna@example.com")).await.unwrap();

        let wrong_password = service.authenticate("anna", "wrong-pass").await.unwrap_err();
        let unknown_user = service.authenticate("nobody", "s3cure-pass").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(service.authenticate("anna", "s3cure-pass").await.is_ok());
    }

    #[actix_web::test]
    async fn test_inactive_user_cannot_authenticate() {
        let store = Arc::new(MemoryStore::new());
        let mut user = User::new(
            "sleeper".to_string(),
            "sleeper@example.com".to_string(),
            hash("s3cure-pass", TEST_COST).unwrap(),
            "Oleg".to_string(),
            "Smirnov".to_string(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        );
        user.is_active = false;
        UserStore::insert(store.as_ref(), user).await.unwrap();

        let err = service(store).authenticate("sleeper", "s3cure-pass").await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[actix_web::test]
    async fn test_provision_superuser() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(store)
            .provision_superuser(request("root", "root@example.com"))
            .await
            .unwrap();

        assert!(admin.is_staff && admin.is_superuser);
        assert_eq!(admin.role, Role::Admin);
    }

    #[actix_web::test]
    async fn test_reset_password_replaces_hash() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store);
        let user = service.register(request("anna", "anna@example.com")).await.unwrap();

        service
            .reset_password(user.id.as_ref().unwrap(), "another-pass")
            .await
            .unwrap();

        assert!(service.authenticate("anna", "another-pass").await.is_ok());
        assert!(service.authenticate("anna", "s3cure-pass").await.is_err());
    }
}
