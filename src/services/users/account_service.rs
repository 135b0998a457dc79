//! # 계정 서비스
//!
//! HTTP 핸들러가 호출하는 계정 유스케이스를 조합합니다.
//!
//! ```text
//! handlers::users ──▶ AccountService ──┬──▶ CredentialService ──▶ UserStore
//!                                      └──▶ TokenService      ──▶ TokenStore
//! ```
//!
//! 로그아웃은 토큰 폐기 결과를 원인별로 분기해 로그에 남기고,
//! 외부에는 원인과 무관하게 같은 400 응답을 돌려줍니다.

use std::sync::Arc;

use validator::Validate;

use crate::core::{AppError, AppResult, TokenError, NON_FIELD_ERRORS};
use crate::domain::dto::tokens::{AccessTokenResponse, RefreshRequest};
use crate::domain::dto::users::request::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, UpdateAccountRequest,
};
use crate::domain::dto::users::response::{LoginResponse, RegisterResponse, UserResponse};
use crate::domain::entities::users::ProfileChanges;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::UserStore;
use crate::services::auth::TokenService;
use crate::services::users::CredentialService;

const LOGOUT_FAILED: &str = "유효하지 않은 refresh 토큰입니다";

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    credentials: CredentialService,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, credentials: CredentialService, tokens: TokenService) -> Self {
        Self {
            users,
            credentials,
            tokens,
        }
    }

    /// 회원가입 후 토큰 쌍 발급
    ///
    /// 사용자 생성 뒤 토큰 발급이 실패해도 생성된 사용자는 유지됩니다.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let user = self.credentials.register(request).await?;

        let tokens = self.tokens.issue(&user).await.map_err(|e| {
            log::error!(
                "가입 후 토큰 발급 실패 - username: {}, 에러: {}",
                user.username,
                e
            );
            e
        })?;

        log::info!("회원가입 완료 - username: {}", user.username);
        Ok(RegisterResponse::new(user, tokens))
    }

    /// 로그인
    ///
    /// 자격 증명 실패(없는 사용자, 틀린 비밀번호, 비활성 계정)는 401이 아니라
    /// `non_field_errors` 하나만 담긴 400입니다. 401은 Bearer 토큰 문제에만 씁니다.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .credentials
            .authenticate(&request.username, &request.password)
            .await
            .map_err(|e| match e {
                AppError::AuthenticationError(message) => AppError::field(NON_FIELD_ERRORS, message),
                other => other,
            })?;
        let tokens = self.tokens.issue(&user).await?;

        log::info!("로그인 - username: {}", user.username);
        Ok(LoginResponse::new(user, tokens))
    }

    /// 리프레시 토큰 폐기
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 모든 실패 (형식 오류, 만료, 발급 기록 없음, 이미 폐기, 저장소 오류)
    pub async fn logout(&self, caller: &AuthenticatedUser, refresh_token: &str) -> AppResult<()> {
        match self.tokens.revoke(refresh_token).await {
            Ok(()) => {
                log::info!("로그아웃 - user_id: {}", caller.user_id);
                Ok(())
            }
            Err(AppError::Token(TokenError::Revoked)) => {
                log::warn!("이미 폐기된 토큰으로 로그아웃 시도 - user_id: {}", caller.user_id);
                Err(AppError::ValidationError(LOGOUT_FAILED.to_string()))
            }
            Err(AppError::Token(TokenError::Expired)) => {
                log::warn!("만료된 토큰으로 로그아웃 시도 - user_id: {}", caller.user_id);
                Err(AppError::ValidationError(LOGOUT_FAILED.to_string()))
            }
            Err(AppError::Token(TokenError::Invalid)) => {
                log::warn!("유효하지 않은 토큰으로 로그아웃 시도 - user_id: {}", caller.user_id);
                Err(AppError::ValidationError(LOGOUT_FAILED.to_string()))
            }
            Err(e) => {
                log::error!("로그아웃 처리 실패 - user_id: {}, 에러: {}", caller.user_id, e);
                Err(AppError::ValidationError(LOGOUT_FAILED.to_string()))
            }
        }
    }

    pub async fn refresh(&self, request: RefreshRequest) -> AppResult<AccessTokenResponse> {
        request.validate()?;

        let access = self.tokens.refresh(&request.refresh).await.map_err(|e| {
            if let AppError::Token(cause) = &e {
                log::debug!("토큰 갱신 거부 - 원인: {}", cause);
            }
            e
        })?;

        Ok(AccessTokenResponse { access })
    }

    /// 비밀번호 재설정. 확인 값이 다르면 해시는 바뀌지 않습니다.
    pub async fn reset_password(
        &self,
        caller: &AuthenticatedUser,
        request: ResetPasswordRequest,
    ) -> AppResult<()> {
        request.validate()?;

        self.credentials
            .reset_password(&caller.object_id()?, &request.password1)
            .await
    }

    pub async fn update_profile(
        &self,
        caller: &AuthenticatedUser,
        request: UpdateAccountRequest,
    ) -> AppResult<UserResponse> {
        request.validate()?;

        let changes = ProfileChanges::from(request);
        let updated = self
            .users
            .update_profile(&caller.object_id()?, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(updated))
    }

    /// 계정과 소유 배송지 삭제
    pub async fn delete_account(&self, caller: &AuthenticatedUser) -> AppResult<()> {
        if !self.users.delete_cascade(&caller.object_id()?).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("계정 삭제 - user_id: {}", caller.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtSettings;
    use crate::repositories::MemoryStore;
    use chrono::{Duration, NaiveDate};

    fn service(store: Arc<MemoryStore>) -> AccountService {
        let credentials = CredentialService::new(store.clone(), 4).unwrap();
        let tokens = TokenService::new(
            store.clone(),
            JwtSettings::new("test-secret", Duration::minutes(5), Duration::days(1)),
        );
        AccountService::new(store, credentials, tokens)
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "maria".to_string(),
            password: "s3cure-pass".to_string(),
            email: "maria@example.com".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Kuznetsova".to_string(),
            birthday: NaiveDate::from_ymd_opt(1995, 11, 3),
        }
    }

    #[actix_web::test]
    async fn test_logout_failures_are_uniform() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store);
        let registered = service.register(register_request()).await.unwrap();
        let caller = AuthenticatedUser {
            user_id: registered.id.clone(),
            role: Default::default(),
        };

        assert!(service.logout(&caller, &registered.tokens.refresh).await.is_ok());

        let reused = service
            .logout(&caller, &registered.tokens.refresh)
            .await
            .unwrap_err();
        let garbage = service.logout(&caller, "garbage").await.unwrap_err();

        assert!(matches!(reused, AppError::ValidationError(_)));
        assert_eq!(reused.to_string(), garbage.to_string());
    }

    #[actix_web::test]
    async fn test_login_failures_are_field_errors() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store);
        service.register(register_request()).await.unwrap();

        let wrong_password = service
            .login(LoginRequest {
                username: "maria".to_string(),
                password: "not-her-pass".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = service
            .login(LoginRequest {
                username: "nobody".to_string(),
                password: "s3cure-pass".to_string(),
            })
            .await
            .unwrap_err();

        match (&wrong_password, &unknown_user) {
            (AppError::InvalidFields(a), AppError::InvalidFields(b)) => {
                assert!(a.contains_key(NON_FIELD_ERRORS));
                assert_eq!(a, b);
            }
            other => panic!("Expected InvalidFields, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_reset_mismatch_keeps_hash() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());
        let registered = service.register(register_request()).await.unwrap();
        let caller = AuthenticatedUser {
            user_id: registered.id.clone(),
            role: Default::default(),
        };
        let before = store
            .find_by_username("maria")
            .await
            .unwrap()
            .unwrap()
            .password_hash;

        let err = service
            .reset_password(
                &caller,
                ResetPasswordRequest {
                    password1: "brand-new-pass".to_string(),
                    password2: "different-pass".to_string(),
                },
            )
            .await
            .unwrap_err();

        let after = store
            .find_by_username("maria")
            .await
            .unwrap()
            .unwrap()
            .password_hash;

        assert!(matches!(err, AppError::InvalidFields(_)));
        assert_eq!(before, after);
    }

    #[actix_web::test]
    async fn test_delete_account_removes_user() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());
        let registered = service.register(register_request()).await.unwrap();
        let caller = AuthenticatedUser {
            user_id: registered.id.clone(),
            role: Default::default(),
        };

        service.delete_account(&caller).await.unwrap();

        assert_eq!(store.user_count().unwrap(), 0);
        assert!(matches!(
            service.delete_account(&caller).await,
            Err(AppError::NotFound(_))
        ));
    }
}
