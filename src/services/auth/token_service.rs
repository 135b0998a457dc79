//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명한 액세스/리프레시 토큰 쌍을 발급하고 검증합니다.
//!
//! - 액세스 토큰: 서명, 만료, 토큰 타입만 확인하는 무상태 토큰
//! - 리프레시 토큰: 발급 시 기록되고 로그아웃 시 정확히 한 번 블랙리스트에 등록

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{oid::ObjectId, DateTime};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::core::{AppError, AppResult, ErrorContext, TokenError};
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::{
    BlacklistedToken, OutstandingToken, TokenClaims, TokenPair, TokenType,
};
use crate::repositories::TokenStore;

/// JWT 토큰 관리 서비스
///
/// 서명 키와 수명은 시작 시 한 번 만들어진 [`JwtSettings`]에서만 읽습니다.
#[derive(Clone)]
pub struct TokenService {
    tokens: Arc<dyn TokenStore>,
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(tokens: Arc<dyn TokenStore>, settings: JwtSettings) -> Self {
        Self { tokens, settings }
    }

    fn sign(&self, user: &User, token_type: TokenType, ttl: chrono::Duration) -> AppResult<TokenClaims> {
        let now = Utc::now();

        Ok(TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            role: user.role,
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        })
    }

    fn encode_claims(&self, claims: &TokenClaims) -> AppResult<String> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.settings.secret()),
        )
        .context("JWT 토큰 생성 실패")
    }

    /// 액세스/리프레시 토큰 쌍 발급
    ///
    /// 리프레시 토큰은 발급 기록(outstanding)이 저장된 뒤에만 반환됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 사용자 ID 없음 또는 서명 실패
    /// * 저장소 에러 - 발급 기록 실패
    pub async fn issue(&self, user: &User) -> AppResult<TokenPair> {
        let access_claims = self.sign(user, TokenType::Access, self.settings.access_ttl())?;
        let refresh_claims = self.sign(user, TokenType::Refresh, self.settings.refresh_ttl())?;

        let access = self.encode_claims(&access_claims)?;
        let refresh = self.encode_claims(&refresh_claims)?;

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        self.tokens
            .record_outstanding(OutstandingToken {
                jti: refresh_claims.jti,
                user_id,
                created_at: DateTime::from_millis(refresh_claims.iat * 1000),
                expires_at: DateTime::from_millis(refresh_claims.exp * 1000),
            })
            .await?;

        log::debug!("토큰 쌍 발급 - user_id: {}", access_claims.sub);
        Ok(TokenPair { refresh, access })
    }

    /// 서명과 만료를 검증하고 클레임 추출 (저장소 조회 없음)
    pub fn decode_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<TokenClaims>(token, &DecodingKey::from_secret(self.settings.secret()), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    fn expect_type(claims: TokenClaims, expected: TokenType) -> Result<TokenClaims, TokenError> {
        if claims.token_type == expected {
            Ok(claims)
        } else {
            Err(TokenError::Invalid)
        }
    }

    /// 액세스 토큰 검증 후 인증 신원 반환
    pub fn verify_access(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        let claims = Self::expect_type(self.decode_claims(token)?, TokenType::Access)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }

    /// 리프레시 토큰으로 새 액세스 토큰 발급
    ///
    /// # Errors
    ///
    /// * `TokenError::Expired` / `TokenError::Invalid` - 서명, 만료, 타입, 발급 기록 검증 실패
    /// * `TokenError::Revoked` - 블랙리스트에 등록된 토큰
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = Self::expect_type(self.decode_claims(refresh_token)?, TokenType::Refresh)?;

        if !self.tokens.is_outstanding(&claims.jti).await? {
            return Err(TokenError::Invalid.into());
        }
        if self.tokens.is_blacklisted(&claims.jti).await? {
            return Err(TokenError::Revoked.into());
        }

        let now = Utc::now();
        let access = TokenClaims {
            sub: claims.sub,
            role: claims.role,
            token_type: TokenType::Access,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.settings.access_ttl()).timestamp(),
        };

        self.encode_claims(&access)
    }

    /// 리프레시 토큰 폐기 (로그아웃)
    ///
    /// 토큰당 정확히 한 번만 성공합니다. 같은 토큰으로 동시에 호출해도
    /// 블랙리스트의 jti unique 제약 때문에 하나만 `Ok`가 됩니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::Invalid` - 형식/서명/타입 오류 또는 발급 기록 없음
    /// * `TokenError::Expired` - 만료된 토큰
    /// * `TokenError::Revoked` - 이미 폐기된 토큰
    pub async fn revoke(&self, refresh_token: &str) -> AppResult<()> {
        let claims = Self::expect_type(self.decode_claims(refresh_token)?, TokenType::Refresh)?;

        if !self.tokens.is_outstanding(&claims.jti).await? {
            return Err(TokenError::Invalid.into());
        }

        let user_id = ObjectId::parse_str(&claims.sub).map_err(|_| TokenError::Invalid)?;
        let entry = BlacklistedToken::logout(
            claims.jti,
            user_id,
            DateTime::from_millis(claims.exp * 1000),
        );

        if self.tokens.blacklist(entry).await? {
            Ok(())
        } else {
            Err(TokenError::Revoked.into())
        }
    }

    /// `Authorization` 헤더 값에서 Bearer 토큰 추출
    pub fn extract_bearer_token(auth_header: &str) -> Result<&str, TokenError> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(TokenError::Invalid)
    }
}
