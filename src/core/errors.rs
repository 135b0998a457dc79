//! # Application Error Handling
//!
//! 계정/토큰/배송지 서비스 전역에서 사용하는 에러 타입입니다.
//! 모든 계층은 `AppError`를 반환하고, Actix-Web은 `ResponseError` 구현을 통해
//! 이를 일관된 JSON 응답으로 변환합니다.
//!
//! ## 상태 코드 매핑
//!
//! | 변형 | HTTP | 비고 |
//! |------|------|------|
//! | `ValidationError` | 400 | 단일 메시지 |
//! | `InvalidFields` | 400 | 필드별 메시지 맵 |
//! | `AuthenticationError` | 401 | Bearer 토큰의 신원 오류 (로그인 실패는 `InvalidFields`로 변환) |
//! | `Token` | 401 | 리프레시/액세스 토큰 거부 |
//! | `AuthorizationError` | 403 | 역할 부족 |
//! | `NotFound` | 404 | 소유하지 않은 리소스 포함 |
//! | `DatabaseError` / `RedisError` / `InternalError` | 500 | 상세 내용은 로그에만 기록 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find_address(&self, owner: &ObjectId, id: &str) -> AppResult<Address> {
//!     let id = ObjectId::parse_str(id)
//!         .map_err(|_| AppError::NotFound("배송지를 찾을 수 없습니다".to_string()))?;
//!
//!     self.addresses
//!         .find_for_owner(owner, Some(&id))
//!         .await?
//!         .into_iter()
//!         .next()
//!         .ok_or_else(|| AppError::NotFound("배송지를 찾을 수 없습니다".to_string()))
//! }
//! ```
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "Not found: 배송지를 찾을 수 없습니다" }
//! ```
//!
//! 필드 검증 실패는 필드별 메시지를 함께 돌려줍니다.
//!
//! ```json
//! {
//!   "error": "validation_error",
//!   "fields": { "username": ["이미 사용 중인 사용자명입니다"] }
//! }
//! ```

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// 스키마 수준(필드에 속하지 않는) 검증 에러가 기록되는 키
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// 토큰 검증/폐기 실패 원인
///
/// 로그아웃 게이트웨이는 이 값을 명시적으로 분기한 뒤 외부에는 동일한 400으로 응답하고,
/// 토큰 갱신 엔드포인트는 401로 응답합니다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// 서명은 유효하지만 `exp`가 지남
    #[error("token has expired")]
    Expired,

    /// 형식/서명/토큰 타입 오류 또는 발급 기록이 없는 토큰
    #[error("token is invalid")]
    Invalid,

    /// 블랙리스트에 등록된 리프레시 토큰
    #[error("token has been revoked")]
    Revoked,
}

/// 애플리케이션 전역 에러
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 필드명 → 메시지 목록
    #[error("Validation error: {0:?}")]
    InvalidFields(BTreeMap<String, Vec<String>>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 단일 필드에 대한 검증 에러 생성
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec![message.into()]);
        AppError::InvalidFields(fields)
    }

    /// 저장소 계층에서 발생한 에러인지 여부 (500 계열)
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_)
        )
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidFields(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) | AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::InvalidFields(fields) => HttpResponse::build(status).json(serde_json::json!({
                "error": "validation_error",
                "fields": fields,
            })),
            err if err.is_storage() => {
                log::error!("요청 처리 중 내부 오류: {}", err);
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "internal_error",
                    "message": "요청을 처리하는 중 오류가 발생했습니다",
                }))
            }
            err => HttpResponse::build(status).json(serde_json::json!({
                "error": err.to_string()
            })),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            let key = if field == "__all__" {
                NON_FIELD_ERRORS.to_string()
            } else {
                field.to_string()
            };

            let messages = field_errors.iter().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            });

            fields.entry(key).or_default().extend(messages);
        }

        AppError::InvalidFields(fields)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("비밀번호 해시 처리 실패: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 문맥을 붙여 `InternalError`로 변환
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
