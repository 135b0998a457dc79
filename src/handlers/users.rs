//! # 계정 HTTP 핸들러
//!
//! | 메서드 | 경로 | 인증 | 설명 | 상태 코드 |
//! |--------|------|------|------|-----------|
//! | `POST` | `/users/register` | - | 회원가입 + 토큰 발급 | 201 |
//! | `POST` | `/users/login` | - | 로그인 + 토큰 발급 | 200 |
//! | `POST` | `/users/logout` | Bearer | 리프레시 토큰 폐기 | 205 |
//! | `POST` | `/users/token/refresh` | - | 액세스 토큰 재발급 | 200 |
//! | `PUT` | `/users/reset_password` | Bearer | 비밀번호 재설정 | 200 |
//! | `PATCH`/`PUT` | `/users/update` | Bearer | 계정 정보 수정 | 200 |
//! | `DELETE` | `/users/delete` | Bearer | 계정 삭제 (배송지 포함) | 204 |
//!
//! 인증이 필요한 엔드포인트는 핸들러 단위로 `AuthMiddleware::required()`를 감쌉니다.

use actix_web::{delete, post, put, route, web, HttpResponse};

use crate::core::AppError;
use crate::domain::dto::tokens::{LogoutRequest, RefreshRequest};
use crate::domain::dto::users::request::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, UpdateAccountRequest,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::users::AccountService;

/// 회원가입
///
/// ```bash
/// curl -X POST http://localhost:8080/users/register \
///   -H "Content-Type: application/json" \
///   -d '{"username":"ivan","password":"s3cure-pass","email":"ivan@example.com",
///        "first_name":"Ivan","last_name":"Petrov","birthday":"1990-05-17"}'
/// ```
#[post("/register")]
pub async fn register(
    accounts: web::Data<AccountService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = accounts.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    accounts: web::Data<AccountService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = accounts.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃
///
/// 본문의 `refresh` 토큰을 폐기하고 205 Reset Content로 응답합니다.
/// 폐기에 실패하면 원인과 무관하게 400입니다.
#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    accounts: web::Data<AccountService>,
    caller: AuthenticatedUser,
    payload: web::Json<LogoutRequest>,
) -> Result<HttpResponse, AppError> {
    accounts.logout(&caller, &payload.refresh).await?;
    Ok(HttpResponse::ResetContent().finish())
}

#[post("/token/refresh")]
pub async fn refresh_token(
    accounts: web::Data<AccountService>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    let response = accounts.refresh(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/reset_password", wrap = "AuthMiddleware::required()")]
pub async fn reset_password(
    accounts: web::Data<AccountService>,
    caller: AuthenticatedUser,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    accounts.reset_password(&caller, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "비밀번호가 변경되었습니다"
    })))
}

/// 계정 정보 수정 (PATCH와 PUT 모두 부분 수정)
#[route("/update", method = "PATCH", method = "PUT", wrap = "AuthMiddleware::required()")]
pub async fn update_account(
    accounts: web::Data<AccountService>,
    caller: AuthenticatedUser,
    payload: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse, AppError> {
    let response = accounts.update_profile(&caller, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/delete", wrap = "AuthMiddleware::required()")]
pub async fn delete_account(
    accounts: web::Data<AccountService>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    accounts.delete_account(&caller).await?;
    Ok(HttpResponse::NoContent().finish())
}
