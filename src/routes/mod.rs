//! API 라우트 설정 모듈
//!
//! 기능별 라우트를 한곳에서 등록합니다.
//!
//! # Route Groups
//!
//! | 스코프 | 인증 | 핸들러 |
//! |--------|------|--------|
//! | `/health` | - | [`health_check`] |
//! | `/users/addresses` | Bearer (스코프 전체) | `handlers::addresses` |
//! | `/users` | 핸들러별 | `handlers::users` |
//! | `/orders` | Bearer + Admin/Courier | `handlers::orders` |
//!
//! `/users/addresses`는 `/users`보다 먼저 등록해야 합니다.
//! actix 스코프는 접두사가 맞으면 다음 스코프로 넘어가지 않습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(token_service))
//!     .app_data(web::Data::new(account_service))
//!     .app_data(web::Data::new(address_service))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use serde_json::json;

use crate::core::AppError;
use crate::domain::entities::users::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트와 JSON 본문 설정을 등록합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    cfg.service(health_check);

    configure_address_routes(cfg);
    configure_user_routes(cfg);
    configure_order_routes(cfg);
}

/// 잘못된 JSON 본문도 `AppError` 형식의 400으로 응답
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err: JsonPayloadError, req: &HttpRequest| {
            log::debug!("JSON 본문 파싱 실패: {} {} - {}", req.method(), req.path(), err);
            AppError::ValidationError(format!("잘못된 요청 본문입니다: {}", err)).into()
        })
}

/// 배송지 라우트 (스코프 전체 인증)
fn configure_address_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users/addresses")
            .wrap(AuthMiddleware::required())
            .service(handlers::addresses::list_addresses)
            .service(handlers::addresses::create_address)
            .service(handlers::addresses::get_address)
            .service(handlers::addresses::replace_address)
            .service(handlers::addresses::patch_address)
            .service(handlers::addresses::delete_address),
    );
}

/// 계정 라우트
///
/// 가입, 로그인, 토큰 갱신은 공개이고 나머지는 핸들러에 인증이 걸려 있습니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/users/login \
///   -H "Content-Type: application/json" \
///   -d '{"username":"ivan","password":"s3cure-pass"}'
///
/// curl -X POST http://localhost:8080/users/logout \
///   -H "Authorization: Bearer {access}" \
///   -H "Content-Type: application/json" \
///   -d '{"refresh":"{refresh}"}'
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(handlers::users::register)
            .service(handlers::users::login)
            .service(handlers::users::refresh_token)
            .service(handlers::users::logout)
            .service(handlers::users::reset_password)
            .service(handlers::users::update_account)
            .service(handlers::users::delete_account),
    );
}

/// 주문 처리 측 라우트 (Admin/Courier 전용)
fn configure_order_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .wrap(AuthMiddleware::required_with_roles(vec![Role::Admin, Role::Courier]))
            .service(handlers::orders::complete_order),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "delivery_account_service",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
