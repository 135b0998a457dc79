//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증
//! - 호출자 신원(`AuthenticatedUser`)을 request extension에 저장
//! - 토큰이 없거나 유효하지 않으면 401, 역할 제한에 걸리면 403
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::domain::entities::users::Role;
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .app_data(web::Data::new(token_service))
//!     .service(
//!         web::scope("/users/addresses")
//!             .wrap(AuthMiddleware::required())
//!             .service(list_addresses)
//!     )
//!     .service(
//!         web::scope("/orders")
//!             .wrap(AuthMiddleware::required_with_roles(vec![Role::Admin, Role::Courier]))
//!             .service(complete_order)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
