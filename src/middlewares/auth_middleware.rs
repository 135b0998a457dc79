//! JWT 인증 미들웨어
//!
//! 액세스 토큰을 검증해 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를
//! request extensions에 넣습니다. 검증에 쓰는 `TokenService`는 `app_data`에서 가져오므로
//! 앱에 `web::Data<TokenService>`가 등록되어 있어야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::entities::users::Role;
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// 유효한 액세스 토큰이 없으면 401, 역할 조건을 만족하지 못하면 403으로 응답합니다.
pub struct AuthMiddleware {
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(required_role: Option<RequiredRole>) -> Self {
        Self { required_role }
    }

    pub fn required() -> Self {
        Self::new(None)
    }

    /// 역할 중 하나라도 있으면 통과
    pub fn required_with_roles(roles: Vec<Role>) -> Self {
        Self::new(Some(RequiredRole::any(roles)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}
