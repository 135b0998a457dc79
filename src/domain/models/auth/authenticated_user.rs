use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::core::AppError;
use crate::domain::entities::users::Role;

/// 액세스 토큰에서 추출된 호출자 신원
///
/// `AuthMiddleware`가 검증 후 request extensions에 넣고,
/// 핸들러는 추출자로 꺼내 씁니다. 저장소 조회 없이 토큰만으로 만들어집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 ObjectId (hex)
    pub user_id: String,

    pub role: Role,
}

impl AuthenticatedUser {
    /// 소유권 바인딩에 사용할 ObjectId
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.user_id)
            .map_err(|_| AppError::AuthenticationError("토큰의 사용자 식별자가 올바르지 않습니다".to_string()))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}
