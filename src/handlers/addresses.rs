//! # 배송지 HTTP 핸들러
//!
//! `/users/addresses` 스코프 전체가 `AuthMiddleware::required()`로 감싸져 있습니다.
//! 모든 핸들러는 호출자 신원을 서비스에 넘기고, 소유자 범위 밖의 배송지는 404가 됩니다.
//!
//! | 메서드 | 경로 | 응답 |
//! |--------|------|------|
//! | `GET` | `/users/addresses` | 200, 상세 목록 |
//! | `POST` | `/users/addresses` | 201 |
//! | `GET` | `/users/addresses/{id}` | 200 / 404 |
//! | `PUT` | `/users/addresses/{id}` | 200 / 404 (빠진 선택 필드 제거) |
//! | `PATCH` | `/users/addresses/{id}` | 200 / 404 |
//! | `DELETE` | `/users/addresses/{id}` | 204 / 404 |

use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::core::AppError;
use crate::domain::dto::addresses::{AddressRequest, PatchAddressRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::addresses::AddressService;

#[get("")]
pub async fn list_addresses(
    addresses: web::Data<AddressService>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = addresses.list(&caller).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("")]
pub async fn create_address(
    addresses: web::Data<AddressService>,
    caller: AuthenticatedUser,
    payload: web::Json<AddressRequest>,
) -> Result<HttpResponse, AppError> {
    let response = addresses.create(&caller, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/{address_id}")]
pub async fn get_address(
    addresses: web::Data<AddressService>,
    caller: AuthenticatedUser,
    address_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = addresses.get(&caller, &address_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/{address_id}")]
pub async fn replace_address(
    addresses: web::Data<AddressService>,
    caller: AuthenticatedUser,
    address_id: web::Path<String>,
    payload: web::Json<AddressRequest>,
) -> Result<HttpResponse, AppError> {
    let response = addresses
        .update(&caller, &address_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/{address_id}")]
pub async fn patch_address(
    addresses: web::Data<AddressService>,
    caller: AuthenticatedUser,
    address_id: web::Path<String>,
    payload: web::Json<PatchAddressRequest>,
) -> Result<HttpResponse, AppError> {
    let response = addresses
        .patch(&caller, &address_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{address_id}")]
pub async fn delete_address(
    addresses: web::Data<AddressService>,
    caller: AuthenticatedUser,
    address_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    addresses.delete(&caller, &address_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
