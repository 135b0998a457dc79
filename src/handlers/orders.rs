//! 주문 처리 측 엔드포인트
//!
//! 배송이 끝난 주문을 배송지에 기록합니다. `Admin` 또는 `Courier` 역할만 호출할 수 있습니다.

use actix_web::{post, web, HttpResponse};

use crate::core::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::addresses::AddressService;

/// `POST /orders/addresses/{id}/complete` → 204 / 404
#[post("/addresses/{address_id}/complete")]
pub async fn complete_order(
    addresses: web::Data<AddressService>,
    caller: AuthenticatedUser,
    address_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    addresses.record_completed_order(&address_id).await?;

    log::debug!("주문 완료 처리 - by: {} ({})", caller.user_id, caller.role);
    Ok(HttpResponse::NoContent().finish())
}
