use serde::{Deserialize, Serialize};

use crate::domain::entities::addresses::Address;

/// 생성/수정 응답: 클라이언트가 보낸 필드 + id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: String,
    pub city: String,
    pub street: String,
    pub house: String,
    pub entrance: Option<String>,
    pub floor: Option<String>,
    pub flat: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.map(|id| id.to_hex()).unwrap_or_default(),
            city: address.city,
            street: address.street,
            house: address.house,
            entrance: address.entrance,
            floor: address.floor,
            flat: address.flat,
        }
    }
}

/// 조회 응답: 소유자와 `last_order`를 제외한 전체 필드
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDetailResponse {
    pub id: String,
    pub city: String,
    pub street: String,
    pub house: String,
    pub entrance: Option<String>,
    pub floor: Option<String>,
    pub flat: Option<String>,
    pub order_count: i64,
}

impl From<Address> for AddressDetailResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.map(|id| id.to_hex()).unwrap_or_default(),
            city: address.city,
            street: address.street,
            house: address.house,
            entrance: address.entrance,
            floor: address.floor,
            flat: address.flat,
            order_count: address.order_count,
        }
    }
}
