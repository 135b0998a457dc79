//! 배송지 요청 DTO
//!
//! 소유자 필드는 요청에 존재하지 않습니다. 소유자는 항상 인증된 호출자입니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::addresses::AddressChanges;
use crate::utils::string_utils::{
    deserialize_optional_string, deserialize_patch_string, deserialize_trimmed, not_blank,
};

/// 배송지 생성(POST) / 전체 수정(PUT)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 100, message = "도시명은 100자 이하여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub city: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 100, message = "거리명은 100자 이하여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub street: String,

    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 10, message = "건물 번호는 10자 이하여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub house: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 10, message = "출입구는 10자 이하여야 합니다"))]
    pub entrance: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 10, message = "층은 10자 이하여야 합니다"))]
    pub floor: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 10, message = "호수는 10자 이하여야 합니다"))]
    pub flat: Option<String>,
}

impl From<AddressRequest> for AddressChanges {
    /// 전체 수정: 빠진 선택 필드는 값 제거
    fn from(req: AddressRequest) -> Self {
        Self {
            city: Some(req.city),
            street: Some(req.street),
            house: Some(req.house),
            entrance: Some(req.entrance),
            floor: Some(req.floor),
            flat: Some(req.flat),
        }
    }
}

/// 배송지 부분 수정(PATCH)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PatchAddressRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "도시명은 100자 이하여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub city: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "거리명은 100자 이하여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub street: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10, message = "건물 번호는 10자 이하여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub house: Option<String>,

    #[serde(default, deserialize_with = "deserialize_patch_string")]
    #[validate(length(max = 10, message = "출입구는 10자 이하여야 합니다"))]
    pub entrance: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch_string")]
    #[validate(length(max = 10, message = "층은 10자 이하여야 합니다"))]
    pub floor: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch_string")]
    #[validate(length(max = 10, message = "호수는 10자 이하여야 합니다"))]
    pub flat: Option<Option<String>>,
}

impl From<PatchAddressRequest> for AddressChanges {
    fn from(req: PatchAddressRequest) -> Self {
        Self {
            city: req.city.map(|v| v.trim().to_string()),
            street: req.street.map(|v| v.trim().to_string()),
            house: req.house.map(|v| v.trim().to_string()),
            entrance: req.entrance,
            floor: req.floor,
            flat: req.flat,
        }
    }
}
