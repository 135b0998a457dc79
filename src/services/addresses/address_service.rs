//! # 배송지 서비스
//!
//! 모든 연산은 인증된 호출자의 ID를 소유자로 묶어서 저장소를 호출합니다.
//! 다른 사용자의 배송지, 없는 배송지, 형식이 잘못된 ID는 모두 같은 `NotFound`로 처리됩니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::core::{AppError, AppResult};
use crate::domain::dto::addresses::{
    AddressDetailResponse, AddressRequest, AddressResponse, PatchAddressRequest,
};
use crate::domain::entities::addresses::{Address, AddressChanges};
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::AddressStore;

fn not_found() -> AppError {
    AppError::NotFound("배송지를 찾을 수 없습니다".to_string())
}

/// 경로의 배송지 ID 파싱 (형식 오류도 `NotFound`)
fn parse_address_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| not_found())
}

#[derive(Clone)]
pub struct AddressService {
    addresses: Arc<dyn AddressStore>,
}

impl AddressService {
    pub fn new(addresses: Arc<dyn AddressStore>) -> Self {
        Self { addresses }
    }

    pub async fn list(&self, caller: &AuthenticatedUser) -> AppResult<Vec<AddressDetailResponse>> {
        let owner = caller.object_id()?;
        let addresses = self.addresses.find_for_owner(&owner, None).await?;

        Ok(addresses.into_iter().map(AddressDetailResponse::from).collect())
    }

    pub async fn get(&self, caller: &AuthenticatedUser, address_id: &str) -> AppResult<AddressDetailResponse> {
        let owner = caller.object_id()?;
        let id = parse_address_id(address_id)?;

        self.addresses
            .find_for_owner(&owner, Some(&id))
            .await?
            .into_iter()
            .next()
            .map(AddressDetailResponse::from)
            .ok_or_else(not_found)
    }

    pub async fn create(&self, caller: &AuthenticatedUser, request: AddressRequest) -> AppResult<AddressResponse> {
        request.validate()?;

        let address = Address::new(
            caller.object_id()?,
            request.city,
            request.street,
            request.house,
            request.entrance,
            request.floor,
            request.flat,
        );
        let saved = self.addresses.insert(address).await?;

        log::info!("배송지 생성 - owner: {}", caller.user_id);
        Ok(AddressResponse::from(saved))
    }

    /// 전체 수정 (PUT): 빠진 선택 필드는 제거됩니다
    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        address_id: &str,
        request: AddressRequest,
    ) -> AppResult<AddressResponse> {
        request.validate()?;
        self.apply_changes(caller, address_id, AddressChanges::from(request)).await
    }

    /// 부분 수정 (PATCH)
    pub async fn patch(
        &self,
        caller: &AuthenticatedUser,
        address_id: &str,
        request: PatchAddressRequest,
    ) -> AppResult<AddressResponse> {
        request.validate()?;
        self.apply_changes(caller, address_id, AddressChanges::from(request)).await
    }

    async fn apply_changes(
        &self,
        caller: &AuthenticatedUser,
        address_id: &str,
        changes: AddressChanges,
    ) -> AppResult<AddressResponse> {
        let owner = caller.object_id()?;
        let id = parse_address_id(address_id)?;

        self.addresses
            .update_for_owner(&owner, &id, &changes)
            .await?
            .map(AddressResponse::from)
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, address_id: &str) -> AppResult<()> {
        let owner = caller.object_id()?;
        let id = parse_address_id(address_id)?;

        if !self.addresses.delete_for_owner(&owner, &id).await? {
            return Err(not_found());
        }

        log::info!("배송지 삭제 - owner: {}, id: {}", caller.user_id, id);
        Ok(())
    }

    /// 주문 완료 기록: 주문 카운터 1 증가
    ///
    /// 주문 처리 측(관리자/배송원)이 호출하며 소유자 제한이 없습니다.
    pub async fn record_completed_order(&self, address_id: &str) -> AppResult<AddressDetailResponse> {
        let id = parse_address_id(address_id)?;

        let updated = self
            .addresses
            .increment_order_count(&id)
            .await?
            .ok_or_else(not_found)?;

        log::info!("주문 완료 기록 - address: {}, order_count: {}", id, updated.order_count);
        Ok(AddressDetailResponse::from(updated))
    }
}
