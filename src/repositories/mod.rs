//! 데이터 액세스 계층
//!
//! 서비스 계층은 아래 세 트레이트에만 의존합니다.
//!
//! | 트레이트 | MongoDB 구현 | 메모리 구현 |
//! |----------|--------------|-------------|
//! | [`UserStore`] | [`UserRepository`] | [`MemoryStore`] |
//! | [`AddressStore`] | [`AddressRepository`] | [`MemoryStore`] |
//! | [`TokenStore`] | [`TokenRepository`] | [`MemoryStore`] |
//!
//! MongoDB 구현은 `#[repository]` 싱글톤이며 Redis 읽기 캐시를 함께 사용합니다.
//! 메모리 구현은 테스트와 로컬 실행용이며, 세 트레이트가 하나의 상태를 공유해
//! 사용자 삭제 시 배송지 연쇄 삭제까지 같은 의미로 동작합니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::AppResult;
use crate::domain::entities::addresses::{Address, AddressChanges};
use crate::domain::entities::users::{ProfileChanges, User};
use crate::domain::models::token::{BlacklistedToken, OutstandingToken};

pub mod users;
pub mod addresses;
pub mod tokens;
pub mod memory;

pub use users::UserRepository;
pub use addresses::AddressRepository;
pub use tokens::TokenRepository;
pub use memory::MemoryStore;

/// 사용자 저장소
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 중복 확인과 저장을 하나의 작업 단위로 수행
    ///
    /// username/email 중복은 `AppError::InvalidFields`로 반환되며 아무것도 저장되지 않습니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    /// 해시만 교체. 사용자가 없으면 `false`
    async fn update_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool>;

    /// 변경된 email은 다른 사용자와 겹치면 `InvalidFields`
    async fn update_profile(&self, id: &ObjectId, changes: &ProfileChanges) -> AppResult<Option<User>>;

    /// 사용자와 소유 배송지를 함께 삭제. 사용자가 없으면 `false`
    async fn delete_cascade(&self, id: &ObjectId) -> AppResult<bool>;
}

/// 배송지 저장소 (모든 조회/수정은 소유자 범위)
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// 소유자의 배송지 목록. `address_id`가 있으면 해당 건만 (없거나 남의 것이면 빈 목록)
    async fn find_for_owner(
        &self,
        owner: &ObjectId,
        address_id: Option<&ObjectId>,
    ) -> AppResult<Vec<Address>>;

    async fn insert(&self, address: Address) -> AppResult<Address>;

    async fn update_for_owner(
        &self,
        owner: &ObjectId,
        address_id: &ObjectId,
        changes: &AddressChanges,
    ) -> AppResult<Option<Address>>;

    async fn delete_for_owner(&self, owner: &ObjectId, address_id: &ObjectId) -> AppResult<bool>;

    /// 주문 카운터 원자적 증가 + `last_order` 갱신
    async fn increment_order_count(&self, address_id: &ObjectId) -> AppResult<Option<Address>>;
}

/// 리프레시 토큰 발급/폐기 기록 저장소
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn record_outstanding(&self, token: OutstandingToken) -> AppResult<()>;

    async fn is_outstanding(&self, jti: &str) -> AppResult<bool>;

    /// 없을 때만 삽입. 이미 폐기된 jti면 `false`
    async fn blacklist(&self, entry: BlacklistedToken) -> AppResult<bool>;

    async fn is_blacklisted(&self, jti: &str) -> AppResult<bool>;
}

/// MongoDB unique 인덱스 위반(E11000) 여부
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        ErrorKind::Command(e) => e.code == 11000,
        _ => false,
    }
}
