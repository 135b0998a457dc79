//! 프로세스 메모리 저장소
//!
//! 세 저장소 트레이트를 하나의 잠금 아래에서 구현합니다.
//! 중복 확인과 삽입, 연쇄 삭제, 카운터 증가는 각각 한 번의 잠금 구간에서 끝나므로
//! MongoDB 구현의 트랜잭션과 같은 원자성을 가집니다.
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryStore::new());
//! let users: Arc<dyn UserStore> = store.clone();
//! let addresses: Arc<dyn AddressStore> = store.clone();
//! let tokens: Arc<dyn TokenStore> = store;
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::{AppError, AppResult, ErrorContext};
use crate::domain::entities::addresses::{Address, AddressChanges};
use crate::domain::entities::users::{ProfileChanges, User};
use crate::domain::models::token::{BlacklistedToken, OutstandingToken};
use crate::repositories::users::user_repo::{EMAIL_TAKEN, USERNAME_TAKEN};
use crate::repositories::{AddressStore, TokenStore, UserStore};

#[derive(Default)]
struct State {
    users: HashMap<ObjectId, User>,
    addresses: HashMap<ObjectId, Address>,
    outstanding: HashMap<String, OutstandingToken>,
    blacklist: HashMap<String, BlacklistedToken>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .context("메모리 저장소 잠금 실패")
    }

    /// 저장된 사용자 수
    pub fn user_count(&self) -> AppResult<usize> {
        Ok(self.lock()?.users.len())
    }

    /// 저장된 배송지 수 (소유자 무관)
    pub fn address_count(&self) -> AppResult<usize> {
        Ok(self.lock()?.addresses.len())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut state = self.lock()?;

        if state.users.values().any(|u| u.username == user.username) {
            return Err(AppError::field("username", USERNAME_TAKEN));
        }
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AppError::field("email", EMAIL_TAKEN));
        }

        let id = user.id.unwrap_or_else(ObjectId::new);
        user.id = Some(id);
        state.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn update_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool> {
        let mut state = self.lock()?;
        match state.users.get_mut(id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_profile(&self, id: &ObjectId, changes: &ProfileChanges) -> AppResult<Option<User>> {
        let mut state = self.lock()?;

        if let Some(email) = &changes.email {
            if state
                .users
                .iter()
                .any(|(other, u)| other != id && &u.email == email)
            {
                return Err(AppError::field("email", EMAIL_TAKEN));
            }
        }

        Ok(state.users.get_mut(id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete_cascade(&self, id: &ObjectId) -> AppResult<bool> {
        let mut state = self.lock()?;

        if state.users.remove(id).is_none() {
            return Ok(false);
        }
        state.addresses.retain(|_, address| !address.is_owned_by(id));

        Ok(true)
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    async fn find_for_owner(
        &self,
        owner: &ObjectId,
        address_id: Option<&ObjectId>,
    ) -> AppResult<Vec<Address>> {
        let state = self.lock()?;
        let mut found: Vec<Address> = state
            .addresses
            .iter()
            .filter(|(id, address)| {
                address.is_owned_by(owner) && address_id.map_or(true, |wanted| **id == *wanted)
            })
            .map(|(_, address)| address.clone())
            .collect();

        // ObjectId는 생성 순서를 따름
        found.sort_by_key(|address| address.id);
        Ok(found)
    }

    async fn insert(&self, mut address: Address) -> AppResult<Address> {
        let id = address.id.unwrap_or_else(ObjectId::new);
        address.id = Some(id);
        self.lock()?.addresses.insert(id, address.clone());
        Ok(address)
    }

    async fn update_for_owner(
        &self,
        owner: &ObjectId,
        address_id: &ObjectId,
        changes: &AddressChanges,
    ) -> AppResult<Option<Address>> {
        let mut state = self.lock()?;
        Ok(state
            .addresses
            .get_mut(address_id)
            .filter(|address| address.is_owned_by(owner))
            .map(|address| {
                address.apply(changes);
                address.clone()
            }))
    }

    async fn delete_for_owner(&self, owner: &ObjectId, address_id: &ObjectId) -> AppResult<bool> {
        let mut state = self.lock()?;
        let owned = state
            .addresses
            .get(address_id)
            .is_some_and(|address| address.is_owned_by(owner));

        if owned {
            state.addresses.remove(address_id);
        }
        Ok(owned)
    }

    async fn increment_order_count(&self, address_id: &ObjectId) -> AppResult<Option<Address>> {
        let mut state = self.lock()?;
        Ok(state.addresses.get_mut(address_id).map(|address| {
            address.order_count += 1;
            address.last_order = DateTime::now();
            address.clone()
        }))
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    /// 만료된 발급/폐기 기록은 새 토큰을 기록할 때 함께 정리 (MongoDB TTL 인덱스와 같은 효과)
    async fn record_outstanding(&self, token: OutstandingToken) -> AppResult<()> {
        let now = DateTime::now();
        let mut state = self.lock()?;

        state.outstanding.retain(|_, t| t.expires_at > now);
        state.blacklist.retain(|_, t| t.expires_at > now);
        state.outstanding.insert(token.jti.clone(), token);
        Ok(())
    }

    async fn is_outstanding(&self, jti: &str) -> AppResult<bool> {
        Ok(self.lock()?.outstanding.contains_key(jti))
    }

    async fn blacklist(&self, entry: BlacklistedToken) -> AppResult<bool> {
        let mut state = self.lock()?;
        if state.blacklist.contains_key(&entry.jti) {
            return Ok(false);
        }
        state.blacklist.insert(entry.jti.clone(), entry);
        Ok(true)
    }

    async fn is_blacklisted(&self, jti: &str) -> AppResult<bool> {
        Ok(self.lock()?.blacklist.contains_key(jti))
    }
}
