//! # 사용자 리포지토리 (MongoDB + Redis)
//!
//! - **컬렉션**: `users`
//! - **인덱스**: username(unique), email(unique), created_at(desc)
//! - **캐시**: `user_repository:{id}`, TTL 10분, 모든 쓰기 후 무효화
//!
//! 가입과 계정 삭제는 트랜잭션 안에서 실행됩니다.
//! 가입은 중복 확인과 삽입을, 삭제는 사용자와 배송지 제거를 한 작업 단위로 묶습니다.
//! 동시 가입이 WriteConflict로 끝나면 작업 단위를 다시 실행하므로,
//! 두 번째 시도에서 중복 확인이 필드 에러를 돌려줍니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::core::{AppError, AppResult};
use crate::db::{is_transient_transaction_error, retry_transient, Database, TRANSACTION_ATTEMPTS};
use crate::domain::entities::addresses::Address;
use crate::domain::entities::users::{ProfileChanges, User};
use crate::repositories::addresses::AddressRepository;
use crate::repositories::{is_duplicate_key, UserStore};

const USER_CACHE_TTL_SECONDS: u64 = 600;

pub(crate) const USERNAME_TAKEN: &str = "이미 사용 중인 사용자명입니다";
pub(crate) const EMAIL_TAKEN: &str = "이미 사용 중인 이메일입니다";

/// 사용자 데이터 액세스 리포지토리
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
    /// 계정 삭제 시 연쇄 삭제 대상
    addresses: Arc<AddressRepository>,
}

impl UserRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        // 최신 가입자 우선 정렬용
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
            .build();

        self.collection::<User>()
            .create_indexes([username_index, email_index, created_at_index])
            .await?;

        log::info!("✅ {} 인덱스 생성 완료", self.collection_name());
        Ok(())
    }

    async fn cache_user(&self, user: &User) {
        if let Some(id) = user.id_string() {
            if let Err(e) = self
                .redis
                .set_with_expiry(&self.cache_key(&id), user, USER_CACHE_TTL_SECONDS)
                .await
            {
                log::warn!("사용자 캐시 저장 실패 - id: {}, 에러: {}", id, e);
            }
        }
    }

    async fn evict(&self, id: &ObjectId) {
        if let Err(e) = self.invalidate_cache(&id.to_hex()).await {
            log::warn!("사용자 캐시 무효화 실패 - id: {}, 에러: {}", id, e);
        }
    }

    /// 중복 확인과 삽입을 한 트랜잭션으로 실행
    ///
    /// 바깥 `Err`는 재시도 판단용 드라이버 에러, 안쪽 `Err`는 필드 중복입니다.
    async fn insert_once(&self, mut user: User) -> Result<AppResult<User>, mongodb::error::Error> {
        let users = self.collection::<User>();
        let mut session = self.db.begin_unit_of_work().await?;

        if users
            .find_one(doc! { "username": &user.username })
            .session(&mut session)
            .await?
            .is_some()
        {
            return Ok(Err(AppError::field("username", USERNAME_TAKEN)));
        }

        if users
            .find_one(doc! { "email": &user.email })
            .session(&mut session)
            .await?
            .is_some()
        {
            return Ok(Err(AppError::field("email", EMAIL_TAKEN)));
        }

        let result = match users.insert_one(&user).session(&mut session).await {
            Ok(result) => result,
            Err(e) if is_duplicate_key(&e) => return Ok(Err(Self::duplicate_field_error(&e))),
            Err(e) => return Err(e),
        };

        session.commit_transaction().await?;

        user.id = result.inserted_id.as_object_id();
        Ok(Ok(user))
    }

    /// 사용자와 소유 배송지 삭제. 사용자가 없으면 `None`, 있으면 삭제된 배송지 수
    async fn delete_cascade_once(&self, id: &ObjectId) -> Result<Option<u64>, mongodb::error::Error> {
        let mut session = self.db.begin_unit_of_work().await?;

        let deleted = self
            .collection::<User>()
            .delete_one(doc! { "_id": id })
            .session(&mut session)
            .await?;

        if deleted.deleted_count == 0 {
            return Ok(None);
        }

        let addresses = self
            .addresses
            .collection::<Address>()
            .delete_many(doc! { "user_id": id })
            .session(&mut session)
            .await?;

        session.commit_transaction().await?;
        Ok(Some(addresses.deleted_count))
    }

    /// unique 인덱스 위반 메시지에서 충돌 필드 추정
    fn duplicate_field_error(err: &mongodb::error::Error) -> AppError {
        if err.to_string().contains("email") {
            AppError::field("email", EMAIL_TAKEN)
        } else {
            AppError::field("username", USERNAME_TAKEN)
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: User) -> AppResult<User> {
        let user = retry_transient(TRANSACTION_ATTEMPTS, is_transient_transaction_error, || {
            self.insert_once(user.clone())
        })
        .await??;

        log::info!("사용자 생성 - username: {}", user.username);
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection::<User>()
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        if let Ok(Some(cached)) = self.redis.get::<User>(&self.cache_key(&id.to_hex())).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection::<User>()
            .find_one(doc! { "_id": id })
            .await?;

        if let Some(ref user) = user {
            self.cache_user(user).await;
        }

        Ok(user)
    }

    async fn update_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool> {
        let result = self
            .collection::<User>()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "password_hash": password_hash } },
            )
            .await?;

        self.evict(id).await;
        Ok(result.matched_count > 0)
    }

    async fn update_profile(&self, id: &ObjectId, changes: &ProfileChanges) -> AppResult<Option<User>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut set = Document::new();
        if let Some(email) = &changes.email {
            set.insert("email", email);
        }
        if let Some(first_name) = &changes.first_name {
            set.insert("first_name", first_name);
        }
        if let Some(last_name) = &changes.last_name {
            set.insert("last_name", last_name);
        }
        if let Some(birthday) = changes.birthday {
            set.insert("birthday", birthday.format("%Y-%m-%d").to_string());
        }

        let users = self.collection::<User>();

        if let Some(email) = &changes.email {
            let taken = users
                .find_one(doc! { "email": email, "_id": { "$ne": id } })
                .await?
                .is_some();
            if taken {
                return Err(AppError::field("email", EMAIL_TAKEN));
            }
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = match users
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .with_options(options)
            .await
        {
            Ok(updated) => updated,
            Err(e) if is_duplicate_key(&e) => return Err(AppError::field("email", EMAIL_TAKEN)),
            Err(e) => return Err(e.into()),
        };

        self.evict(id).await;
        Ok(updated)
    }

    async fn delete_cascade(&self, id: &ObjectId) -> AppResult<bool> {
        let removed = retry_transient(TRANSACTION_ATTEMPTS, is_transient_transaction_error, || {
            self.delete_cascade_once(id)
        })
        .await?;

        let Some(address_count) = removed else {
            return Ok(false);
        };

        self.evict(id).await;

        log::info!("사용자 삭제 - id: {}, 함께 삭제된 배송지: {}", id, address_count);
        Ok(true)
    }
}
