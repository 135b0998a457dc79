//! # 배송지 리포지토리 (MongoDB)
//!
//! 모든 조회와 수정은 `user_id` 조건을 함께 걸어 소유자 범위로 제한합니다.
//! 주문 카운터는 `$inc` 한 번으로 증가시키므로 동시 요청에서도 유실되지 않습니다.
//! 같은 배송지에 대한 트랜잭션이 겹쳐 WriteConflict가 나면 작업 단위를 다시 실행합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::core::registry::Repository;
use crate::core::AppResult;
use crate::db::{is_transient_transaction_error, retry_transient, Database, TRANSACTION_ATTEMPTS};
use crate::domain::entities::addresses::{Address, AddressChanges};
use crate::repositories::AddressStore;

#[repository(name = "address", collection = "addresses")]
pub struct AddressRepository {
    db: Arc<Database>,
}

impl AddressRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        let owner_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();

        self.collection::<Address>().create_indexes([owner_index]).await?;

        log::info!("✅ {} 인덱스 생성 완료", self.collection_name());
        Ok(())
    }

    /// `$inc` 한 번과 `last_order` 갱신을 한 트랜잭션으로 실행
    async fn increment_once(&self, address_id: &ObjectId) -> Result<Option<Address>, mongodb::error::Error> {
        let mut session = self.db.begin_unit_of_work().await?;

        let updated = self
            .collection::<Address>()
            .find_one_and_update(
                doc! { "_id": address_id },
                doc! {
                    "$inc": { "order_count": 1_i64 },
                    "$set": { "last_order": DateTime::now() },
                },
            )
            .with_options(Self::after_update())
            .session(&mut session)
            .await?;

        if updated.is_some() {
            session.commit_transaction().await?;
        }

        Ok(updated)
    }

    fn after_update() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }

    fn optional_field(value: &Option<String>) -> Bson {
        match value {
            Some(v) => Bson::String(v.clone()),
            None => Bson::Null,
        }
    }
}

#[async_trait]
impl AddressStore for AddressRepository {
    async fn find_for_owner(
        &self,
        owner: &ObjectId,
        address_id: Option<&ObjectId>,
    ) -> AppResult<Vec<Address>> {
        let mut filter = doc! { "user_id": owner };
        if let Some(id) = address_id {
            filter.insert("_id", id);
        }

        let cursor = self.collection::<Address>().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, mut address: Address) -> AppResult<Address> {
        let result = self.collection::<Address>().insert_one(&address).await?;
        address.id = result.inserted_id.as_object_id();

        log::debug!("배송지 생성 - owner: {}", address.user_id);
        Ok(address)
    }

    async fn update_for_owner(
        &self,
        owner: &ObjectId,
        address_id: &ObjectId,
        changes: &AddressChanges,
    ) -> AppResult<Option<Address>> {
        let mut set = Document::new();
        if let Some(city) = &changes.city {
            set.insert("city", city);
        }
        if let Some(street) = &changes.street {
            set.insert("street", street);
        }
        if let Some(house) = &changes.house {
            set.insert("house", house);
        }
        if let Some(entrance) = &changes.entrance {
            set.insert("entrance", Self::optional_field(entrance));
        }
        if let Some(floor) = &changes.floor {
            set.insert("floor", Self::optional_field(floor));
        }
        if let Some(flat) = &changes.flat {
            set.insert("flat", Self::optional_field(flat));
        }
        set.insert("last_order", DateTime::now());

        Ok(self
            .collection::<Address>()
            .find_one_and_update(
                doc! { "_id": address_id, "user_id": owner },
                doc! { "$set": set },
            )
            .with_options(Self::after_update())
            .await?)
    }

    async fn delete_for_owner(&self, owner: &ObjectId, address_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<Address>()
            .delete_one(doc! { "_id": address_id, "user_id": owner })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn increment_order_count(&self, address_id: &ObjectId) -> AppResult<Option<Address>> {
        Ok(retry_transient(TRANSACTION_ATTEMPTS, is_transient_transaction_error, || {
            self.increment_once(address_id)
        })
        .await?)
    }
}
