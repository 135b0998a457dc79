//! 배송지 엔티티
//!
//! 배송지는 정확히 한 명의 사용자(`user_id`)에게 속하며 소유자는 바뀌지 않습니다.
//! `order_count`는 완료된 주문마다 원자적으로 1씩 증가하고,
//! `last_order`는 저장될 때마다(생성, 수정, 증가) 현재 시각으로 갱신됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 소유자
    pub user_id: ObjectId,
    pub city: String,
    pub street: String,
    pub house: String,
    pub entrance: Option<String>,
    pub floor: Option<String>,
    pub flat: Option<String>,
    #[serde(default)]
    pub order_count: i64,
    pub last_order: DateTime,
}

impl Address {
    pub fn new(
        user_id: ObjectId,
        city: String,
        street: String,
        house: String,
        entrance: Option<String>,
        floor: Option<String>,
        flat: Option<String>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            city,
            street,
            house,
            entrance,
            floor,
            flat,
            order_count: 0,
            last_order: DateTime::now(),
        }
    }

    pub fn is_owned_by(&self, owner: &ObjectId) -> bool {
        &self.user_id == owner
    }

    pub fn apply(&mut self, changes: &AddressChanges) {
        if let Some(city) = &changes.city {
            self.city = city.clone();
        }
        if let Some(street) = &changes.street {
            self.street = street.clone();
        }
        if let Some(house) = &changes.house {
            self.house = house.clone();
        }
        if let Some(entrance) = &changes.entrance {
            self.entrance = entrance.clone();
        }
        if let Some(floor) = &changes.floor {
            self.floor = floor.clone();
        }
        if let Some(flat) = &changes.flat {
            self.flat = flat.clone();
        }
        self.last_order = DateTime::now();
    }
}

/// 배송지 부분 수정
///
/// 바깥 `Option`은 "변경 여부", 선택 필드의 안쪽 `Option`은 "값 제거"를 뜻합니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressChanges {
    pub city: Option<String>,
    pub street: Option<String>,
    pub house: Option<String>,
    pub entrance: Option<Option<String>>,
    pub floor: Option<Option<String>>,
    pub flat: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(owner: ObjectId) -> Address {
        Address::new(
            owner,
            "Kazan".to_string(),
            "Baumana".to_string(),
            "12".to_string(),
            Some("2".to_string()),
            None,
            Some("41".to_string()),
        )
    }

    #[test]
    fn test_new_address_starts_with_zero_orders() {
        let owner = ObjectId::new();
        let address = sample(owner);

        assert_eq!(address.order_count, 0);
        assert!(address.is_owned_by(&owner));
        assert!(!address.is_owned_by(&ObjectId::new()));
    }

    #[test]
    fn test_apply_changes_keeps_owner_and_counter() {
        let owner = ObjectId::new();
        let mut address = sample(owner);
        address.order_count = 3;

        address.apply(&AddressChanges {
            house: Some("14".to_string()),
            entrance: Some(None),
            floor: Some(Some("5".to_string())),
            ..Default::default()
        });

        assert_eq!(address.house, "14");
        assert_eq!(address.entrance, None);
        assert_eq!(address.floor.as_deref(), Some("5"));
        assert_eq!(address.flat.as_deref(), Some("41"));
        assert_eq!(address.order_count, 3);
        assert_eq!(address.user_id, owner);
    }
}
