//! 도메인 엔티티
//!
//! MongoDB에 저장되는 영속 객체입니다.
//!
//! - [`users`] - 계정 (`users` 컬렉션)
//! - [`addresses`] - 사용자별 배송지 (`addresses` 컬렉션)

pub mod users;
pub mod addresses;

pub use users::{ProfileChanges, Role, User};
pub use addresses::{Address, AddressChanges};
