pub mod request;
pub mod response;

pub use request::{AddressRequest, PatchAddressRequest};
pub use response::{AddressDetailResponse, AddressResponse};
