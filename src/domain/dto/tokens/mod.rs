pub mod request;
pub mod response;

pub use request::{LogoutRequest, RefreshRequest};
pub use response::AccessTokenResponse;
