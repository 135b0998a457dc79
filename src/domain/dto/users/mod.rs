pub mod request;
pub mod response;

pub use request::{LoginRequest, RegisterRequest, ResetPasswordRequest, UpdateAccountRequest};
pub use response::{LoginResponse, RegisterResponse, UserResponse};
