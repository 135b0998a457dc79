pub mod register_request;
pub mod login_request;
pub mod password_request;
pub mod update_request;

pub use register_request::RegisterRequest;
pub use login_request::LoginRequest;
pub use password_request::ResetPasswordRequest;
pub use update_request::UpdateAccountRequest;
