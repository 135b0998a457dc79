//! 요청/응답 DTO
//!
//! - [`users`] - 회원가입, 로그인, 비밀번호 재설정, 계정 수정
//! - [`tokens`] - 토큰 갱신/로그아웃
//! - [`addresses`] - 배송지 생성/수정/조회

pub mod users;
pub mod tokens;
pub mod addresses;

pub use users::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ResetPasswordRequest,
    UpdateAccountRequest, UserResponse,
};
pub use tokens::{AccessTokenResponse, LogoutRequest, RefreshRequest};
pub use addresses::{AddressDetailResponse, AddressRequest, AddressResponse, PatchAddressRequest};
