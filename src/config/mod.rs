//! 애플리케이션 설정 모듈
//!
//! - [`data_config`] - 실행 환경, bcrypt 비용, 서버 바인딩, Rate Limiting
//! - [`auth_config`] - JWT 서명 키와 토큰 수명

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
