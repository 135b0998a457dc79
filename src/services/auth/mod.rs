//! 인증 토큰 서비스 모듈
//!
//! HS256 JWT 액세스/리프레시 토큰의 발급, 검증, 갱신, 폐기를 담당합니다.
//!
//! # Security
//!
//! - 액세스 토큰은 서명, 만료, 토큰 타입만으로 검증
//! - 리프레시 토큰은 발급 기록이 있어야 하고 블랙리스트에 없어야 유효
//! - 폐기는 토큰당 한 번만 성공

pub mod token_service;

pub use token_service::TokenService;
