//! 도메인 모델
//!
//! 영속 엔티티가 아닌, 인증 흐름에서 주고받는 값 객체들입니다.
//!
//! - [`auth`] - 요청 신원(`AuthenticatedUser`)과 미들웨어 인증 조건
//! - [`token`] - JWT 클레임, 토큰 쌍, 발급/폐기 기록

pub mod auth;
pub mod token;

pub use auth::{AuthenticatedUser, RequiredRole};
pub use token::{BlacklistReason, BlacklistedToken, OutstandingToken, TokenClaims, TokenPair, TokenType};
