//! 사용자 계정 서비스 모듈
//!
//! # Features
//!
//! - 회원가입, 로그인, 로그아웃, 토큰 갱신
//! - 비밀번호 재설정 (bcrypt 재해싱)
//! - 계정 정보 수정, 계정 삭제 (배송지 연쇄 삭제)
//! - 관리자 계정 생성

pub mod credential_service;
pub mod account_service;

pub use credential_service::CredentialService;
pub use account_service::AccountService;
