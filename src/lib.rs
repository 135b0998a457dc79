//! 배송 계정 서비스
//!
//! 회원가입, 로그인, 로그아웃(리프레시 토큰 블랙리스트), 토큰 갱신, 비밀번호 재설정,
//! 계정 수정/삭제와 사용자별 배송지 관리를 제공하는 Actix-web 서비스입니다.
//!
//! # Features
//!
//! - **계정 관리**: bcrypt 해시 기반 가입/인증, 프로필 수정, 배송지 연쇄 삭제
//! - **JWT 인증**: HS256 액세스/리프레시 토큰, 로그아웃 시 리프레시 토큰 1회 폐기
//! - **배송지**: 소유자 범위 CRUD, 원자적 주문 카운터
//! - **싱글톤 DI**: `#[repository]` 매크로 기반 리포지토리 주입
//! - **MongoDB**: 영구 저장과 트랜잭션(작업 단위)
//! - **Redis**: 사용자 조회 캐시, 폐기 토큰 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← Account / Credential / Token / Address
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Store traits   │ ← UserStore / AddressStore / TokenStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 운영 저장소 (테스트는 MemoryStore)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use delivery_account_service::config::JwtSettings;
//! use delivery_account_service::repositories::MemoryStore;
//! use delivery_account_service::services::auth::TokenService;
//! use delivery_account_service::services::users::{AccountService, CredentialService};
//!
//! let store = Arc::new(MemoryStore::new());
//! let tokens = TokenService::new(store.clone(), JwtSettings::from_env());
//! let credentials = CredentialService::new(store.clone(), 12)?;
//! let accounts = AccountService::new(store, credentials, tokens);
//!
//! let registered = accounts.register(request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
