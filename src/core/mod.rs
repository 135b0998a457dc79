//! # Core Module
//!
//! 애플리케이션 전역에서 공유하는 두 가지 기반 기능을 제공합니다.
//!
//! ### [`registry`] - 싱글톤 리포지토리 컨테이너
//! - `#[repository]` 매크로로 선언한 MongoDB 리포지토리를 `inventory`로 수집
//! - `Database`, `RedisClient` 같은 인프라 컴포넌트는 `ServiceLocator::set()`으로 등록
//! - `Arc<T>` 필드는 `ServiceLocator::get::<T>()`로 자동 주입
//!
//! ### [`errors`] - 통합 에러 처리
//! - `AppError`: 모든 계층이 공유하는 에러 타입, Actix-Web `ResponseError` 구현
//! - `TokenError`: 토큰 검증/폐기 실패 원인
//!
//! ```rust,ignore
//! use crate::core::registry::ServiceLocator;
//!
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//! ServiceLocator::initialize_all().await?;
//!
//! let users = UserRepository::instance();
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
