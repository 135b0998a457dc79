//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 읽기 캐시입니다. 값은 JSON으로 직렬화되어 저장됩니다.
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("user_repository:64f0...", &user, 600).await?;
//! let cached: Option<User> = cache.get("user_repository:64f0...").await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
