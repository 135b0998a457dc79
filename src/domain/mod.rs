//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 User, Address
//! ├── dto       - HTTP 요청/응답 계약
//! └── models    - 토큰 클레임, 발급/폐기 기록, 요청 신원
//!      │
//!      ▼
//! Services → Repositories (MongoDB + Redis / in-memory)
//! ```

pub mod entities;
pub mod dto;
pub mod models;
