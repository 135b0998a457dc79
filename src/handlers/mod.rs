//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다.
//! 핸들러는 요청 본문을 DTO로 받고, `web::Data`로 주입된 서비스를 호출한 뒤
//! 결과를 상태 코드와 함께 JSON으로 돌려줍니다.
//!
//! ```text
//! Client ──▶ Handlers (이 모듈) ──▶ Services ──▶ Repositories (UserStore / AddressStore / TokenStore)
//! ```
//!
//! ## 모듈 구성
//!
//! - **`users`**: 회원가입, 로그인, 로그아웃, 토큰 갱신, 비밀번호 재설정, 계정 수정/삭제
//! - **`addresses`**: 호출자 소유 배송지 CRUD
//! - **`orders`**: 주문 완료 기록 (Admin/Courier 전용)
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `AppError`의 `ResponseError` 구현이 상태 코드와 JSON 본문을 결정합니다.

pub mod users;
pub mod addresses;
pub mod orders;
