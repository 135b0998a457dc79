//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 요청 DTO용 문자열 정리/검증 함수
//! - [`display_terminal`] - 기동 과정 터미널 출력

pub mod string_utils;
pub mod display_terminal;
