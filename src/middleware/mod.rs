//! # 인증 미들웨어
//!
//! 인증이 필요한 모든 요청과 응답 사이에 끼어드는 세션 가드입니다.
//! - `auth`: 로그인 상태 판단, 관리 화면 보호, 401 응답 가로채기, 로그아웃

pub mod auth;

pub use auth::{Redirected, SessionGuard};
