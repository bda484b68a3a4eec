//! # 페이지 컨트롤러 모듈
//!
//! 각 페이지에서 일어나는 사용자 동작을 처리하는 모듈입니다.
//! 컨트롤러는 화면 효과를 모두 `&mut dyn Ui`로 내보내므로 화면 종류와 무관합니다.
//!
//! 각 하위 모듈:
//! - `auth`: 로그인, 회원가입
//! - `manage`: 인증된 관리 화면 (필터, 폼, 수정/삭제)
//! - `public`: 인증 없이 보는 공개 목록

pub mod auth;
pub mod manage;
pub mod public;

pub use manage::ManageView;
pub use public::PublicView;
