//! # 데이터 모델 모듈
//!
//! 백엔드와 주고받는 데이터 구조체(struct)들을 정의합니다.
//! - `movie`: 영화 레코드와 생성/수정 요청 본문, 개봉일 정규화
//! - `user`: 로그인/회원가입 요청과 응답
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::MovieRecord`처럼 짧게 접근할 수 있습니다.

pub mod movie;
pub mod user;

pub use movie::*;
pub use user::*;
