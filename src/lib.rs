//! # 영화 카탈로그 클라이언트 라이브러리
//!
//! 영화 카탈로그 REST 백엔드를 사용하는 클라이언트의 모든 컨트롤러를 담고 있습니다.
//! 터미널 실행 파일(`main.rs`)과 통합 테스트(`tests/`)가 이 라이브러리를 사용합니다.
//!
//! ## 구성
//! ```text
//! views (페이지 컨트롤러)
//!   ├─ middleware::SessionGuard ── db::TokenStore (토큰 get/set/clear)
//!   ├─ services (쿼리 빌더, 폼 상태 머신, 변경 동기화기, 렌더러)
//!   └─ api::CatalogApi ── 백엔드 REST
//! ui::Ui ◀── 모든 화면 효과
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod ui;
pub mod views;
