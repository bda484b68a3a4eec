//! # 서비스 계층
//!
//! 화면과 API 클라이언트 사이의 상태와 규칙을 담당하는 모듈입니다.
//!
//! 각 하위 모듈:
//! - `actions`: 렌더링된 목록 기준의 수정/삭제 동작 테이블
//! - `form`: 단일 폼의 생성/수정 모드 상태 머신
//! - `query`: 필터 입력칸 → 목록 조회 쿼리 변환
//! - `render`: 영화 목록을 화면용 텍스트로 그리기
//! - `sync`: 변경 요청과 화면 목록 동기화

pub mod actions;
pub mod form;
pub mod query;
pub mod render;
pub mod sync;

// `crate::services::FormController`처럼 바로 접근할 수 있게 재공개합니다.
pub use actions::{ActionTable, RecordAction};
pub use form::{FormController, FormField, FormFields, FormMode, Submission};
pub use query::{build_query, FilterInputs, QuerySpec, Sort, SortOrder};
pub use render::{render_movie, render_movies, EMPTY_LIST_TEXT};
pub use sync::{MutationSynchronizer, Outcome};
