//! # 화면(UI) 추상화 모듈
//!
//! 컨트롤러들이 만들어내는 **눈에 보이는 부수효과**를 한곳에 모은 트레이트입니다.
//! 브라우저였다면 DOM 조작, `window.location` 이동, `confirm()` 대화상자였을 것들입니다.
//!
//! 컨트롤러는 `&mut dyn Ui`만 받으므로 실제 화면이 터미널이든,
//! 테스트용 기록기(`RecordingUi`)든 상관없이 같은 코드로 동작합니다.
//!
//! 구현체:
//! - `terminal::TerminalUi`: 표준 입출력 기반 터미널 화면
//! - `recording::RecordingUi`: 모든 효과를 기록만 하는 헤드리스 화면 (테스트용)

pub mod recording;
pub mod terminal;

pub use recording::{RecordingUi, UiEvent};
pub use terminal::TerminalUi;

use crate::models::MovieRecord;

/// 이동할 수 있는 페이지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// 공개 목록 (인증 불필요)
    Public,
    Login,
    Register,
    /// 관리 화면 (인증 필요)
    Manage,
}

/// 상태 메시지 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// 목록을 어떤 모드로 렌더링할지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// 읽기 전용
    Public,
    /// 레코드마다 수정/삭제 동작 표시
    Manage,
}

/// 관리 폼의 제목
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLabel {
    AddMovie,
    EditMovie,
}

impl FormLabel {
    pub fn text(&self) -> &'static str {
        match self {
            FormLabel::AddMovie => "Add a new movie",
            FormLabel::EditMovie => "Edit movie",
        }
    }
}

/// 화면이 제공해야 하는 동작들
pub trait Ui {
    /// 다른 페이지로 이동합니다. 현재 페이지의 나머지 처리는 호출자가 중단해야 합니다.
    fn navigate(&mut self, page: Page);
    /// 잠깐 보여주고 사라지는 상태 메시지
    fn show_status(&mut self, kind: StatusKind, message: &str);
    /// 사용자에게 예/아니오를 묻습니다. `true`면 진행.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// 영화 목록을 다시 그립니다.
    fn render_list(&mut self, movies: &[MovieRecord], mode: ListMode);
    fn set_form_label(&mut self, label: FormLabel);
    /// "취소" 버튼 표시 여부
    fn set_cancel_visible(&mut self, visible: bool);
    /// 폼이 보이도록 스크롤합니다.
    fn scroll_to_form(&mut self);
}
