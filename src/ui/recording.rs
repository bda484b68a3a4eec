//! 헤드리스 `Ui` 구현. 모든 효과를 순서대로 기록합니다.

use std::collections::VecDeque;

use crate::models::MovieRecord;
use crate::ui::{FormLabel, ListMode, Page, StatusKind, Ui};

/// 기록된 화면 효과 하나
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Navigate(Page),
    Status(StatusKind, String),
    Confirm(String),
    Render(Vec<MovieRecord>, ListMode),
    FormLabel(FormLabel),
    CancelVisible(bool),
    ScrollToForm,
}

/// 효과를 기록하고, `confirm()`에는 미리 넣어둔 답을 돌려주는 화면
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub events: Vec<UiEvent>,
    answers: VecDeque<bool>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 `confirm()` 호출에 돌려줄 답을 예약합니다. 예약이 없으면 `false`.
    pub fn answer_confirm(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    /// 마지막 이동 페이지
    pub fn last_page(&self) -> Option<Page> {
        self.events.iter().rev().find_map(|event| match event {
            UiEvent::Navigate(page) => Some(*page),
            _ => None,
        })
    }

    /// 마지막 상태 메시지
    pub fn last_status(&self) -> Option<(StatusKind, &str)> {
        self.events.iter().rev().find_map(|event| match event {
            UiEvent::Status(kind, message) => Some((*kind, message.as_str())),
            _ => None,
        })
    }

    /// 마지막으로 그린 목록
    pub fn last_render(&self) -> Option<&[MovieRecord]> {
        self.events.iter().rev().find_map(|event| match event {
            UiEvent::Render(movies, _) => Some(movies.as_slice()),
            _ => None,
        })
    }

    pub fn render_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, UiEvent::Render(..)))
            .count()
    }

    /// 마지막으로 설정된 취소 버튼 표시 여부 (설정된 적 없으면 false)
    pub fn cancel_visible(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                UiEvent::CancelVisible(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Ui for RecordingUi {
    fn navigate(&mut self, page: Page) {
        self.events.push(UiEvent::Navigate(page));
    }

    fn show_status(&mut self, kind: StatusKind, message: &str) {
        self.events.push(UiEvent::Status(kind, message.to_string()));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.events.push(UiEvent::Confirm(prompt.to_string()));
        self.answers.pop_front().unwrap_or(false)
    }

    fn render_list(&mut self, movies: &[MovieRecord], mode: ListMode) {
        self.events.push(UiEvent::Render(movies.to_vec(), mode));
    }

    fn set_form_label(&mut self, label: FormLabel) {
        self.events.push(UiEvent::FormLabel(label));
    }

    fn set_cancel_visible(&mut self, visible: bool) {
        self.events.push(UiEvent::CancelVisible(visible));
    }

    fn scroll_to_form(&mut self) {
        self.events.push(UiEvent::ScrollToForm);
    }
}
