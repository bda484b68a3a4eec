//! # 터미널 화면
//!
//! 표준 입출력 위에서 동작하는 `Ui` 구현입니다.
//! 입력/출력 타입을 제네릭으로 받으므로 테스트에서는 메모리 버퍼를 넣을 수 있습니다.
//!
//! 페이지 이동은 즉시 일어나지 않고 `next_page`에 기록만 됩니다.
//! 바깥의 페이지 루프(`main.rs`)가 `take_navigation()`으로 꺼내 실제로 화면을 바꿉니다.

use std::io::{self, BufRead, Write};

use crate::models::MovieRecord;
use crate::services::render::render_movies;
use crate::ui::{FormLabel, ListMode, Page, StatusKind, Ui};

pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    next_page: Option<Page>,
    form_label: FormLabel,
    cancel_visible: bool,
}

impl TerminalUi<io::BufReader<io::Stdin>, io::Stdout> {
    /// 프로세스의 stdin/stdout을 사용하는 화면
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            next_page: None,
            form_label: FormLabel::AddMovie,
            cancel_visible: false,
        }
    }

    /// 요청된 페이지 이동을 꺼냅니다. 한 번 꺼내면 비워집니다.
    pub fn take_navigation(&mut self) -> Option<Page> {
        self.next_page.take()
    }

    pub fn form_label(&self) -> FormLabel {
        self.form_label
    }

    pub fn cancel_visible(&self) -> bool {
        self.cancel_visible
    }

    /// 한 줄을 출력합니다. 출력 실패는 로그로만 남깁니다.
    pub fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }

    /// `label: ` 프롬프트를 띄우고 한 줄을 읽습니다.
    ///
    /// 입력이 끝났으면(EOF) `Ok(None)`. 줄 끝의 개행은 제거됩니다.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Ui for TerminalUi<R, W> {
    fn navigate(&mut self, page: Page) {
        tracing::debug!("Navigate to {:?}", page);
        self.next_page = Some(page);
    }

    fn show_status(&mut self, kind: StatusKind, message: &str) {
        let marker = match kind {
            StatusKind::Success => "[ok]",
            StatusKind::Error => "[error]",
        };
        self.say(&format!("{} {}", marker, message));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        match self.prompt(&format!("{} [y/N]", prompt)) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }

    fn render_list(&mut self, movies: &[MovieRecord], mode: ListMode) {
        let text = render_movies(movies, mode);
        self.say("");
        self.say(&text);
        self.say("");
    }

    fn set_form_label(&mut self, label: FormLabel) {
        self.form_label = label;
    }

    fn set_cancel_visible(&mut self, visible: bool) {
        self.cancel_visible = visible;
    }

    fn scroll_to_form(&mut self) {
        let heading = format!("== {} ==", self.form_label.text());
        self.say(&heading);
    }
}
