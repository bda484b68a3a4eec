//! # 폼 모드 컨트롤러 (Form Mode Controller)
//!
//! 관리 화면에는 폼이 **하나**뿐이고, 이 폼은 두 가지 모드 중 하나입니다.
//!
//! ## 상태 머신
//! ```text
//!            begin_edit(record)
//!   Create ─────────────────────▶ Edit(id)
//!     ▲                              │
//!     └────── reset() ◀──────────────┘
//!        (취소 버튼 또는 저장 성공)
//!
//!   Edit(id1) ── begin_edit(record2) ──▶ reset() 후 Edit(id2)
//! ```
//!
//! - 처음 상태는 항상 `Create`
//! - 수정 중에 다른 레코드를 고르면 먼저 폼을 완전히 비운 뒤 다시 채웁니다
//!   (이전 레코드의 값이 남지 않음)
//! - 제출은 오직 현재 모드로만 분기합니다 (`submission()`)

use crate::models::{normalize_release_date, MovieDraft, MovieRecord};
use crate::ui::{FormLabel, Ui};

/// 폼 모드: "새로 만들기" 또는 "id번 레코드 수정"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(i64),
}

/// 폼 입력칸 이름 (터미널 화면에서 칸을 골라 수정할 때 사용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Genre,
    Director,
    Rating,
    ReleaseDate,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Genre,
        FormField::Director,
        FormField::Rating,
        FormField::ReleaseDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Genre => "Genre",
            FormField::Director => "Director",
            FormField::Rating => "Rating (0-10)",
            FormField::ReleaseDate => "Release date (YYYY-MM-DD)",
        }
    }
}

/// 폼 입력칸 값. 사용자가 입력한 문자열 그대로 보관합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub genre: String,
    pub director: String,
    pub rating: String,
    pub release_date: String,
}

impl FormFields {
    /// 레코드의 현재 값으로 입력칸을 채웁니다. 개봉일은 `YYYY-MM-DD`로 정규화.
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            genre: record.genre.clone(),
            director: record.director.clone(),
            // 평점이 없으면 "0"이 아니라 빈 칸으로 둡니다
            rating: record.rating.map(|rating| rating.to_string()).unwrap_or_default(),
            release_date: normalize_release_date(record.release_date.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Genre => &self.genre,
            FormField::Director => &self.director,
            FormField::Rating => &self.rating,
            FormField::ReleaseDate => &self.release_date,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Genre => &mut self.genre,
            FormField::Director => &mut self.director,
            FormField::Rating => &mut self.rating,
            FormField::ReleaseDate => &mut self.release_date,
        };
        *slot = value.into();
    }

    /// 요청 본문을 만듭니다. 평점이 비었거나 숫자가 아니면 `None`(null).
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            genre: self.genre.clone(),
            director: self.director.clone(),
            rating: self
                .rating
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rating| rating.is_finite()),
            release_date: self.release_date.clone(),
        }
    }
}

/// 제출 시 보낼 요청. 모드에 따라 결정됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(MovieDraft),
    Update(i64, MovieDraft),
}

/// 폼 모드 컨트롤러
#[derive(Debug, Default)]
pub struct FormController {
    mode: FormMode,
    fields: FormFields,
}

impl FormController {
    /// `Create` 모드, 빈 입력칸으로 시작합니다.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// 사용자 입력 반영. 모드는 바뀌지 않습니다.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// `Create → Edit(id)` 전이.
    ///
    /// `record`는 백엔드에서 방금 새로 받아온 값이어야 합니다.
    /// 이미 다른 레코드를 수정 중이었다면 먼저 `reset()`으로 완전히 비웁니다.
    pub fn begin_edit(&mut self, record: &MovieRecord, ui: &mut dyn Ui) {
        if self.mode != FormMode::Create {
            self.reset(ui);
        }

        self.fields = FormFields::from_record(record);
        self.mode = FormMode::Edit(record.id);
        tracing::debug!("Form switched to edit mode for movie {}", record.id);

        ui.set_form_label(FormLabel::EditMovie);
        ui.set_cancel_visible(true);
        ui.scroll_to_form();
    }

    /// `Edit(id) → Create` 전이 (취소, 저장 성공, 페이지 진입 시).
    pub fn reset(&mut self, ui: &mut dyn Ui) {
        self.fields = FormFields::default();
        self.mode = FormMode::Create;

        ui.set_form_label(FormLabel::AddMovie);
        ui.set_cancel_visible(false);
    }

    /// 현재 모드에 맞는 제출 요청을 만듭니다.
    pub fn submission(&self) -> Submission {
        let draft = self.fields.to_draft();
        match self.mode {
            FormMode::Create => Submission::Create(draft),
            FormMode::Edit(id) => Submission::Update(id, draft),
        }
    }
}
