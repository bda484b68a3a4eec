//! # 변경 동기화기 (Mutation Synchronizer)
//!
//! 원격 변경(생성/수정/삭제)과 화면에 그려진 목록을 맞춰주는 컴포넌트입니다.
//!
//! ## 동작 방식
//! 1. 요청마다 세션 가드에서 토큰을 새로 읽어 Bearer 헤더로 붙입니다
//! 2. 응답은 먼저 세션 가드가 검사합니다 (401이면 토큰 삭제 + 로그인 페이지로 이동)
//! 3. 나머지 결과는 세 가지로 분류합니다:
//!    - `Success`: 상태 메시지 → 폼을 `Create`로 초기화 → 현재 필터로 목록 **전체 재조회**
//!    - `Rejected`: 백엔드 메시지(없으면 기본 문구)를 보여주고 폼은 그대로 둡니다
//!    - `NetworkFailure`: 네트워크 오류 메시지를 보여주고 폼은 그대로 둡니다
//!
//! 재조회는 변경 요청의 응답을 받은 **뒤에만** 시작합니다 (`.await` 순서).
//! 목록을 로컬에서 고치지 않고 항상 다시 받아오므로,
//! 변경 후 화면의 목록은 언제나 백엔드의 실제 상태를 반영합니다.
//!
//! 요청 중복 방지나 취소 기능은 없습니다. 같은 동작을 연달아 실행하면 요청도 연달아 나갑니다.

use crate::api::CatalogApi;
use crate::error::{AppError, NETWORK_ERROR_MESSAGE};
use crate::middleware::{Redirected, SessionGuard};
use crate::models::{MovieDraft, MovieRecord};
use crate::services::actions::ActionTable;
use crate::services::form::{FormController, Submission};
use crate::services::query::{build_query, FilterInputs, QuerySpec};
use crate::ui::{ListMode, StatusKind, Ui};

pub const SAVE_FAILED: &str = "Failed to save movie";
pub const DELETE_FAILED: &str = "Failed to delete movie";
pub const LOAD_FAILED: &str = "Failed to load movies";
pub const EDIT_LOAD_FAILED: &str = "Failed to load movie";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this movie?";

/// 변경 요청의 결과 (401은 세션 가드가 먼저 가로채므로 여기 없습니다)
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// 백엔드가 변경을 확정함
    Success(T),
    /// 백엔드가 거부함. 사용자에게 보여줄 메시지
    Rejected(String),
    /// 백엔드에 닿지 못했거나 응답을 해석할 수 없음
    NetworkFailure,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// 요청 결과를 분류합니다. `AppError::Unauthorized`는 이미 가드가 처리한 뒤입니다.
    fn classify(result: Result<T, AppError>, fallback: &str) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(AppError::Network(e)) => {
                tracing::warn!("Mutation failed to reach backend: {}", e);
                Outcome::NetworkFailure
            }
            Err(e) => Outcome::Rejected(e.user_message(fallback)),
        }
    }
}

pub struct MutationSynchronizer {
    api: CatalogApi,
    guard: SessionGuard,
    /// 마지막으로 화면에 그린 목록
    displayed: Vec<MovieRecord>,
    /// `displayed` 기준의 수정/삭제 동작 테이블
    actions: ActionTable,
}

impl MutationSynchronizer {
    pub fn new(api: CatalogApi, guard: SessionGuard) -> Self {
        Self {
            api,
            guard,
            displayed: Vec::new(),
            actions: ActionTable::default(),
        }
    }

    pub fn displayed(&self) -> &[MovieRecord] {
        &self.displayed
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    /// `POST /movies` 후 결과를 분류합니다. 화면 효과는 세션 가드의 이동뿐입니다.
    pub async fn create(
        &self,
        draft: &MovieDraft,
        ui: &mut dyn Ui,
    ) -> Result<Outcome<MovieRecord>, Redirected> {
        let token = self.guard.require_auth_or_redirect(ui).await?;
        let result = self.api.create_movie(&token, draft).await;
        let result = self.guard.handle_unauthorized(result, ui).await?;
        Ok(Outcome::classify(result, SAVE_FAILED))
    }

    /// `PUT /movies/{id}` 후 결과를 분류합니다.
    pub async fn update(
        &self,
        id: i64,
        draft: &MovieDraft,
        ui: &mut dyn Ui,
    ) -> Result<Outcome<MovieRecord>, Redirected> {
        let token = self.guard.require_auth_or_redirect(ui).await?;
        let result = self.api.update_movie(&token, id, draft).await;
        let result = self.guard.handle_unauthorized(result, ui).await?;
        Ok(Outcome::classify(result, SAVE_FAILED))
    }

    /// 폼을 제출합니다. 현재 폼 모드만으로 생성/수정을 결정합니다.
    ///
    /// 성공하면 폼을 초기화하고 `filters`(호출 시점의 필터)로 목록을 한 번 다시 받아옵니다.
    pub async fn submit(
        &mut self,
        form: &mut FormController,
        filters: &FilterInputs,
        ui: &mut dyn Ui,
    ) -> Result<Outcome<MovieRecord>, Redirected> {
        let (outcome, success_message) = match form.submission() {
            Submission::Create(draft) => (self.create(&draft, ui).await?, "Movie added"),
            Submission::Update(id, draft) => (self.update(id, &draft, ui).await?, "Movie updated"),
        };

        self.settle(outcome, success_message, form, filters, ui).await
    }

    /// 영화를 삭제합니다.
    ///
    /// 먼저 사용자에게 확인을 받습니다. 거절하면 요청을 보내지 않고 `Ok(None)`.
    pub async fn remove(
        &mut self,
        id: i64,
        form: &mut FormController,
        filters: &FilterInputs,
        ui: &mut dyn Ui,
    ) -> Result<Option<Outcome<()>>, Redirected> {
        if !ui.confirm(DELETE_PROMPT) {
            tracing::debug!("Deletion of movie {} declined", id);
            return Ok(None);
        }

        let token = self.guard.require_auth_or_redirect(ui).await?;
        let result = self.api.delete_movie(&token, id).await;
        let result = self.guard.handle_unauthorized(result, ui).await?;
        let outcome = Outcome::classify(result, DELETE_FAILED);

        self.settle(outcome, "Movie deleted", form, filters, ui)
            .await
            .map(Some)
    }

    /// 관리 목록을 현재 필터로 다시 받아와 그립니다.
    ///
    /// 실패하면 이전 목록을 그대로 두고 상태 메시지만 보여줍니다. 성공 여부를 돌려줍니다.
    pub async fn refresh(
        &mut self,
        filters: &FilterInputs,
        ui: &mut dyn Ui,
    ) -> Result<bool, Redirected> {
        let token = self.guard.require_auth_or_redirect(ui).await?;
        let query = build_query(filters);
        let result = self.api.movies(&token, &query).await;

        match self.guard.handle_unauthorized(result, ui).await? {
            Ok(movies) => {
                tracing::debug!("Loaded {} movies", movies.len());
                self.actions = ActionTable::from_movies(&movies);
                ui.render_list(&movies, ListMode::Manage);
                self.displayed = movies;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("Failed to load movies: {}", e);
                ui.show_status(StatusKind::Error, LOAD_FAILED);
                Ok(false)
            }
        }
    }

    /// 수정할 레코드를 백엔드에서 새로 받아와 폼을 `Edit(id)`로 바꿉니다.
    ///
    /// 단건 조회 엔드포인트가 없으므로 인증된 전체 목록(필터 없음)을 받아 id로 찾습니다.
    /// 레코드가 없으면 "Movie not found"를 보여주고 폼은 그대로 둡니다.
    pub async fn begin_edit(
        &mut self,
        id: i64,
        form: &mut FormController,
        ui: &mut dyn Ui,
    ) -> Result<bool, Redirected> {
        let token = self.guard.require_auth_or_redirect(ui).await?;
        let result = self.api.movies(&token, &QuerySpec::default()).await;

        match self.guard.handle_unauthorized(result, ui).await? {
            Ok(movies) => match movies.into_iter().find(|movie| movie.id == id) {
                Some(record) => {
                    form.begin_edit(&record, ui);
                    Ok(true)
                }
                None => {
                    tracing::warn!("Movie {} not found for editing", id);
                    let message = AppError::NotFound.user_message(EDIT_LOAD_FAILED);
                    ui.show_status(StatusKind::Error, &message);
                    Ok(false)
                }
            },
            Err(e) => {
                ui.show_status(StatusKind::Error, &e.user_message(EDIT_LOAD_FAILED));
                Ok(false)
            }
        }
    }

    /// 분류된 결과를 화면과 폼에 반영합니다.
    async fn settle<T>(
        &mut self,
        outcome: Outcome<T>,
        success_message: &str,
        form: &mut FormController,
        filters: &FilterInputs,
        ui: &mut dyn Ui,
    ) -> Result<Outcome<T>, Redirected> {
        match &outcome {
            Outcome::Success(_) => {
                ui.show_status(StatusKind::Success, success_message);
                form.reset(ui);
                self.refresh(filters, ui).await?;
            }
            Outcome::Rejected(message) => ui.show_status(StatusKind::Error, message),
            Outcome::NetworkFailure => ui.show_status(StatusKind::Error, NETWORK_ERROR_MESSAGE),
        }
        Ok(outcome)
    }
}
