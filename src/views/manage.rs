//! # 관리 화면
//!
//! 인증된 사용자만 들어올 수 있는 페이지입니다.
//! 필터 입력칸, 단일 폼, 렌더링된 목록의 동작 테이블을 함께 들고 있습니다.
//!
//! ## 진입 순서
//! 1. 세션 가드 검사 (로그인 안 됐으면 로그인 페이지로 이동 후 중단)
//! 2. 폼을 `Create`로 초기화
//! 3. 현재 필터로 목록 조회
//!
//! 모든 동작은 `Result<_, Redirected>`를 돌려줍니다.
//! `Err`를 받으면 세션이 끝난 것이므로 호출자는 이 페이지를 떠나야 합니다.

use crate::api::CatalogApi;
use crate::middleware::{Redirected, SessionGuard};
use crate::models::MovieRecord;
use crate::services::actions::{ActionTable, RecordAction};
use crate::services::form::{FormController, FormField};
use crate::services::query::FilterInputs;
use crate::services::sync::{MutationSynchronizer, Outcome};
use crate::ui::{StatusKind, Ui};

pub const UNKNOWN_COMMAND: &str = "Unknown command";

pub struct ManageView {
    sync: MutationSynchronizer,
    form: FormController,
    filters: FilterInputs,
}

impl ManageView {
    pub fn new(api: CatalogApi, guard: SessionGuard) -> Self {
        Self {
            sync: MutationSynchronizer::new(api, guard),
            form: FormController::new(),
            filters: FilterInputs::default(),
        }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn filters(&self) -> &FilterInputs {
        &self.filters
    }

    /// 필터 입력칸. 바꾼 뒤 `apply_filters()`를 호출해야 목록에 반영됩니다.
    pub fn filters_mut(&mut self) -> &mut FilterInputs {
        &mut self.filters
    }

    pub fn displayed(&self) -> &[MovieRecord] {
        self.sync.displayed()
    }

    pub fn actions(&self) -> &ActionTable {
        self.sync.actions()
    }

    /// 페이지 진입
    pub async fn enter(&mut self, ui: &mut dyn Ui) -> Result<(), Redirected> {
        self.sync.guard().require_auth_or_redirect(ui).await?;
        self.form.reset(ui);
        self.sync.refresh(&self.filters, ui).await?;
        Ok(())
    }

    /// 현재 필터로 목록을 다시 받아옵니다.
    pub async fn apply_filters(&mut self, ui: &mut dyn Ui) -> Result<bool, Redirected> {
        self.sync.refresh(&self.filters, ui).await
    }

    pub async fn clear_filters(&mut self, ui: &mut dyn Ui) -> Result<bool, Redirected> {
        self.filters.clear();
        self.sync.refresh(&self.filters, ui).await
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// `e<id>` / `d<id>` 명령을 동작 테이블로 찾아 실행합니다.
    ///
    /// 화면에 없는 id나 잘못된 명령이면 상태 메시지를 보여주고 `Ok(None)`.
    pub async fn dispatch(
        &mut self,
        command: &str,
        ui: &mut dyn Ui,
    ) -> Result<Option<RecordAction>, Redirected> {
        let Some(action) = self.sync.actions().dispatch(command) else {
            ui.show_status(StatusKind::Error, UNKNOWN_COMMAND);
            return Ok(None);
        };

        match action {
            RecordAction::Edit(id) => {
                self.edit(id, ui).await?;
            }
            RecordAction::Delete(id) => {
                self.delete(id, ui).await?;
            }
        }
        Ok(Some(action))
    }

    /// id번 레코드를 새로 받아와 폼을 수정 모드로 바꿉니다.
    pub async fn edit(&mut self, id: i64, ui: &mut dyn Ui) -> Result<bool, Redirected> {
        self.sync.begin_edit(id, &mut self.form, ui).await
    }

    /// 확인을 받은 뒤 삭제합니다. 거절하면 `Ok(None)`.
    pub async fn delete(
        &mut self,
        id: i64,
        ui: &mut dyn Ui,
    ) -> Result<Option<Outcome<()>>, Redirected> {
        self.sync
            .remove(id, &mut self.form, &self.filters, ui)
            .await
    }

    pub async fn submit(&mut self, ui: &mut dyn Ui) -> Result<Outcome<MovieRecord>, Redirected> {
        self.sync.submit(&mut self.form, &self.filters, ui).await
    }

    /// 수정을 취소하고 폼을 비웁니다.
    pub fn cancel(&mut self, ui: &mut dyn Ui) {
        self.form.reset(ui);
    }

    pub async fn logout(&mut self, ui: &mut dyn Ui) {
        self.sync.guard().logout(ui).await;
    }
}
