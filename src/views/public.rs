//! 공개 목록 페이지. 인증 없이 필터와 정렬만 지원합니다.

use crate::api::CatalogApi;
use crate::models::MovieRecord;
use crate::services::query::{build_query, FilterInputs};
use crate::services::sync::LOAD_FAILED;
use crate::ui::{ListMode, StatusKind, Ui};

pub struct PublicView {
    api: CatalogApi,
    filters: FilterInputs,
    movies: Vec<MovieRecord>,
}

impl PublicView {
    pub fn new(api: CatalogApi) -> Self {
        Self {
            api,
            filters: FilterInputs::default(),
            movies: Vec::new(),
        }
    }

    pub fn filters(&self) -> &FilterInputs {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterInputs {
        &mut self.filters
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// 현재 필터로 `GET /movies/public`을 호출하고 그립니다.
    ///
    /// 실패해도 이전 목록은 지우지 않고 상태 메시지만 보여줍니다.
    pub async fn load(&mut self, ui: &mut dyn Ui) -> bool {
        let query = build_query(&self.filters);
        match self.api.public_movies(&query).await {
            Ok(movies) => {
                ui.render_list(&movies, ListMode::Public);
                self.movies = movies;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to load public movies: {}", e);
                ui.show_status(StatusKind::Error, LOAD_FAILED);
                false
            }
        }
    }

    /// 모든 필터를 지우고 다시 불러옵니다.
    pub async fn clear_filters(&mut self, ui: &mut dyn Ui) -> bool {
        self.filters.clear();
        self.load(ui).await
    }
}
