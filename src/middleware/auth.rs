//! # 세션 가드 (Session Guard)
//!
//! 로그인 상태를 판단하고, 관리 화면을 보호하고, 세션의 생명주기를 관리합니다.
//! 토큰 저장소에 대한 **모든** 읽기/쓰기는 이 가드를 거칩니다.
//!
//! ## 토큰 생명주기
//! ```text
//! [로그아웃] ──store_token()──▶ [로그인] ──logout() / 401 응답──▶ [로그아웃]
//! ```
//!
//! 클라이언트는 토큰 만료를 미리 검사하지 않습니다.
//! 만료되거나 위조된 토큰은 요청이 401로 실패할 때에야 드러나며,
//! 그 전까지는 "한 번도 로그인하지 않은 상태"와 구별되지 않습니다.

use std::sync::Arc;

use thiserror::Error;

use crate::db::TokenStore;
use crate::error::AppError;
use crate::ui::{Page, Ui};

/// 가드가 다른 페이지로 이동시켰음을 알리는 신호
///
/// 호출자는 이 값을 받으면 현재 페이지의 나머지 처리를 중단해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("redirected to {0:?}")]
pub struct Redirected(pub Page);

#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn TokenStore>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// 저장된 토큰. 저장소 읽기에 실패하면 로그를 남기고 로그아웃 상태로 취급합니다.
    pub async fn token(&self) -> Option<String> {
        match self.store.get().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Failed to read session token: {}", e);
                None
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }

    /// 로그인 성공 시에만 호출됩니다. 기존 토큰은 덮어씁니다.
    pub async fn store_token(&self, token: &str) -> Result<(), AppError> {
        self.store.set(token).await?;
        tracing::info!("Session started");
        Ok(())
    }

    /// 관리 화면 진입 시 한 번 호출합니다.
    ///
    /// 로그인 상태면 현재 토큰을, 아니면 로그인 페이지로 이동시키고 `Redirected`를 돌려줍니다.
    pub async fn require_auth_or_redirect(&self, ui: &mut dyn Ui) -> Result<String, Redirected> {
        match self.token().await {
            Some(token) => Ok(token),
            None => {
                tracing::info!("Not authenticated, redirecting to login");
                ui.navigate(Page::Login);
                Err(Redirected(Page::Login))
            }
        }
    }

    /// 인증된 요청의 응답을 일반 처리 전에 먼저 검사합니다.
    ///
    /// 401이면 토큰을 지우고 로그인 페이지로 보낸 뒤 `Err(Redirected)`.
    /// 그 밖의 결과는 손대지 않고 `Ok(result)`로 그대로 넘깁니다.
    pub async fn handle_unauthorized<T>(
        &self,
        result: Result<T, AppError>,
        ui: &mut dyn Ui,
    ) -> Result<Result<T, AppError>, Redirected> {
        match result {
            Err(AppError::Unauthorized) => {
                tracing::info!("Session rejected by backend, clearing token");
                self.clear_token().await;
                ui.navigate(Page::Login);
                Err(Redirected(Page::Login))
            }
            other => Ok(other),
        }
    }

    /// 토큰을 지우고 공개 페이지로 이동합니다.
    pub async fn logout(&self, ui: &mut dyn Ui) {
        self.clear_token().await;
        tracing::info!("Logged out");
        ui.navigate(Page::Public);
    }

    async fn clear_token(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::error!("Failed to clear session token: {}", e);
        }
    }
}
