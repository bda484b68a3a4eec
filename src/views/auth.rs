//! # 인증 페이지 (로그인, 회원가입)
//!
//! 로그인과 회원가입 폼이 제출될 때 호출되는 함수들입니다.
//!
//! ## 흐름
//! - 로그인 성공 → 세션 가드로 토큰 저장 → 관리 화면으로 이동
//! - 회원가입 성공 → 로그인 페이지로 이동
//! - 실패하면 백엔드 메시지(없으면 기본 문구)를 보여주고 현재 페이지에 머뭅니다
//!
//! 로그인 응답의 401은 "자격 증명이 틀림"이라는 뜻이므로
//! 세션 만료처럼 가로채지 않고 일반 거부로 처리합니다.

use crate::api::CatalogApi;
use crate::error::AppError;
use crate::middleware::SessionGuard;
use crate::models::Credentials;
use crate::ui::{Page, StatusKind, Ui};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// `POST /login`. 성공하면 토큰을 저장하고 관리 화면으로 이동합니다.
///
/// 실패하면 토큰은 저장되지 않고 현재 페이지에 머뭅니다.
pub async fn login(
    api: &CatalogApi,
    guard: &SessionGuard,
    credentials: &Credentials,
    ui: &mut dyn Ui,
) -> bool {
    let token = match api.login(credentials).await {
        Ok(token) => token,
        Err(e) => {
            tracing::info!("Login rejected for {}: {}", credentials.username, e);
            ui.show_status(StatusKind::Error, &e.user_message(LOGIN_FAILED));
            return false;
        }
    };

    if let Err(e) = guard.store_token(&token).await {
        ui.show_status(StatusKind::Error, &e.user_message(LOGIN_FAILED));
        return false;
    }

    ui.show_status(StatusKind::Success, "Login successful");
    ui.navigate(Page::Manage);
    true
}

/// `POST /register`. 성공하면 로그인 페이지로 이동합니다.
pub async fn register(api: &CatalogApi, credentials: &Credentials, ui: &mut dyn Ui) -> bool {
    match api.register(credentials).await {
        Ok(()) => {
            tracing::info!("Registered {}", credentials.username);
            ui.show_status(
                StatusKind::Success,
                "Registration successful, you can now log in",
            );
            ui.navigate(Page::Login);
            true
        }
        Err(e) => {
            if !matches!(e, AppError::Network(_)) {
                tracing::info!("Registration rejected for {}: {}", credentials.username, e);
            }
            ui.show_status(StatusKind::Error, &e.user_message(REGISTRATION_FAILED));
            false
        }
    }
}
