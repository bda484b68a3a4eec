//! # 에러 처리 모듈
//!
//! 클라이언트에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): HTTP 응답 분류, 저장소 오류 등을 하나의 타입으로 통합
//! - `user_message()`: 에러를 사용자에게 보여줄 짧은 상태 메시지로 변환
//! - `ErrorBody`: 백엔드가 보내는 `{"error": ...}` 본문 파싱

use serde::Deserialize;
use thiserror::Error;

/// 네트워크 오류 시 사용자에게 보여줄 일반 메시지
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// 클라이언트에서 발생할 수 있는 모든 에러 종류
///
/// REST 호출 결과는 `api` 모듈에서 이 타입으로 분류됩니다.
/// - 2xx가 아닌 응답 → `Unauthorized` / `NotFound` / `Rejected`
/// - 연결 실패, 타임아웃, 깨진 JSON 본문 → `Network`
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청 자체가 실패했거나 응답 본문을 해석할 수 없음
    /// #[from]: reqwest::Error → AppError::Network 자동 변환
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 응답: 토큰이 없거나 만료/위조됨
    #[error("Unauthorized")]
    Unauthorized,

    /// 요청한 영화가 존재하지 않음
    #[error("Resource not found")]
    NotFound,

    /// 백엔드가 요청을 거부함 (400, 409, 500 등)
    /// `message`는 백엔드가 본문에 담아 보낸 에러 메시지입니다 (없을 수도 있음).
    #[error("Request rejected ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// 토큰 저장소(SQLite) 오류
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// 토큰 저장소 스키마 마이그레이션 실패
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// 파일 입출력 오류 (저장소 디렉토리 생성 등)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// 에러를 사용자에게 보여줄 메시지로 변환합니다.
    ///
    /// 백엔드가 직접 보낸 메시지는 그대로(verbatim) 보여주고,
    /// 내부 에러(네트워크, 저장소)는 로그에만 자세히 기록한 뒤
    /// 일반적인 메시지만 반환합니다.
    ///
    /// # 매개변수
    /// - `fallback`: 백엔드가 메시지를 주지 않았을 때 쓸 기본 문구
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Rejected {
                message: Some(msg), ..
            } => msg.clone(),
            AppError::Rejected { message: None, .. } => fallback.to_string(),
            AppError::NotFound => "Movie not found".to_string(),
            AppError::Unauthorized => "Session expired, please log in again".to_string(),
            AppError::Network(e) => {
                tracing::warn!("Network error: {}", e);
                NETWORK_ERROR_MESSAGE.to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                "Local storage error".to_string()
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {}", e);
                "Local storage error".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                "Local storage error".to_string()
            }
        }
    }
}

/// 백엔드 에러 응답 본문
///
/// 두 가지 형태를 모두 받아들입니다:
/// - `{"error": "Invalid date format. Use YYYY-MM-DD"}`
/// - `{"error": {"code": "bad_request", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// `error` 필드의 내용
///
/// #[serde(untagged)]: 태그 없이 위에서부터 순서대로 맞는 형태를 찾습니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Plain(String),
    Structured {
        #[serde(default)]
        code: Option<String>,
        message: String,
    },
}

impl ErrorBody {
    /// 응답 본문 텍스트에서 에러 메시지를 꺼냅니다.
    /// JSON이 아니거나 `error` 필드가 없으면 `None`을 반환합니다.
    pub fn extract_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        let message = match parsed.error {
            ErrorDetail::Plain(msg) => msg,
            ErrorDetail::Structured { code, message } => {
                if let Some(code) = code {
                    tracing::debug!("Backend error code: {}", code);
                }
                message
            }
        };
        // 빈 문자열은 메시지가 없는 것으로 취급합니다
        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }
}
