//! # 토큰 저장소 계층 (Durable Client Storage)
//!
//! 로그인 토큰을 보관하는 저장소입니다. 브라우저의 localStorage처럼
//! **키 하나**(`token`)에 Bearer 토큰 문자열 하나만 저장합니다.
//! 키가 없으면 로그아웃 상태입니다.
//!
//! 저장소에는 get/set/clear 세 가지 연산만 있으며,
//! 이 연산들은 `middleware::auth::SessionGuard`를 통해서만 호출됩니다.
//!
//! 구현체:
//! - `SqliteTokenStore` (`tokens` 모듈): 재시작 후에도 유지되는 SQLite 파일 저장소
//! - `MemoryTokenStore`: 프로세스 메모리에만 보관 (테스트, 일회성 실행용)

pub mod tokens;

pub use tokens::SqliteTokenStore;

use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Mutex;

/// 토큰을 저장하는 키 이름
pub const TOKEN_KEY: &str = "token";

/// 토큰 저장소 트레이트
///
/// #[async_trait]: `Arc<dyn TokenStore>`처럼 트레이트 객체로 쓸 수 있도록
/// async 메서드를 `Pin<Box<dyn Future>>` 반환 형태로 바꿔줍니다.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// 저장된 토큰을 읽습니다. 없으면 `None`.
    async fn get(&self) -> Result<Option<String>, AppError>;
    /// 토큰을 저장합니다. 기존 토큰은 덮어씁니다 (항상 최대 하나).
    async fn set(&self, token: &str) -> Result<(), AppError>;
    /// 토큰을 삭제합니다. 이미 없으면 아무 일도 하지 않습니다.
    async fn clear(&self) -> Result<(), AppError>;
}

/// 메모리 토큰 저장소
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이미 로그인된 상태로 시작합니다.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<String>, AppError> {
        Ok(self.lock().clone())
    }

    async fn set(&self, token: &str) -> Result<(), AppError> {
        *self.lock() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.lock() = None;
        Ok(())
    }
}

impl MemoryTokenStore {
    // 다른 스레드가 패닉해 락이 오염돼도 값 자체는 유효하므로 그대로 꺼내 씁니다
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
