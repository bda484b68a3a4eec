//! # SQLite 토큰 저장소
//!
//! 로그인 토큰을 SQLite 파일에 저장합니다.
//! 프로그램을 다시 실행해도 로그인 상태가 유지됩니다.
//!
//! ## 테이블 구조
//! ```text
//! session
//! ┌────────────┬─────────────────────┐
//! │ key (PK)   │ value               │
//! ├────────────┼─────────────────────┤
//! │ "token"    │ "eyJhbGciOi..."     │  ← 로그인 상태일 때만 존재
//! └────────────┴─────────────────────┘
//! ```

use crate::db::{TokenStore, TOKEN_KEY};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// SQLite 기반 토큰 저장소
///
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
    pool: SqlitePool,
}

impl SqliteTokenStore {
    /// 데이터베이스에 연결하고 마이그레이션을 실행합니다.
    ///
    /// # 매개변수
    /// - `database_url`: 예) `"sqlite:data/session.db?mode=rwc"`
    ///
    /// 연결 문자열이 가리키는 디렉토리가 없으면 먼저 만듭니다.
    pub async fn open(database_url: &str) -> Result<Self, AppError> {
        if let Some(dir) = parent_dir(database_url) {
            tokio::fs::create_dir_all(dir).await?;
        }

        // 토큰 하나만 다루므로 연결 하나로 충분합니다
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        Self::from_pool(pool).await
    }

    /// 이미 만들어진 풀로 저장소를 구성합니다.
    ///
    /// sqlx::migrate!는 컴파일 타임에 ./migrations 폴더의 SQL 파일들을 포함시키고,
    /// 아직 실행되지 않은 마이그레이션만 순서대로 실행합니다.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("Session store migrations applied");

        Ok(Self { pool })
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn get(&self) -> Result<Option<String>, AppError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM session WHERE key = ?")
            .bind(TOKEN_KEY)
            .fetch_optional(&self.pool) // 0행이면 None
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, token: &str) -> Result<(), AppError> {
        // UPSERT: 키가 이미 있으면 값만 바꿉니다 → 토큰은 항상 최대 하나
        sqlx::query(
            r#"
            INSERT INTO session (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(TOKEN_KEY)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM session WHERE key = ?")
            .bind(TOKEN_KEY)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// `sqlite:data/session.db?mode=rwc` → `Some("data")`
///
/// 메모리 DB(`sqlite::memory:`)나 디렉토리 없는 경로는 None.
fn parent_dir(database_url: &str) -> Option<&str> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.starts_with(':') {
        return None;
    }
    match path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => Some(dir),
        _ => None,
    }
}
