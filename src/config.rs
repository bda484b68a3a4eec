//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 클라이언트 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `CINEMA_API_URL`: 백엔드 REST API 주소
//! - `CINEMA_SESSION_DB`: 로그인 토큰을 보관할 SQLite 데이터베이스 경로
//! - `CINEMA_HTTP_TIMEOUT_SECS`: HTTP 요청 타임아웃(초)

use std::env;
use std::time::Duration;

/// 설정되지 않았을 때 사용할 백엔드 주소
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// 토큰 저장소 기본 경로. `mode=rwc`는 파일이 없으면 새로 만듭니다.
pub const DEFAULT_SESSION_DB: &str = "sqlite:data/session.db?mode=rwc";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 클라이언트 전체 설정을 담는 구조체
///
/// 시작 시 환경변수에서 한 번 읽어온 후 각 컴포넌트에 전달됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 백엔드 주소 (끝의 `/`는 제거된 상태, 예: "http://localhost:8080")
    pub api_url: String,
    /// 토큰 저장소 연결 문자열 (예: "sqlite:data/session.db?mode=rwc")
    pub session_db_url: String,
    /// 모든 HTTP 요청에 적용되는 타임아웃
    pub request_timeout: Duration,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 실패하지 않습니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정을 만듭니다.
    ///
    /// 테스트에서 프로세스 환경변수를 건드리지 않고 설정을 주입할 때 사용합니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("CINEMA_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = lookup("CINEMA_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS); // 파싱 실패 시 기본값

        Self {
            // "http://host:8080/" → "http://host:8080"
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            session_db_url: lookup("CINEMA_SESSION_DB")
                .unwrap_or_else(|| DEFAULT_SESSION_DB.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
