//! # 카탈로그 REST API 클라이언트
//!
//! 백엔드의 HTTP 엔드포인트를 [`reqwest`]로 감싼 타입 있는 클라이언트입니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | GET | /movies/public?title&genre&director&sort&order | - | 공개 목록 |
//! | POST | /register | - | 회원가입 |
//! | POST | /login | - | 로그인 → `{token}` |
//! | GET | /movies?... | Bearer | 관리 목록 |
//! | POST | /movies | Bearer | 영화 생성 |
//! | PUT | /movies/{id} | Bearer | 영화 수정 |
//! | DELETE | /movies/{id} | Bearer | 영화 삭제 |
//!
//! ## 응답 분류
//! - 2xx → `Ok`
//! - 인증 엔드포인트의 401 → `AppError::Unauthorized` (세션 가드가 가로챔)
//! - 그 밖의 비 2xx → `AppError::Rejected { status, message }`
//! - 연결 실패, 타임아웃, 깨진 JSON → `AppError::Network`

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{AppError, ErrorBody};
use crate::models::{Credentials, LoginResponse, MovieDraft, MovieRecord};
use crate::services::query::QuerySpec;

/// 카탈로그 백엔드 HTTP 클라이언트
///
/// reqwest::Client는 내부적으로 Arc를 사용하므로 clone해도 연결 풀을 공유합니다.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogApi {
    /// 새 클라이언트를 만듭니다.
    ///
    /// * `base_url` - 예: `http://localhost:8080` (끝의 `/`는 무시)
    /// * `timeout` - 요청 하나당 최대 대기 시간
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /movies/public`: 인증 없이 목록을 조회합니다.
    pub async fn public_movies(&self, query: &QuerySpec) -> Result<Vec<MovieRecord>, AppError> {
        let url = format!("{}/movies/public{}", self.base_url, query.to_query_string());
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let movies: Option<Vec<MovieRecord>> = Self::parse_json(response, false).await?;
        // 백엔드는 결과가 없을 때 `null`을 보낼 수 있습니다
        Ok(movies.unwrap_or_default())
    }

    /// `POST /register`
    pub async fn register(&self, credentials: &Credentials) -> Result<(), AppError> {
        let response = self
            .client
            .post(format!("{}/register", self.base_url))
            .json(credentials)
            .send()
            .await?;

        Self::ensure_success(response, false).await?;
        Ok(())
    }

    /// `POST /login`: 성공하면 Bearer 토큰을 돌려줍니다.
    ///
    /// 잘못된 자격 증명에 대한 401은 세션 만료가 아니므로 `Rejected`로 분류합니다.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AppError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(credentials)
            .send()
            .await?;

        let body: LoginResponse = Self::parse_json(response, false).await?;
        Ok(body.token)
    }

    /// `GET /movies`: 인증된 목록 조회. 공개 목록과 같은 필터를 받습니다.
    pub async fn movies(&self, token: &str, query: &QuerySpec) -> Result<Vec<MovieRecord>, AppError> {
        let url = format!("{}/movies{}", self.base_url, query.to_query_string());
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let movies: Option<Vec<MovieRecord>> = Self::parse_json(response, true).await?;
        Ok(movies.unwrap_or_default())
    }

    /// `POST /movies`: 생성된 레코드를 돌려줍니다.
    pub async fn create_movie(&self, token: &str, draft: &MovieDraft) -> Result<MovieRecord, AppError> {
        tracing::debug!("POST /movies ({})", draft.title);
        let response = self
            .client
            .post(format!("{}/movies", self.base_url))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;

        Self::parse_json(response, true).await
    }

    /// `PUT /movies/{id}`: 수정된 레코드를 돌려줍니다.
    pub async fn update_movie(
        &self,
        token: &str,
        id: i64,
        draft: &MovieDraft,
    ) -> Result<MovieRecord, AppError> {
        tracing::debug!("PUT /movies/{}", id);
        let response = self
            .client
            .put(format!("{}/movies/{}", self.base_url, id))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;

        Self::parse_json(response, true).await
    }

    /// `DELETE /movies/{id}`: 응답 본문은 버립니다.
    pub async fn delete_movie(&self, token: &str, id: i64) -> Result<(), AppError> {
        tracing::debug!("DELETE /movies/{}", id);
        let response = self
            .client
            .delete(format!("{}/movies/{}", self.base_url, id))
            .bearer_auth(token)
            .send()
            .await?;

        Self::ensure_success(response, true).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// 2xx가 아니면 상태 코드와 본문의 에러 메시지로 `AppError`를 만듭니다.
    ///
    /// `authenticated`가 true인 요청의 401만 `Unauthorized`가 됩니다.
    async fn ensure_success(
        response: reqwest::Response,
        authenticated: bool,
    ) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if authenticated && status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::extract_message(&body);
        tracing::warn!("Backend rejected request ({}): {:?}", status, message);

        Err(AppError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// 성공 응답의 JSON 본문을 원하는 타입으로 파싱합니다.
    async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
        authenticated: bool,
    ) -> Result<T, AppError> {
        let response = Self::ensure_success(response, authenticated).await?;
        Ok(response.json::<T>().await?)
    }
}
