//! 통합 테스트용 스텁 백엔드
//!
//! 실제 카탈로그 백엔드와 같은 엔드포인트를 메모리 위에서 흉내 냅니다.
//! - Bearer 토큰은 jsonwebtoken으로 발급/검증합니다 (위조 토큰은 401)
//! - 들어온 모든 요청(메서드, 경로, 쿼리)을 순서대로 기록합니다

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use cinema_client::api::CatalogApi;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const JWT_SECRET: &str = "stub-secret";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret123";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// 기록된 요청 하나
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StubMovie {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub director: String,
    pub rating: Option<f64>,
    /// 백엔드처럼 RFC 3339 타임스탬프로 내보냅니다
    pub release_date: String,
}

#[derive(Debug, Default)]
pub struct StubData {
    pub movies: Vec<StubMovie>,
    pub users: HashMap<String, String>,
    pub requests: Vec<RecordedRequest>,
    /// true면 `PUT /movies/{id}`가 JSON이 아닌 본문으로 200을 돌려줍니다
    pub garble_updates: bool,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct StubState {
    inner: Arc<Mutex<StubData>>,
}

impl StubState {
    pub fn data(&self) -> MutexGuard<'_, StubData> {
        self.inner.lock().unwrap()
    }
}

#[derive(Debug, Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct DraftBody {
    title: String,
    genre: String,
    director: String,
    rating: Option<f64>,
    release_date: String,
}

type Reply = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

/// 실행 중인 스텁 서버
pub struct Stub {
    pub base_url: String,
    pub state: StubState,
}

impl Stub {
    pub fn api(&self) -> CatalogApi {
        CatalogApi::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    pub fn token_for(&self, user: &str) -> String {
        issue_token(user)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.data().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.data().requests.clear();
    }

    /// 특정 메서드+경로 요청 수
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn movie(&self, id: i64) -> Option<StubMovie> {
        self.state.data().movies.iter().find(|m| m.id == id).cloned()
    }
}

/// 시드 데이터를 넣고 임의 포트에서 스텁 서버를 띄웁니다.
pub async fn spawn() -> Stub {
    let state = StubState::default();
    {
        let mut data = state.data();
        data.users.insert(USERNAME.to_string(), PASSWORD.to_string());
        data.movies = vec![
            StubMovie {
                id: 3,
                title: "Alien".to_string(),
                genre: "Horror".to_string(),
                director: "Ridley Scott".to_string(),
                rating: Some(8.5),
                release_date: "1979-05-25T00:00:00Z".to_string(),
            },
            StubMovie {
                id: 7,
                title: "Heat".to_string(),
                genre: "Crime".to_string(),
                director: "Michael Mann".to_string(),
                rating: Some(8.3),
                release_date: "2020-05-01T00:00:00Z".to_string(),
            },
        ];
        data.next_id = 8;
    }

    let app = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/movies/public", get(public_movies))
        .route("/movies", get(movies).post(create_movie))
        .route("/movies/{id}", put(update_movie).delete(delete_movie))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Stub {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// 아무것도 듣고 있지 않은 주소 (네트워크 실패 재현용)
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn issue_token(user: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user.to_string(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::minutes(15)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

fn authorize(headers: &HeaderMap) -> Result<String, Reply> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Authorization header required"))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .map_err(|_| error(StatusCode::UNAUTHORIZED, "Invalid token"))
}

async fn record(State(state): State<StubState>, request: Request, next: Next) -> Response {
    state.data().requests.push(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
    });
    next.run(request).await
}

async fn register(State(state): State<StubState>, Json(body): Json<CredentialsBody>) -> Reply {
    let mut data = state.data();
    if body.username.is_empty() || body.password.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Username and password are required");
    }
    if data.users.contains_key(&body.username) {
        return error(StatusCode::CONFLICT, "Username already exists");
    }
    data.users.insert(body.username, body.password);
    (StatusCode::CREATED, Json(json!({ "message": "User created" })))
}

async fn login(State(state): State<StubState>, Json(body): Json<CredentialsBody>) -> Reply {
    let valid = state.data().users.get(&body.username) == Some(&body.password);
    if !valid {
        return error(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    (StatusCode::OK, Json(json!({ "token": issue_token(&body.username) })))
}

fn filtered(movies: &[StubMovie], params: &HashMap<String, String>) -> Vec<StubMovie> {
    let contains = |value: &str, key: &str| {
        params
            .get(key)
            .map(|needle| value.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(true)
    };

    let mut result: Vec<StubMovie> = movies
        .iter()
        .filter(|m| contains(&m.title, "title") && contains(&m.genre, "genre") && contains(&m.director, "director"))
        .cloned()
        .collect();

    if let Some(field) = params.get("sort") {
        result.sort_by(|a, b| match field.as_str() {
            "rating" => a.rating.partial_cmp(&b.rating).unwrap_or(std::cmp::Ordering::Equal),
            "release_date" => a.release_date.cmp(&b.release_date),
            "genre" => a.genre.cmp(&b.genre),
            "director" => a.director.cmp(&b.director),
            _ => a.title.cmp(&b.title),
        });
        if params.get("order").map(String::as_str) == Some("desc") {
            result.reverse();
        }
    }
    result
}

async fn public_movies(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<StubMovie>> {
    Json(filtered(&state.data().movies, &params))
}

async fn movies(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<StubMovie>>, Reply> {
    authorize(&headers)?;
    Ok(Json(filtered(&state.data().movies, &params)))
}

fn validate(body: &DraftBody) -> Result<String, Reply> {
    if body.title.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Title is required"));
    }
    let date = NaiveDate::parse_from_str(&body.release_date, "%Y-%m-%d")
        .map_err(|_| error(StatusCode::BAD_REQUEST, "Invalid date format. Use YYYY-MM-DD"))?;
    Ok(format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
}

async fn create_movie(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<DraftBody>,
) -> Result<Reply, Reply> {
    authorize(&headers)?;
    let release_date = validate(&body)?;

    let mut data = state.data();
    let movie = StubMovie {
        id: data.next_id,
        title: body.title,
        genre: body.genre,
        director: body.director,
        rating: body.rating,
        release_date,
    };
    data.next_id += 1;
    data.movies.push(movie.clone());
    Ok((StatusCode::CREATED, Json(json!(movie))))
}

async fn update_movie(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<DraftBody>,
) -> Result<Response, Reply> {
    authorize(&headers)?;
    if state.data().garble_updates {
        return Ok((StatusCode::OK, "<html>proxy error</html>").into_response());
    }
    let release_date = validate(&body)?;

    let mut data = state.data();
    let movie = data
        .movies
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Movie not found"))?;
    movie.title = body.title;
    movie.genre = body.genre;
    movie.director = body.director;
    movie.rating = body.rating;
    movie.release_date = release_date;
    Ok((StatusCode::OK, Json(json!(movie.clone()))).into_response())
}

async fn delete_movie(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, Reply> {
    authorize(&headers)?;

    let mut data = state.data();
    let before = data.movies.len();
    data.movies.retain(|m| m.id != id);
    if data.movies.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Movie not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
