//! # 영화(Movie) 모델 정의
//!
//! 백엔드가 소유한 영화 레코드와, 생성/수정 요청 본문을 정의합니다.
//! 클라이언트는 렌더링할 때마다 목록을 새로 받아오므로
//! 이 구조체들은 잠깐 쓰고 버리는 복사본입니다.
//!
//! ## 개봉일(release_date) 형식
//! 백엔드는 개봉일을 타임스탬프(`2020-05-01T00:00:00Z`)로 보내지만,
//! 날짜만 있는 형식(`2020-05-01`)이나 `null`도 받아들입니다.
//! 폼에 채울 때는 항상 `YYYY-MM-DD` 달력 날짜로 정규화합니다.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// 폼 입력과 요청 본문에 쓰는 날짜 형식
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 영화 레코드: `GET /movies`, `GET /movies/public` 응답 배열의 한 원소입니다.
///
/// `id`는 서버가 부여하며 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub director: String,
    /// 0~10 범위의 평점. `null`이면 평점 없음 (0점과 구별됩니다)
    #[serde(default)]
    pub rating: Option<f64>,
    /// 백엔드가 보낸 원본 문자열 그대로 보관합니다 (None이면 개봉일 없음)
    #[serde(default)]
    pub release_date: Option<String>,
}

impl MovieRecord {
    /// 개봉일을 달력 날짜로 해석합니다. 없거나 해석할 수 없으면 None.
    pub fn release_day(&self) -> Option<NaiveDate> {
        self.release_date.as_deref().and_then(parse_release_date)
    }
}

/// 영화 생성/수정 요청: `POST /movies`, `PUT /movies/{id}`의 요청 본문입니다.
///
/// id는 포함하지 않습니다. 수정 대상 id는 URL 경로로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub director: String,
    /// 비어 있거나 숫자가 아닌 입력은 `null`로 보내고 판단은 백엔드에 맡깁니다
    pub rating: Option<f64>,
    /// 사용자가 입력한 `YYYY-MM-DD` 문자열 그대로
    pub release_date: String,
}

/// 백엔드가 보낸 개봉일 문자열을 달력 날짜로 해석합니다.
///
/// 다음 순서로 시도합니다:
/// 1. RFC 3339 타임스탬프 (`2020-05-01T00:00:00Z`, `2020-05-01T00:00:00+03:00`)
///    → 문자열에 적힌 날짜 부분을 그대로 사용 (시간대 변환 없음)
/// 2. 날짜만 있는 형식 (`2020-05-01`)
/// 3. 그 외 `T` 앞부분이 날짜인 형식 (`2020-05-01T00:00:00` 등)
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        // date_naive(): 타임스탬프 자신의 오프셋 기준 날짜
        return Some(timestamp.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }

    // split_once('T'): "2020-05-01T..." → ("2020-05-01", "...")
    raw.split_once('T')
        .and_then(|(day, _)| NaiveDate::parse_from_str(day, DATE_FORMAT).ok())
}

/// 폼의 날짜 입력칸에 넣을 문자열을 만듭니다.
///
/// 개봉일이 없거나 해석할 수 없으면 빈 문자열을 반환합니다.
/// 의미 없는 값을 입력칸에 보여주지 않기 위한 규칙입니다.
pub fn normalize_release_date(raw: Option<&str>) -> String {
    raw.and_then(parse_release_date)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// JSON `null`을 빈 문자열로 바꿔 역직렬화합니다.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
