//! # 카탈로그 쿼리 빌더
//!
//! 사용자가 입력한 필터/정렬 값을 정규화된 쿼리로 바꿉니다.
//! 공개 목록(`/movies/public`)과 관리 목록(`/movies`) 모두 같은 빌더를 사용합니다.
//!
//! ## 규칙
//! - 입력칸이 빈 문자열이면 해당 파라미터는 **아예 보내지 않습니다** (`title=` 같은 빈 값 없음)
//! - `sort`와 `order`는 항상 쌍으로 들어가거나, 둘 다 빠집니다
//! - 정렬 필드를 골랐는데 순서를 지정하지 않았으면 오름차순(`asc`)
//! - 파라미터 순서는 항상 `title, genre, director, sort, order`로 고정
//!   → 같은 입력은 언제나 같은 쿼리 문자열을 만듭니다
//!
//! ## 예시
//! ```text
//! title="Matrix", sort_field="rating", sort_order="desc"
//!   → ?title=Matrix&sort=rating&order=desc
//! genre="Sci-Fi & Fantasy"
//!   → ?genre=Sci-Fi%20%26%20Fantasy
//! ```

/// 화면의 필터/정렬 입력칸 값 그대로
///
/// 쿼리를 만들 때마다 이 값에서 새로 빌드하며, 따로 저장하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub title: String,
    pub genre: String,
    pub director: String,
    /// 정렬 기준 컬럼 (예: "title", "rating", "release_date"). 빈 문자열이면 정렬 없음
    pub sort_field: String,
    /// "asc" 또는 "desc". 그 밖의 값은 오름차순으로 취급합니다
    pub sort_order: String,
}

impl FilterInputs {
    /// 모든 입력칸을 비우고 정렬 순서를 오름차순으로 되돌립니다.
    pub fn clear(&mut self) {
        *self = Self {
            sort_order: SortOrder::Asc.as_str().to_string(),
            ..Self::default()
        };
    }
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// 입력값을 정렬 방향으로 해석합니다. "desc"(대소문자 무시)만 내림차순.
    pub fn from_input(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// 정렬 기준과 방향. 항상 함께 다닙니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

/// 정규화된 목록 쿼리
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub sort: Option<Sort>,
}

/// 입력칸 값으로 쿼리를 만듭니다.
pub fn build_query(inputs: &FilterInputs) -> QuerySpec {
    QuerySpec {
        title: non_empty(&inputs.title),
        genre: non_empty(&inputs.genre),
        director: non_empty(&inputs.director),
        sort: non_empty(&inputs.sort_field).map(|field| Sort {
            field,
            order: SortOrder::from_input(&inputs.sort_order),
        }),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl QuerySpec {
    /// (이름, 값) 쌍 목록. 순서는 고정입니다.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(title) = &self.title {
            pairs.push(("title", title.as_str()));
        }
        if let Some(genre) = &self.genre {
            pairs.push(("genre", genre.as_str()));
        }
        if let Some(director) = &self.director {
            pairs.push(("director", director.as_str()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.field.as_str()));
            pairs.push(("order", sort.order.as_str()));
        }
        pairs
    }

    /// URL 뒤에 붙일 쿼리 문자열. 파라미터가 없으면 빈 문자열(`?`도 없음).
    pub fn to_query_string(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect();
        format!("?{}", encoded.join("&"))
    }
}
