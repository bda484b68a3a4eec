//! # 목록 렌더러
//!
//! 영화 목록을 화면에 출력할 텍스트로 바꾸는 순수 함수들입니다.
//! 상태가 없으며, 같은 입력에는 항상 같은 출력을 돌려줍니다.

use crate::models::MovieRecord;
use crate::ui::ListMode;

/// 목록이 비었을 때 보여줄 문구
pub const EMPTY_LIST_TEXT: &str = "No movies found";

/// 화면에 표시할 날짜 형식 (예: 01.05.2020)
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// 영화 목록 전체를 렌더링합니다.
pub fn render_movies(movies: &[MovieRecord], mode: ListMode) -> String {
    if movies.is_empty() {
        return EMPTY_LIST_TEXT.to_string();
    }

    movies
        .iter()
        .map(|movie| render_movie(movie, mode))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 영화 카드 하나를 렌더링합니다.
///
/// ```text
/// #7 The Matrix
///    Genre: Sci-Fi | Director: Wachowski | Rating: 8.7/10 | Released: 31.03.1999
///    [e7] edit  [d7] delete          ← Manage 모드에서만
/// ```
pub fn render_movie(movie: &MovieRecord, mode: ListMode) -> String {
    let released = movie
        .release_day()
        .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());

    let rating = movie
        .rating
        .map(|rating| format!("{}/10", rating))
        .unwrap_or_else(|| "-".to_string());

    let mut card = format!(
        "#{} {}\n   Genre: {} | Director: {} | Rating: {} | Released: {}",
        movie.id, movie.title, movie.genre, movie.director, rating, released
    );

    if mode == ListMode::Manage {
        card.push_str(&format!(
            "\n   [e{id}] edit  [d{id}] delete",
            id = movie.id
        ));
    }

    card
}
