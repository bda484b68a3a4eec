//! 관리 화면의 생성/수정/삭제와 목록 재조회 통합 테스트

mod common;

use std::sync::Arc;
use std::time::Duration;

use cinema_client::api::CatalogApi;
use cinema_client::db::{MemoryTokenStore, TokenStore};
use cinema_client::middleware::{Redirected, SessionGuard};
use cinema_client::services::{FormField, FormMode, Outcome, RecordAction};
use cinema_client::ui::{Page, RecordingUi, StatusKind};
use cinema_client::views::ManageView;
use common::{RecordedRequest, Stub, USERNAME};

/// 로그인된 상태로 관리 화면에 들어간 뒤, 지금까지의 요청 기록을 비웁니다.
async fn entered(stub: &Stub) -> (ManageView, RecordingUi) {
    let store = Arc::new(MemoryTokenStore::with_token(stub.token_for(USERNAME)));
    let mut view = ManageView::new(stub.api(), SessionGuard::new(store));
    let mut ui = RecordingUi::new();
    view.enter(&mut ui).await.unwrap();
    stub.clear_requests();
    ui.clear();
    (view, ui)
}

fn request(method: &str, path: &str, query: Option<&str>) -> RecordedRequest {
    RecordedRequest {
        method: method.to_string(),
        path: path.to_string(),
        query: query.map(str::to_string),
    }
}

fn fill(view: &mut ManageView, title: &str, rating: &str, release_date: &str) {
    view.set_field(FormField::Title, title);
    view.set_field(FormField::Genre, "Drama");
    view.set_field(FormField::Director, "Someone");
    view.set_field(FormField::Rating, rating);
    view.set_field(FormField::ReleaseDate, release_date);
}

#[tokio::test]
async fn entry_resets_form_and_renders_list() {
    let stub = common::spawn().await;
    let store = Arc::new(MemoryTokenStore::with_token(stub.token_for(USERNAME)));
    let mut view = ManageView::new(stub.api(), SessionGuard::new(store));
    let mut ui = RecordingUi::new();

    view.enter(&mut ui).await.unwrap();

    assert_eq!(view.form().mode(), FormMode::Create);
    assert!(!ui.cancel_visible());
    assert_eq!(ui.last_render().map(|movies| movies.len()), Some(2));
    assert!(view.actions().contains(7));
}

#[tokio::test]
async fn editing_fetches_the_record_and_normalizes_its_date() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    assert_eq!(
        view.dispatch("e7", &mut ui).await.unwrap(),
        Some(RecordAction::Edit(7))
    );

    assert_eq!(view.form().mode(), FormMode::Edit(7));
    assert_eq!(view.form().fields().title, "Heat");
    assert_eq!(view.form().fields().release_date, "2020-05-01");
    assert!(ui.cancel_visible());
    assert_eq!(stub.requests(), vec![request("GET", "/movies", None)]);
}

#[tokio::test]
async fn successful_update_refetches_once_with_active_filters() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    view.filters_mut().title = "e".to_string();
    view.filters_mut().sort_field = "rating".to_string();
    view.filters_mut().sort_order = "desc".to_string();
    view.edit(7, &mut ui).await.unwrap();
    view.set_field(FormField::Title, "Heat 2");
    stub.clear_requests();

    let outcome = view.submit(&mut ui).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(
        stub.requests(),
        vec![
            request("PUT", "/movies/7", None),
            request("GET", "/movies", Some("title=e&sort=rating&order=desc")),
        ]
    );
    assert_eq!(view.form().mode(), FormMode::Create);
    assert!(view.form().fields().is_empty());
    assert_eq!(view.filters().title, "e");
    assert_eq!(ui.last_status(), Some((StatusKind::Success, "Movie updated")));
    assert!(view.displayed().iter().any(|movie| movie.title == "Heat 2"));
}

#[tokio::test]
async fn create_with_blank_rating_sends_null() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    fill(&mut view, "Solaris", "", "1972-03-20");
    let outcome = view.submit(&mut ui).await.unwrap();

    let created = match outcome {
        Outcome::Success(record) => record,
        other => panic!("expected success, got {:?}", other),
    };
    assert_eq!(stub.movie(created.id).and_then(|movie| movie.rating), None);
    assert_eq!(ui.last_status(), Some((StatusKind::Success, "Movie added")));
    assert_eq!(stub.count("GET", "/movies"), 1);
    assert!(view.actions().contains(created.id));
}

#[tokio::test]
async fn rejected_create_keeps_form_and_skips_refetch() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    fill(&mut view, "Solaris", "8", "20.03.1972");
    let outcome = view.submit(&mut ui).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Rejected("Invalid date format. Use YYYY-MM-DD".to_string())
    );
    assert_eq!(view.form().mode(), FormMode::Create);
    assert_eq!(view.form().fields().title, "Solaris");
    assert_eq!(view.form().fields().release_date, "20.03.1972");
    assert_eq!(stub.requests(), vec![request("POST", "/movies", None)]);
    assert_eq!(ui.render_count(), 0);
}

#[tokio::test]
async fn network_failure_keeps_form_and_session() {
    let stub = common::spawn().await;
    let url = common::unreachable_url().await;
    let store = Arc::new(MemoryTokenStore::with_token(stub.token_for(USERNAME)));
    let mut offline = ManageView::new(
        CatalogApi::new(&url, Duration::from_secs(2)).unwrap(),
        SessionGuard::new(store.clone()),
    );
    let mut ui = RecordingUi::new();
    fill(&mut offline, "Lost", "5", "2001-01-01");

    let outcome = offline.submit(&mut ui).await.unwrap();

    assert_eq!(outcome, Outcome::NetworkFailure);
    assert_eq!(offline.form().mode(), FormMode::Create);
    assert_eq!(offline.form().fields().title, "Lost");
    assert_eq!(ui.last_status(), Some((StatusKind::Error, "Network error")));
    // 네트워크 실패는 세션을 끝내지 않습니다
    assert!(store.get().await.unwrap().is_some());
    assert_eq!(ui.last_page(), None);
}

#[tokio::test]
async fn rejected_update_stays_in_edit_mode() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;
    view.edit(7, &mut ui).await.unwrap();
    view.set_field(FormField::ReleaseDate, "01/05/2020");
    stub.clear_requests();

    let outcome = view.submit(&mut ui).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Rejected("Invalid date format. Use YYYY-MM-DD".to_string())
    );
    assert_eq!(view.form().mode(), FormMode::Edit(7));
    assert_eq!(view.form().fields().title, "Heat");
    assert_eq!(view.form().fields().release_date, "01/05/2020");
    assert!(ui.cancel_visible());
    assert_eq!(stub.requests(), vec![request("PUT", "/movies/7", None)]);
    assert_eq!(stub.movie(7).unwrap().release_date, "2020-05-01T00:00:00Z");
}

#[tokio::test]
async fn malformed_update_response_is_a_network_failure_that_keeps_edit_mode() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;
    view.edit(7, &mut ui).await.unwrap();
    view.set_field(FormField::Title, "Heat 2");
    stub.state.data().garble_updates = true;
    stub.clear_requests();

    let outcome = view.submit(&mut ui).await.unwrap();

    assert_eq!(outcome, Outcome::NetworkFailure);
    assert_eq!(view.form().mode(), FormMode::Edit(7));
    assert_eq!(view.form().fields().title, "Heat 2");
    assert_eq!(ui.last_status(), Some((StatusKind::Error, "Network error")));
    assert_eq!(stub.requests(), vec![request("PUT", "/movies/7", None)]);
}

#[tokio::test]
async fn delete_against_unreachable_backend_keeps_form_and_list() {
    let stub = common::spawn().await;
    let url = common::unreachable_url().await;
    let store = Arc::new(MemoryTokenStore::with_token(stub.token_for(USERNAME)));
    let mut offline = ManageView::new(
        CatalogApi::new(&url, Duration::from_secs(2)).unwrap(),
        SessionGuard::new(store.clone()),
    );
    let mut ui = RecordingUi::new();
    offline.set_field(FormField::Title, "half typed");
    ui.answer_confirm(true);

    let outcome = offline.delete(3, &mut ui).await.unwrap();

    assert_eq!(outcome, Some(Outcome::NetworkFailure));
    assert_eq!(offline.form().mode(), FormMode::Create);
    assert_eq!(offline.form().fields().title, "half typed");
    assert_eq!(ui.last_status(), Some((StatusKind::Error, "Network error")));
    assert_eq!(ui.render_count(), 0);
    assert!(store.get().await.unwrap().is_some());
}

#[tokio::test]
async fn unrated_movie_stays_unrated_after_untouched_edit() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;
    fill(&mut view, "Solaris", "", "1972-03-20");
    let created = match view.submit(&mut ui).await.unwrap() {
        Outcome::Success(record) => record,
        other => panic!("expected success, got {:?}", other),
    };
    assert_eq!(created.rating, None);

    view.edit(created.id, &mut ui).await.unwrap();
    assert_eq!(view.form().fields().rating, "");
    assert!(view.submit(&mut ui).await.unwrap().is_success());

    assert_eq!(stub.movie(created.id).and_then(|movie| movie.rating), None);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    let result = view.dispatch("d3", &mut ui).await.unwrap();

    assert_eq!(result, Some(RecordAction::Delete(3)));
    assert!(stub.requests().is_empty());
    assert!(stub.movie(3).is_some());
}

#[tokio::test]
async fn confirmed_delete_removes_and_refetches() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;
    ui.answer_confirm(true);

    let outcome = view.delete(3, &mut ui).await.unwrap();

    assert_eq!(outcome, Some(Outcome::Success(())));
    assert_eq!(
        stub.requests(),
        vec![request("DELETE", "/movies/3", None), request("GET", "/movies", None)]
    );
    assert!(stub.movie(3).is_none());
    assert!(!view.actions().contains(3));
    assert_eq!(ui.last_status(), Some((StatusKind::Success, "Movie deleted")));
}

#[tokio::test]
async fn deleting_a_vanished_record_shows_backend_message() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;
    stub.state.data().movies.retain(|movie| movie.id != 3);
    ui.answer_confirm(true);

    let outcome = view.delete(3, &mut ui).await.unwrap();

    assert_eq!(outcome, Some(Outcome::Rejected("Movie not found".to_string())));
    assert_eq!(stub.count("GET", "/movies"), 0);
}

#[tokio::test]
async fn commands_for_unrendered_ids_are_ignored() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    assert_eq!(view.dispatch("e99", &mut ui).await.unwrap(), None);
    assert_eq!(view.dispatch("z7", &mut ui).await.unwrap(), None);
    assert!(stub.requests().is_empty());
    assert_eq!(ui.last_status(), Some((StatusKind::Error, "Unknown command")));
}

#[tokio::test]
async fn editing_a_missing_record_leaves_form_alone() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;
    view.set_field(FormField::Title, "draft");

    assert!(!view.edit(99, &mut ui).await.unwrap());

    assert_eq!(view.form().mode(), FormMode::Create);
    assert_eq!(view.form().fields().title, "draft");
    assert_eq!(ui.last_status(), Some((StatusKind::Error, "Movie not found")));
}

#[tokio::test]
async fn reselecting_another_record_replaces_every_field() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    view.edit(7, &mut ui).await.unwrap();
    view.set_field(FormField::Genre, "typed");
    view.edit(3, &mut ui).await.unwrap();

    assert_eq!(view.form().mode(), FormMode::Edit(3));
    assert_eq!(view.form().fields().title, "Alien");
    assert_eq!(view.form().fields().genre, "Horror");
    assert_eq!(view.form().fields().release_date, "1979-05-25");
}

#[tokio::test]
async fn cancel_returns_to_create_mode() {
    let stub = common::spawn().await;
    let (mut view, mut ui) = entered(&stub).await;

    view.edit(7, &mut ui).await.unwrap();
    view.cancel(&mut ui);

    assert_eq!(view.form().mode(), FormMode::Create);
    assert!(view.form().fields().is_empty());
    assert!(!ui.cancel_visible());
}

#[tokio::test]
async fn expired_session_during_mutation_redirects_without_refetch() {
    let stub = common::spawn().await;
    let store = Arc::new(MemoryTokenStore::with_token("expired"));
    let mut view = ManageView::new(stub.api(), SessionGuard::new(store.clone()));
    let mut ui = RecordingUi::new();
    fill(&mut view, "Solaris", "8", "1972-03-20");

    let result = view.submit(&mut ui).await;

    assert_eq!(result, Err(Redirected(Page::Login)));
    assert_eq!(store.get().await.unwrap(), None);
    assert_eq!(stub.requests(), vec![request("POST", "/movies", None)]);
    assert_eq!(ui.last_page(), Some(Page::Login));
    assert_eq!(ui.render_count(), 0);
}
