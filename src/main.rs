//! # 영화 카탈로그 터미널 클라이언트 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화 (stderr로 출력, 화면은 stdout)
//! 3. 토큰 저장소(SQLite) 열기
//! 4. REST 클라이언트 생성
//! 5. 페이지 루프 실행 (공개 목록 → 로그인 → 관리 화면 ...)
//!
//! 각 페이지 함수는 다음에 갈 페이지를 돌려주고, `None`이면 프로그램을 끝냅니다.

use std::io::{self, BufReader, Stdin, Stdout};
use std::sync::Arc;

use anyhow::Result;
use cinema_client::{
    api::CatalogApi,
    config::Config,
    db::SqliteTokenStore,
    middleware::{Redirected, SessionGuard},
    models::Credentials,
    services::{FilterInputs, FormField},
    ui::{Page, TerminalUi},
    views::{auth, ManageView, PublicView},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// 타입 별칭(type alias): 긴 제네릭 타입에 짧은 이름을 붙입니다.
// 표준 입력은 BufReader로 감싸 한 줄씩 읽을 수 있게 합니다.
type Terminal = TerminalUi<BufReader<Stdin>, Stdout>;

// #[tokio::main]: 비동기 런타임을 만들고 main을 그 안에서 실행하는 매크로
// flavor = "current_thread": 스레드 하나짜리 이벤트 루프.
// 사용자 동작은 한 번에 하나씩 처리되고, 요청 하나가 끝나야 다음 입력을 받습니다.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일에서 CINEMA_API_URL 등을 읽어옵니다.
    // .ok()는 Result를 Option으로 바꿔, .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    // 화면(stdout)과 섞이지 않도록 로그는 stderr로 보냅니다.
    tracing_subscriber::registry()
        .with(
            // EnvFilter: RUST_LOG 환경변수로 로그 레벨을 제어합니다.
            // 없으면 이 크레이트의 info 이상만 출력합니다.
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // ── 3단계: 설정과 토큰 저장소 ──
    let config = Config::from_env();
    tracing::info!("Using catalog backend at {}", config.api_url);

    // SQLite 파일에 토큰을 보관하므로, 다시 실행해도 로그인 상태가 유지됩니다.
    // `?` 연산자: 열기에 실패하면 main에서 바로 에러를 반환합니다.
    let store = SqliteTokenStore::open(&config.session_db_url).await?;
    // Arc: 여러 곳에서 공유하는 참조 카운트 포인터. 가드를 clone해도 저장소는 하나입니다.
    let guard = SessionGuard::new(Arc::new(store));

    // ── 4단계: REST 클라이언트 ──
    // reqwest::Client는 내부에 연결 풀을 가지고 있어 clone해도 같은 풀을 공유합니다.
    let api = CatalogApi::new(&config.api_url, config.request_timeout)?;

    // ── 5단계: 페이지 루프 ──
    let mut ui = TerminalUi::stdio();
    let mut public = PublicView::new(api.clone());
    let mut manage = ManageView::new(api.clone(), guard.clone());

    // 항상 공개 목록에서 시작합니다.
    // loop + match: 현재 페이지 함수를 실행하고, 돌려받은 다음 페이지로 바꿉니다.
    let mut page = Page::Public;
    loop {
        // 이전 페이지에서 남은 이동 요청은 버립니다
        ui.take_navigation();

        let next = match page {
            Page::Public => public_page(&mut public, &mut ui).await?,
            Page::Login => login_page(&api, &guard, &mut ui).await?,
            Page::Register => register_page(&api, &mut ui).await?,
            Page::Manage => manage_page(&mut manage, &mut ui).await?,
        };

        match next {
            Some(next) => page = next,
            None => break,
        }
    }

    tracing::info!("Bye");
    Ok(())
}

async fn public_page(view: &mut PublicView, ui: &mut Terminal) -> io::Result<Option<Page>> {
    ui.say("== Movie catalog ==");
    view.load(ui).await;

    loop {
        ui.say("[f] filter  [c] clear filters  [r] reload  [l] login  [g] register  [m] manage  [q] quit");
        let Some(choice) = ui.prompt(">")? else {
            return Ok(None);
        };

        match choice.trim() {
            "f" => {
                if !read_filters(ui, view.filters_mut())? {
                    return Ok(None);
                }
                view.load(ui).await;
            }
            "c" => {
                view.clear_filters(ui).await;
            }
            "r" => {
                view.load(ui).await;
            }
            "l" => return Ok(Some(Page::Login)),
            "g" => return Ok(Some(Page::Register)),
            "m" => return Ok(Some(Page::Manage)),
            "q" => return Ok(None),
            _ => ui.say("Unknown command"),
        }
    }
}

async fn login_page(
    api: &CatalogApi,
    guard: &SessionGuard,
    ui: &mut Terminal,
) -> io::Result<Option<Page>> {
    ui.say("== Log in == (empty username goes back)");

    loop {
        let Some(credentials) = read_credentials(ui)? else {
            return Ok(None);
        };
        if credentials.username.is_empty() {
            return Ok(Some(Page::Public));
        }

        auth::login(api, guard, &credentials, ui).await;
        if let Some(next) = ui.take_navigation() {
            return Ok(Some(next));
        }
    }
}

async fn register_page(api: &CatalogApi, ui: &mut Terminal) -> io::Result<Option<Page>> {
    ui.say("== Register == (empty username goes back)");

    loop {
        let Some(credentials) = read_credentials(ui)? else {
            return Ok(None);
        };
        if credentials.username.is_empty() {
            return Ok(Some(Page::Login));
        }

        auth::register(api, &credentials, ui).await;
        if let Some(next) = ui.take_navigation() {
            return Ok(Some(next));
        }
    }
}

async fn manage_page(view: &mut ManageView, ui: &mut Terminal) -> io::Result<Option<Page>> {
    if let Err(Redirected(next)) = view.enter(ui).await {
        return Ok(Some(next));
    }

    loop {
        print_form(view, ui);
        let mut menu = String::from("[a] fill form  [s] save  ");
        if ui.cancel_visible() {
            menu.push_str("[x] cancel edit  ");
        }
        menu.push_str("[e<id>] edit  [d<id>] delete  [f] filter  [c] clear filters  [o] logout  [p] public  [q] quit");
        ui.say(&menu);

        let Some(choice) = ui.prompt(">")? else {
            return Ok(None);
        };

        let left = match choice.trim() {
            "a" => {
                if !read_form(ui, view)? {
                    return Ok(None);
                }
                None
            }
            "s" => view.submit(ui).await.err(),
            "x" if ui.cancel_visible() => {
                view.cancel(ui);
                None
            }
            "f" => {
                if !read_filters(ui, view.filters_mut())? {
                    return Ok(None);
                }
                view.apply_filters(ui).await.err()
            }
            "c" => view.clear_filters(ui).await.err(),
            "o" => {
                view.logout(ui).await;
                None
            }
            "p" => return Ok(Some(Page::Public)),
            "q" => return Ok(None),
            command => view.dispatch(command, ui).await.err(),
        };

        if let Some(Redirected(next)) = left {
            return Ok(Some(next));
        }
        if let Some(next) = ui.take_navigation() {
            return Ok(Some(next));
        }
    }
}

fn print_form(view: &ManageView, ui: &mut Terminal) {
    let heading = format!("-- {} --", ui.form_label().text());
    ui.say(&heading);
    for field in FormField::ALL {
        let line = format!("  {}: {}", field.label(), view.form().fields().get(field));
        ui.say(&line);
    }
}

/// 폼 입력칸을 차례로 묻습니다. 빈 줄은 현재 값 유지, `-`는 비우기.
/// 입력이 끝났으면(EOF) `false`.
fn read_form(ui: &mut Terminal, view: &mut ManageView) -> io::Result<bool> {
    for field in FormField::ALL {
        let current = view.form().fields().get(field).to_string();
        let Some(value) = ui.prompt(&format!("{} [{}]", field.label(), current))? else {
            return Ok(false);
        };
        match value.trim() {
            "" => {}
            "-" => view.set_field(field, ""),
            _ => view.set_field(field, value),
        }
    }
    Ok(true)
}

/// 필터 입력칸을 차례로 묻습니다. 빈 줄은 필터 없음. EOF면 `false`.
fn read_filters(ui: &mut Terminal, filters: &mut FilterInputs) -> io::Result<bool> {
    let slots = [
        ("Title contains", &mut filters.title),
        ("Genre contains", &mut filters.genre),
        ("Director contains", &mut filters.director),
        ("Sort by (title, genre, director, rating, release_date)", &mut filters.sort_field),
        ("Order (asc/desc)", &mut filters.sort_order),
    ];

    for (label, slot) in slots {
        let Some(value) = ui.prompt(label)? else {
            return Ok(false);
        };
        *slot = value.trim().to_string();
    }
    Ok(true)
}

/// 아이디와 비밀번호를 묻습니다. EOF면 `None`.
fn read_credentials(ui: &mut Terminal) -> io::Result<Option<Credentials>> {
    let Some(username) = ui.prompt("Username")? else {
        return Ok(None);
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        return Ok(Some(Credentials::new("", "")));
    }

    let Some(password) = ui.prompt("Password")? else {
        return Ok(None);
    };
    Ok(Some(Credentials::new(username, password)))
}
