//! End-to-end flows through [`handle_event`], from key input to rendered
//! view model and persisted files.

use super::{handle_event, Action, AppState, Event, InputMode, SearchStatus, ViewMode};
use crate::catalog::CatalogRequest;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore, FAVOURITES_KEY, RECENT_SEARCHES_KEY};
use crate::{initialize, Config};
use std::collections::BTreeMap;
use tempfile::TempDir;

const DUNE_RESULTS: &str = r#"{
    "kind": "books#volumes",
    "totalItems": 2,
    "items": [
        {
            "id": "B1",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publisher": "Chilton Books",
                "publishedDate": "1965-08-01",
                "pageCount": 412,
                "industryIdentifiers": [{"type": "ISBN_13", "identifier": "9780441013593"}],
                "imageLinks": {"thumbnail": "http://books.google.com/cover.jpg"}
            }
        },
        {"id": "B2", "volumeInfo": {"title": "Dune Messiah", "authors": ["Frank Herbert"]}}
    ]
}"#;

fn new_state() -> AppState {
    let mut state = initialize(&Config::default());
    state.attach_store(Box::new(MemoryStore::default()));
    state
}

fn search(state: &mut AppState, query: &str) -> CatalogRequest {
    handle_event(state, &Event::FocusSearchBar).unwrap();
    for c in query.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
    let (_, actions) = handle_event(state, &Event::Submit).unwrap();
    match actions.as_slice() {
        [Action::FetchCatalog(request)] => request.clone(),
        other => panic!("expected one fetch, got {other:?}"),
    }
}

fn respond(state: &mut AppState, request: &CatalogRequest, status: u16, body: &str) -> bool {
    respond_with_context(state, request.context.to_map(), status, body)
}

fn respond_with_context(state: &mut AppState, context: BTreeMap<String, String>, status: u16, body: &str) -> bool {
    let event = Event::CatalogResponse {
        context,
        status,
        body: body.as_bytes().to_vec(),
    };
    handle_event(state, &event).unwrap().0
}

fn result_ids(state: &AppState) -> Vec<String> {
    state.search.results().iter().map(|b| b.id.clone()).collect()
}

#[test]
fn search_select_favourite_and_close() {
    let mut state = new_state();
    let request = search(&mut state, "dune");
    assert!(request.url.contains("q=dune"));
    assert_eq!(state.search.status(), &SearchStatus::Loading);

    assert!(respond(&mut state, &request, 200, DUNE_RESULTS));
    assert_eq!(result_ids(&state), vec!["B1", "B2"]);

    handle_event(&mut state, &Event::OpenDetail).unwrap();
    let detail = state.compute_viewmodel(40, 100).detail.unwrap();
    assert_eq!(detail.title, "Dune");
    assert!(detail.fields.contains(&("ISBN".to_string(), "9780441013593".to_string())));
    assert!(!detail.is_favourite);

    handle_event(&mut state, &Event::ToggleFavourite).unwrap();
    assert!(state.compute_viewmodel(40, 100).detail.unwrap().is_favourite);

    handle_event(&mut state, &Event::CloseDetail).unwrap();
    let vm = state.compute_viewmodel(40, 100);
    assert!(vm.detail.is_none());
    assert!(vm.display_items[0].is_favourite);
    assert!(!vm.display_items[1].is_favourite);
}

#[test]
fn slower_earlier_response_never_wins() {
    let mut state = new_state();
    let first = search(&mut state, "first");
    let second = search(&mut state, "second");

    assert!(respond(&mut state, &second, 200, DUNE_RESULTS));
    assert!(!respond(&mut state, &first, 500, ""));

    assert_eq!(state.search.query(), "second");
    assert_eq!(result_ids(&state), vec!["B1", "B2"]);
}

#[test]
fn earlier_response_arriving_first_is_dropped() {
    let mut state = new_state();
    let first = search(&mut state, "first");
    let second = search(&mut state, "second");

    assert!(!respond(&mut state, &first, 200, DUNE_RESULTS));
    assert_eq!(state.search.status(), &SearchStatus::Loading);

    assert!(respond(&mut state, &second, 200, r#"{"totalItems":0}"#));
    assert_eq!(state.search.status(), &SearchStatus::Loaded { books: vec![] });
}

#[test]
fn response_with_foreign_context_is_ignored() {
    let mut state = new_state();
    let request = search(&mut state, "dune");

    assert!(!respond_with_context(&mut state, BTreeMap::new(), 200, DUNE_RESULTS));
    let mut bogus = BTreeMap::new();
    bogus.insert("seq".to_string(), "not-a-number".to_string());
    assert!(!respond_with_context(&mut state, bogus, 200, DUNE_RESULTS));

    assert!(respond(&mut state, &request, 200, DUNE_RESULTS));
}

#[test]
fn failure_shows_error_then_retry_recovers() {
    let mut state = new_state();
    let request = search(&mut state, "dune");
    respond(&mut state, &request, 200, DUNE_RESULTS);

    let request = search(&mut state, "dune messiah");
    respond(&mut state, &request, 503, r#"{"error":{"code":503,"message":"Backend Error"}}"#);

    assert!(state.search.results().is_empty());
    let SearchStatus::Failed { message } = state.search.status() else {
        panic!("expected failure, got {:?}", state.search.status());
    };
    assert_eq!(message, "catalog returned HTTP 503: Backend Error");
    assert_eq!(state.recent.list(), ["dune messiah", "dune"]);

    let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
    let [Action::FetchCatalog(retry)] = actions.as_slice() else {
        panic!("expected retry fetch");
    };
    respond(&mut state, retry, 200, DUNE_RESULTS);
    assert_eq!(result_ids(&state), vec!["B1", "B2"]);
    assert_eq!(state.recent.list(), ["dune messiah", "dune"]);
}

#[test]
fn malformed_success_body_is_a_failure() {
    let mut state = new_state();
    let request = search(&mut state, "dune");
    respond(&mut state, &request, 200, "<html>captive portal</html>");
    assert_eq!(
        state.search.status(),
        &SearchStatus::Failed {
            message: "unexpected response from catalog".to_string()
        }
    );
}

#[test]
fn recent_searches_keep_five_most_recent_first() {
    let mut state = new_state();
    for query in ["a", "b", "c", "d", "e", "f", "c"] {
        search(&mut state, query);
    }
    assert_eq!(state.recent.list(), ["c", "f", "e", "d", "b"]);

    let chips: Vec<String> = state.compute_viewmodel(30, 200).recent.into_iter().map(|c| c.query).collect();
    assert_eq!(chips, vec!["c", "f", "e", "d", "b"]);
}

#[test]
fn blank_query_is_ignored_entirely() {
    let mut state = new_state();
    handle_event(&mut state, &Event::Char(' ')).unwrap();
    let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();

    assert!(!render);
    assert!(actions.is_empty());
    assert!(state.recent.list().is_empty());
    assert_eq!(state.search.status(), &SearchStatus::Idle);
    assert_eq!(state.input_mode, InputMode::Typing);
}

#[test]
fn favourites_view_shows_favourites_in_toggle_order() {
    let mut state = new_state();
    let request = search(&mut state, "dune");
    respond(&mut state, &request, 200, DUNE_RESULTS);

    handle_event(&mut state, &Event::KeyDown).unwrap();
    handle_event(&mut state, &Event::ToggleFavourite).unwrap();
    handle_event(&mut state, &Event::KeyUp).unwrap();
    handle_event(&mut state, &Event::ToggleFavourite).unwrap();

    handle_event(&mut state, &Event::ShowFavourites).unwrap();
    assert_eq!(state.view_mode, ViewMode::Favourites);
    let ids: Vec<&str> = state.visible_books().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["B2", "B1"]);

    handle_event(&mut state, &Event::ToggleFavourite).unwrap();
    let ids: Vec<&str> = state.visible_books().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["B1"]);
}

#[test]
fn collections_survive_restart_on_disk() {
    let dir = TempDir::new().unwrap();
    let open = || Box::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());

    let mut state = initialize(&Config::default());
    state.attach_store(open());
    let request = search(&mut state, "dune");
    respond(&mut state, &request, 200, DUNE_RESULTS);
    handle_event(&mut state, &Event::ToggleFavourite).unwrap();

    let mut restarted = initialize(&Config::default());
    restarted.attach_store(open());
    assert_eq!(restarted.recent.list(), ["dune"]);
    assert!(restarted.favourites.is_favourite("B1"));
    assert_eq!(restarted.favourites.list()[0].published_year(), Some(1965));

    let store = open();
    assert!(store.get(FAVOURITES_KEY).unwrap().is_some());
    assert_eq!(store.get(RECENT_SEARCHES_KEY).unwrap().as_deref(), Some(r#"["dune"]"#));
}

#[test]
fn corrupt_files_load_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("book-favourites.json"), "{ truncated").unwrap();
    std::fs::write(dir.path().join("recentSearches.json"), r#"{"not":"a list"}"#).unwrap();

    let mut state = initialize(&Config::default());
    state.attach_store(Box::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap()));

    assert!(state.favourites.is_empty());
    assert!(state.recent.list().is_empty());

    search(&mut state, "dune");
    assert_eq!(state.recent.list(), ["dune"]);
}

#[test]
fn config_drives_catalog_url() {
    let mut map = BTreeMap::new();
    map.insert("catalog_url".to_string(), "http://localhost:8080/volumes".to_string());
    map.insert("api_key".to_string(), "k&y".to_string());
    map.insert("trace_level".to_string(), "  ".to_string());
    let config = Config::from_zellij(&map);
    assert_eq!(config.trace_level, "info");

    let mut state = initialize(&config);
    let request = search(&mut state, "a b");
    assert_eq!(request.url, "http://localhost:8080/volumes?q=a%20b&maxResults=20&key=k%26y");
}
