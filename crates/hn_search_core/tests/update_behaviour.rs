use std::sync::Once;

use hn_search_core::{update, AppState, Effect, Hit, Msg, RequestId, SortKey};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn hit(id: &str, title: &str) -> Hit {
    Hit {
        object_id: id.to_string(),
        title: title.to_string(),
        ..Hit::default()
    }
}

fn submit(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::SearchTextChanged(text.to_string()));
    update(state, Msg::SearchSubmitted)
}

fn single_fetch(effects: &[Effect]) -> (RequestId, String, u32) {
    match effects {
        [Effect::FetchPage {
            request_id,
            term,
            page,
        }] => (*request_id, term.clone(), *page),
        other => panic!("expected exactly one fetch, got {other:?}"),
    }
}

fn respond(state: AppState, effects: &[Effect], hits: Vec<Hit>) -> AppState {
    let (request_id, term, page) = single_fetch(effects);
    let (state, effects) = update(
        state,
        Msg::FetchSucceeded {
            request_id,
            term,
            hits,
            page,
        },
    );
    assert!(effects.is_empty());
    state
}

fn list_ids(state: &AppState) -> Vec<String> {
    state
        .view()
        .list
        .into_iter()
        .map(|hit| hit.object_id)
        .collect()
}

/// Submits "redux" and answers with hits 1 "A" and 2 "B".
fn redux_loaded() -> AppState {
    let (state, effects) = submit(AppState::new(), "redux");
    respond(state, &effects, vec![hit("1", "A"), hit("2", "B")])
}

#[test]
fn mount_searches_initial_text() {
    init_logging();
    let (mut state, effects) = update(AppState::with_search_text("rust"), Msg::Mounted);

    assert_eq!(single_fetch(&effects), (1, "rust".to_string(), 0));
    let view = state.view();
    assert_eq!(view.search_key.as_deref(), Some("rust"));
    assert!(view.is_loading);
    assert!(!view.can_request_more);
    assert!(state.consume_dirty());
}

#[test]
fn default_state_uses_default_query() {
    let (_, effects) = update(AppState::new(), Msg::Mounted);
    assert_eq!(single_fetch(&effects).1, "redux");
}

#[test]
fn search_text_change_has_no_side_effects() {
    init_logging();
    let state = AppState::new();
    let (mut state, effects) = update(state, Msg::SearchTextChanged("tokio".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.search_text(), "tokio");
    assert_eq!(state.search_key(), None);
    assert!(!state.is_loading());
    assert!(state.consume_dirty());
}

#[test]
fn submitted_page_is_displayed_reversed_by_default() {
    init_logging();
    let mut state = redux_loaded();

    let view = state.view();
    assert_eq!(list_ids(&state), vec!["2", "1"]);
    assert_eq!(view.sort_key, SortKey::None);
    assert!(!view.is_sort_reverse);
    assert!(!view.is_loading);
    assert_eq!(view.page, Some(0));
    assert!(view.can_request_more);
    assert!(state.consume_dirty());
}

#[test]
fn submit_keeps_typed_text() {
    let state = redux_loaded();
    assert_eq!(state.search_text(), "redux");
}

#[test]
fn toggling_same_sort_flips_reverse_flag() {
    init_logging();
    let state = redux_loaded();

    let (state, effects) = update(state, Msg::SortClicked(SortKey::Title));
    assert!(effects.is_empty());
    assert_eq!(state.sort_key(), SortKey::Title);
    assert!(!state.is_sort_reverse());

    let (state, _) = update(state, Msg::SortClicked(SortKey::Title));
    assert_eq!(state.sort_key(), SortKey::Title);
    assert!(state.is_sort_reverse());
    assert_eq!(list_ids(&state), vec!["1", "2"]);

    let (state, _) = update(state, Msg::SortClicked(SortKey::Title));
    assert!(!state.is_sort_reverse());
}

#[test]
fn switching_sort_key_resets_reverse_flag() {
    let state = redux_loaded();
    let (state, _) = update(state, Msg::SortClicked(SortKey::Title));
    let (state, _) = update(state, Msg::SortClicked(SortKey::Title));
    assert!(state.is_sort_reverse());

    let (state, _) = update(state, Msg::SortClicked(SortKey::Points));
    assert_eq!(state.sort_key(), SortKey::Points);
    assert!(!state.is_sort_reverse());
}

#[test]
fn dismiss_removes_only_matching_hit() {
    init_logging();
    let state = redux_loaded();

    let (mut state, effects) = update(state, Msg::Dismissed("1".to_string()));
    assert!(effects.is_empty());
    let cached = state.results().get("redux").expect("redux cached");
    assert_eq!(cached.hits, vec![hit("2", "B")]);
    assert_eq!(cached.page, 0);
    assert!(state.consume_dirty());
}

#[test]
fn dismiss_of_absent_id_is_noop() {
    let mut state = redux_loaded();
    state.consume_dirty();
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::Dismissed("42".to_string()));
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, before);
}

#[test]
fn dismiss_before_any_results_is_noop() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Mounted);
    let before = state.clone();

    let (next, effects) = update(state, Msg::Dismissed("1".to_string()));
    assert!(effects.is_empty());
    assert_eq!(next, before);

    let (next, _) = update(AppState::new(), Msg::Dismissed("1".to_string()));
    assert_eq!(next, AppState::new());
}

#[test]
fn more_appends_next_page() {
    init_logging();
    let state = redux_loaded();

    let (state, effects) = update(state, Msg::MoreRequested);
    let (_, term, page) = single_fetch(&effects);
    assert_eq!(term, "redux");
    assert_eq!(page, 1);
    assert!(state.view().is_loading);

    let state = respond(state, &effects, vec![hit("3", "C")]);
    let cached = state.results().get("redux").expect("redux cached");
    assert_eq!(
        cached.hits,
        vec![hit("1", "A"), hit("2", "B"), hit("3", "C")]
    );
    assert_eq!(cached.page, 1);
    assert_eq!(list_ids(&state), vec!["3", "2", "1"]);
}

#[test]
fn more_before_any_search_does_nothing() {
    let (state, effects) = update(AppState::new(), Msg::MoreRequested);
    assert!(effects.is_empty());
    assert!(!state.is_loading());
}

#[test]
fn server_reported_page_is_stored_as_given() {
    let state = redux_loaded();
    let (state, effects) = update(state, Msg::MoreRequested);
    let (request_id, term, _) = single_fetch(&effects);

    let (state, _) = update(
        state,
        Msg::FetchSucceeded {
            request_id,
            term,
            hits: vec![hit("7", "G")],
            page: 4,
        },
    );
    assert_eq!(state.view().page, Some(4));
}

#[test]
fn cached_term_is_not_fetched_again() {
    init_logging();
    let state = redux_loaded();

    let (state, effects) = submit(state, "tokio");
    assert_eq!(single_fetch(&effects).1, "tokio");
    let state = respond(state, &effects, vec![hit("10", "T")]);
    assert_eq!(list_ids(&state), vec!["10"]);

    let (state, effects) = submit(state, "redux");
    assert!(effects.is_empty());
    assert_eq!(state.search_key(), Some("redux"));
    assert!(!state.is_loading());
    assert_eq!(list_ids(&state), vec!["2", "1"]);
}

#[test]
fn late_response_lands_under_its_own_term() {
    init_logging();
    let (state, redux_effects) = submit(AppState::new(), "redux");
    let (state, tokio_effects) = submit(state, "tokio");
    assert_eq!(state.search_key(), Some("tokio"));

    // The old request resolves after the user has moved on.
    let state = respond(state, &redux_effects, vec![hit("1", "A")]);
    assert!(state.results().contains("redux"));
    assert!(!state.results().contains("tokio"));
    assert!(state.view().list.is_empty());
    assert!(state.is_loading());

    let state = respond(state, &tokio_effects, vec![hit("10", "T")]);
    assert_eq!(list_ids(&state), vec!["10"]);
    assert!(!state.is_loading());
}

#[test]
fn superseded_response_is_discarded() {
    init_logging();
    let state = redux_loaded();

    let (state, first) = update(state, Msg::MoreRequested);
    let (state, second) = update(state, Msg::MoreRequested);
    let (first_id, _, first_page) = single_fetch(&first);
    let (second_id, _, second_page) = single_fetch(&second);
    assert_ne!(first_id, second_id);
    assert_eq!(first_page, second_page);

    let state = respond(state, &first, vec![hit("3", "C")]);
    assert_eq!(state.results().get("redux").map(|e| e.hits.len()), Some(2));
    assert!(state.is_loading());

    let state = respond(state, &second, vec![hit("3", "C")]);
    assert_eq!(state.results().get("redux").map(|e| e.hits.len()), Some(3));
    assert!(!state.is_loading());
}

#[test]
fn failure_records_error_and_hides_results() {
    init_logging();
    let state = redux_loaded();
    let (state, effects) = update(state, Msg::MoreRequested);
    let (request_id, term, _) = single_fetch(&effects);

    let (state, effects) = update(
        state,
        Msg::FetchFailed {
            request_id,
            term,
            message: "network error".to_string(),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("network error"));
    assert!(!view.is_loading);
    assert!(!view.shows_results());
    // Nothing was merged.
    assert_eq!(state.results().get("redux").map(|e| e.hits.len()), Some(2));
}

#[test]
fn new_fetch_clears_previous_error() {
    let (state, effects) = submit(AppState::new(), "redux");
    let (request_id, term, _) = single_fetch(&effects);
    let (state, _) = update(
        state,
        Msg::FetchFailed {
            request_id,
            term,
            message: "timeout".to_string(),
        },
    );
    assert!(state.error().is_some());

    let (state, effects) = update(state, Msg::MoreRequested);
    assert_eq!(single_fetch(&effects).2, 0);
    assert_eq!(state.error(), None);
    assert!(state.view().shows_results());

    let state = respond(state, &effects, vec![hit("1", "A")]);
    assert_eq!(state.error(), None);
    assert_eq!(list_ids(&state), vec!["1"]);
}

#[test]
fn stale_failure_does_not_record_error() {
    let state = redux_loaded();
    let (state, first) = update(state, Msg::MoreRequested);
    let (state, _second) = update(state, Msg::MoreRequested);
    let (request_id, term, _) = single_fetch(&first);

    let (state, _) = update(
        state,
        Msg::FetchFailed {
            request_id,
            term,
            message: "network error".to_string(),
        },
    );
    assert_eq!(state.error(), None);
    assert!(state.is_loading());
}
