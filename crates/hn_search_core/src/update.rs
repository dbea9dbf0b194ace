use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            let term = state.search_text().to_string();
            state.set_search_key(term.clone());
            vec![state.begin_fetch(term, 0)]
        }
        Msg::SearchTextChanged(text) => {
            state.set_search_text(text);
            Vec::new()
        }
        Msg::SearchSubmitted => {
            let term = state.search_text().to_string();
            // Cached terms are shown straight from the cache.
            let effects = if state.results().contains(&term) {
                Vec::new()
            } else {
                vec![state.begin_fetch(term.clone(), 0)]
            };
            state.set_search_key(term);
            effects
        }
        Msg::MoreRequested => match state.search_key() {
            Some(term) => {
                let term = term.to_string();
                let page = state.next_page_for(&term);
                vec![state.begin_fetch(term, page)]
            }
            None => Vec::new(),
        },
        Msg::Dismissed(id) => {
            state.dismiss(&id);
            Vec::new()
        }
        Msg::SortClicked(key) => {
            state.toggle_sort(key);
            Vec::new()
        }
        Msg::FetchSucceeded {
            request_id,
            term,
            hits,
            page,
        } => {
            state.apply_success(request_id, &term, hits, page);
            Vec::new()
        }
        Msg::FetchFailed {
            request_id,
            term,
            message,
        } => {
            state.apply_failure(request_id, &term, message);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
