use std::collections::BTreeMap;

use engine_logging::engine_debug;

use crate::sort::display_order;
use crate::view_model::AppViewModel;
use crate::{Effect, Hit, ResultCache, SortKey};

/// Token attached to every fetch so that superseded responses can be recognised.
pub type RequestId = u64;

/// Search text used when nothing else is configured.
pub const DEFAULT_QUERY: &str = "redux";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFetch {
    request_id: RequestId,
    page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    search_text: String,
    search_key: Option<String>,
    results: ResultCache,
    sort_key: SortKey,
    is_sort_reverse: bool,
    error: Option<String>,
    // Latest outstanding request per term.
    in_flight: BTreeMap<String, PendingFetch>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_search_text(DEFAULT_QUERY)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose input box starts out holding `text`.
    pub fn with_search_text(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            search_key: None,
            results: ResultCache::new(),
            sort_key: SortKey::None,
            is_sort_reverse: false,
            error: None,
            in_flight: BTreeMap::new(),
            next_request_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let entry = self
            .search_key
            .as_deref()
            .and_then(|key| self.results.get(key));
        let hits: &[Hit] = entry.map(|entry| entry.hits.as_slice()).unwrap_or_default();
        let is_loading = self.is_loading();

        AppViewModel {
            search_text: self.search_text.clone(),
            search_key: self.search_key.clone(),
            list: display_order(self.sort_key, self.is_sort_reverse, hits),
            page: entry.map(|entry| entry.page),
            sort_key: self.sort_key,
            is_sort_reverse: self.is_sort_reverse,
            is_loading,
            error: self.error.clone(),
            can_request_more: !is_loading && self.search_key.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_key(&self) -> Option<&str> {
        self.search_key.as_deref()
    }

    pub fn results(&self) -> &ResultCache {
        &self.results
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn is_sort_reverse(&self) -> bool {
        self.is_sort_reverse
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_search_text(&mut self, text: String) {
        if self.search_text != text {
            self.search_text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_search_key(&mut self, term: String) {
        if self.search_key.as_deref() != Some(term.as_str()) {
            self.search_key = Some(term);
            self.mark_dirty();
        }
    }

    /// Page the next "more" request should ask for.
    pub(crate) fn next_page_for(&self, term: &str) -> u32 {
        self.results
            .get(term)
            .map_or(0, |entry| entry.page.saturating_add(1))
    }

    /// Registers a new outstanding fetch and returns the effect that performs it.
    /// Any earlier outstanding request for the same term is superseded.
    pub(crate) fn begin_fetch(&mut self, term: String, page: u32) -> Effect {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let previous = self
            .in_flight
            .insert(term.clone(), PendingFetch { request_id, page });
        if let Some(previous) = previous {
            engine_debug!(
                "Request {} supersedes {} for term {:?} (page {} -> {})",
                request_id,
                previous.request_id,
                term,
                previous.page,
                page
            );
        }

        self.error = None;
        self.mark_dirty();
        Effect::FetchPage {
            request_id,
            term,
            page,
        }
    }

    /// Takes the pending entry for `term` if `request_id` is still the latest one.
    fn settle(&mut self, request_id: RequestId, term: &str) -> bool {
        match self.in_flight.get(term) {
            Some(pending) if pending.request_id == request_id => {
                self.in_flight.remove(term);
                true
            }
            _ => {
                engine_debug!(
                    "Discarding stale response {} for term {:?}",
                    request_id,
                    term
                );
                false
            }
        }
    }

    pub(crate) fn apply_success(
        &mut self,
        request_id: RequestId,
        term: &str,
        hits: Vec<Hit>,
        page: u32,
    ) {
        if !self.settle(request_id, term) {
            return;
        }
        let incoming = hits.len();
        let total = self.results.merge(term, hits, page);
        engine_debug!(
            "Merged {} hits into {:?} (page {}, {} total)",
            incoming,
            term,
            page,
            total
        );
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, request_id: RequestId, term: &str, message: String) {
        if !self.settle(request_id, term) {
            return;
        }
        self.error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn dismiss(&mut self, id: &str) {
        let Some(term) = self.search_key.as_deref() else {
            return;
        };
        if self.results.remove_hit(term, id) {
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_sort(&mut self, key: SortKey) {
        self.is_sort_reverse = self.sort_key == key && !self.is_sort_reverse;
        self.sort_key = key;
        self.mark_dirty();
    }
}
