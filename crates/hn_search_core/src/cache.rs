use std::collections::BTreeMap;

use crate::Hit;

/// All hits accumulated for one search term, and the last page the server reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    pub hits: Vec<Hit>,
    pub page: u32,
}

/// Accumulated results keyed by search term. Entries live for the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultCache {
    entries: BTreeMap<String, PageResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<&PageResult> {
        self.entries.get(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Appends `hits` to the entry for `term` (creating it) and records `page`.
    /// Returns the number of hits now held for the term.
    pub(crate) fn merge(&mut self, term: &str, hits: Vec<Hit>, page: u32) -> usize {
        let entry = self.entries.entry(term.to_string()).or_default();
        entry.hits.extend(hits);
        entry.page = page;
        entry.hits.len()
    }

    /// Removes the hit with `id` from the entry for `term`. Returns whether
    /// anything was removed; a missing entry or id leaves the cache untouched.
    pub(crate) fn remove_hit(&mut self, term: &str, id: &str) -> bool {
        let Some(entry) = self.entries.get_mut(term) else {
            return false;
        };
        let before = entry.hits.len();
        entry.hits.retain(|hit| hit.object_id != id);
        entry.hits.len() != before
    }
}
