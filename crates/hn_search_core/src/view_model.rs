use crate::{Hit, SortKey};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub search_text: String,
    pub search_key: Option<String>,
    /// Hits of the active term in display order.
    pub list: Vec<Hit>,
    /// Last page fetched for the active term, if any.
    pub page: Option<u32>,
    pub sort_key: SortKey,
    pub is_sort_reverse: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub can_request_more: bool,
    pub dirty: bool,
}

impl AppViewModel {
    /// Results are hidden while an error is recorded.
    pub fn shows_results(&self) -> bool {
        self.error.is_none()
    }
}
