use crate::{Hit, HitId, RequestId, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished starting up; search the initial text.
    Mounted,
    /// User edited the search input box.
    SearchTextChanged(String),
    /// User submitted the current search input.
    SearchSubmitted,
    /// User clicked a column header.
    SortClicked(SortKey),
    /// User dismissed one hit from the active result list.
    Dismissed(HitId),
    /// User asked for the next page of the active term.
    MoreRequested,
    /// Engine delivered a page for a previously issued request.
    FetchSucceeded {
        request_id: RequestId,
        term: String,
        hits: Vec<Hit>,
        page: u32,
    },
    /// Engine failed a previously issued request.
    FetchFailed {
        request_id: RequestId,
        term: String,
        message: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
