use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page of results for `term`; the response must carry `request_id` back.
    FetchPage {
        request_id: RequestId,
        term: String,
        page: u32,
    },
}
