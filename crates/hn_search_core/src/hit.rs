/// Identifier of a search hit as reported by the API (`objectID`).
pub type HitId = String;

/// One search result. Never mutated after it is received.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hit {
    pub object_id: HitId,
    pub title: String,
    pub url: String,
    pub author: String,
    pub num_comments: u32,
    pub points: u32,
}
