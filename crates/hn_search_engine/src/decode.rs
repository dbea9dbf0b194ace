use serde::Deserialize;

use crate::{SearchHit, SearchPage};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid search response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawPage {
    hits: Vec<RawHit>,
    page: u32,
}

// The API sends `null` for fields a story does not have (e.g. `url` on Ask HN).
#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    num_comments: Option<u32>,
    #[serde(default)]
    points: Option<u32>,
}

impl From<RawHit> for SearchHit {
    fn from(raw: RawHit) -> Self {
        Self {
            object_id: raw.object_id,
            title: raw.title.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            author: raw.author.unwrap_or_default(),
            num_comments: raw.num_comments.unwrap_or_default(),
            points: raw.points.unwrap_or_default(),
        }
    }
}

/// Decode a `/search` response body.
pub fn decode_search_page(bytes: &[u8]) -> Result<SearchPage, DecodeError> {
    let raw: RawPage = serde_json::from_slice(bytes)?;
    Ok(SearchPage {
        hits: raw.hits.into_iter().map(SearchHit::from).collect(),
        page: raw.page,
    })
}
