//! Search engine: talks to the Hacker News search API and runs fetch effects.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_search_page, DecodeError};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use fetch::{
    build_search_url, FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_BASE_URL,
    DEFAULT_HITS_PER_PAGE,
};
pub use types::{EngineEvent, FailureKind, FetchError, RequestId, SearchHit, SearchPage};
