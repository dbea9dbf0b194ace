use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use url::Url;

use crate::{decode_search_page, FailureKind, FetchError, SearchPage};

pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";
pub const DEFAULT_HITS_PER_PAGE: u32 = 5;

const PATH_SEARCH: &str = "search";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub hits_per_page: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Builds `{base_url}/search?query=..&page=..&hitsPerPage=..` with the term percent-encoded.
pub fn build_search_url(
    base_url: &str,
    term: &str,
    page: u32,
    hits_per_page: u32,
) -> Result<Url, FetchError> {
    let base = format!("{}/{}", base_url.trim_end_matches('/'), PATH_SEARCH);
    let mut url =
        Url::parse(&base).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.query_pairs_mut()
        .append_pair("query", term)
        .append_pair("page", &page.to_string())
        .append_pair("hitsPerPage", &hits_per_page.to_string());
    Ok(url)
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_page(&self, term: &str, page: u32) -> Result<SearchPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_page(&self, term: &str, page: u32) -> Result<SearchPage, FetchError> {
        let url = build_search_url(
            &self.settings.base_url,
            term,
            page,
            self.settings.hits_per_page,
        )?;
        engine_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        decode_search_page(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
