//! Bounded HTTP client
//!
//! Every outbound request goes through [`BoundedFetcher::fetch`], which
//! enforces a hard time budget on the whole exchange (connect, headers and
//! body). Non-success statuses are not errors: the page is returned with
//! `status_ok == false` so callers can still inspect it.

use crate::error::FetchError;
use crate::DEFAULT_USER_AGENT;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Budget for page and search result fetches
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Budget for the favicon probe
pub const FAVICON_TIMEOUT: Duration = Duration::from_secs(3);

/// Accept header sent with every request
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accept-Language header sent with every request
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

/// Bodies larger than this are cut off
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Fetch options that can be configured via tool builder
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Allow list of URL prefixes
    pub allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    pub block_prefixes: Vec<String>,
    /// Budget for page fetches
    pub page_timeout: Duration,
    /// Budget for favicon probes
    pub favicon_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            allow_prefixes: Vec::new(),
            block_prefixes: Vec::new(),
            page_timeout: PAGE_TIMEOUT,
            favicon_timeout: FAVICON_TIMEOUT,
        }
    }
}

/// Outcome of a single GET request
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// True for 2xx statuses
    pub status_ok: bool,
    /// Response headers keyed by lower-cased name
    pub headers: HashMap<String, String>,
    /// Body decoded as (lossy) UTF-8
    pub body: String,
}

impl FetchedPage {
    /// Look up a response header, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// HTTP GET with a hard timeout
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BoundedFetcher {
    client: reqwest::Client,
    options: FetchOptions,
}

impl BoundedFetcher {
    /// Build a fetcher with the fixed identifying header set
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FetchError::ClientBuildError)?;

        Ok(Self { client, options })
    }

    /// Options this fetcher was built with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Check a URL before any network attempt
    pub fn validate_url(&self, url: &str) -> Result<Url, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::MissingUrl);
        }

        let parsed = Url::parse(url.trim()).map_err(|_| FetchError::InvalidUrl)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(FetchError::InvalidUrl);
        }

        // Prefix rules match the normalized URL
        let url = parsed.as_str();

        if !self.options.allow_prefixes.is_empty()
            && !self
                .options
                .allow_prefixes
                .iter()
                .any(|prefix| url.starts_with(prefix))
        {
            return Err(FetchError::BlockedUrl);
        }

        if self
            .options
            .block_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix))
        {
            return Err(FetchError::BlockedUrl);
        }

        Ok(parsed)
    }

    /// GET `url`, giving up after `timeout`
    ///
    /// The in-flight request is dropped (and its connection released) the
    /// moment the budget runs out.
    pub async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let parsed = self.validate_url(url)?;
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        debug!(url = %parsed, timeout_ms, "Fetching");

        match tokio::time::timeout(timeout, self.send(parsed, timeout_ms)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(url, timeout_ms, "Fetch budget exhausted");
                Err(FetchError::Timeout { timeout_ms })
            }
        }
    }

    async fn send(&self, url: Url, timeout_ms: u64) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers
                    .entry(name.as_str().to_string())
                    .or_insert_with(|| value.to_string());
            }
        }

        let body = read_body(response, timeout_ms).await?;

        Ok(FetchedPage {
            status: status.as_u16(),
            status_ok: status.is_success(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// Read the response body, keeping at most [`MAX_BODY_BYTES`]
async fn read_body(response: reqwest::Response, timeout_ms: u64) -> Result<Bytes, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| FetchError::from_reqwest(e, timeout_ms))?;
        let remaining = MAX_BODY_BYTES - body.len();
        if chunk.len() > remaining {
            body.extend_from_slice(&chunk[..remaining]);
            warn!(limit = MAX_BODY_BYTES, "Body limit reached, dropping the rest");
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}
