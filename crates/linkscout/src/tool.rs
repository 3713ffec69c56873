//! Toolkit builder and the tool-call boundary

use crate::client::{BoundedFetcher, FetchOptions, FAVICON_TIMEOUT, PAGE_TIMEOUT};
use crate::error::{FetchError, ToolError};
use crate::tools::{fetch_link_preview, get_page_content, search_web, PageTool, ToolRegistry};
use crate::types::{ContentDigest, LinkPreview, SearchResult};
use crate::{DEFAULT_MAX_LENGTH, DEFAULT_NUM_RESULTS, DEFAULT_SEARCH_ENDPOINT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Result of a tool call as handed to the agent
///
/// Failures are carried as `{"error": "..."}` text with `is_error` set; a
/// call never surfaces a raw error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Tool output, or the JSON error payload
    pub text: String,
    /// True if the call failed
    pub is_error: bool,
}

impl ToolResponse {
    /// Successful output
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Error payload for a failed call
    pub fn failure(err: &ToolError) -> Self {
        Self {
            text: json!({ "error": err.to_string() }).to_string(),
            is_error: true,
        }
    }
}

/// Builder for configuring the toolkit
#[derive(Debug, Clone)]
pub struct ToolBuilder {
    /// Custom User-Agent
    user_agent: Option<String>,
    /// Allow list of URL prefixes
    allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    block_prefixes: Vec<String>,
    page_timeout: Duration,
    favicon_timeout: Duration,
    /// Results page queried by `search_web`
    search_endpoint: String,
    default_max_length: usize,
    default_num_results: usize,
}

impl Default for ToolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolBuilder {
    /// Create a new builder with the stock budgets and search provider
    pub fn new() -> Self {
        Self {
            user_agent: None,
            allow_prefixes: Vec::new(),
            block_prefixes: Vec::new(),
            page_timeout: PAGE_TIMEOUT,
            favicon_timeout: FAVICON_TIMEOUT,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            default_max_length: DEFAULT_MAX_LENGTH,
            default_num_results: DEFAULT_NUM_RESULTS,
        }
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Add URL prefix to allow list
    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.allow_prefixes.push(prefix.into());
        self
    }

    /// Add URL prefix to block list
    pub fn block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.block_prefixes.push(prefix.into());
        self
    }

    /// Budget for page and search fetches
    pub fn page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    /// Budget for the favicon probe
    pub fn favicon_timeout(mut self, timeout: Duration) -> Self {
        self.favicon_timeout = timeout;
        self
    }

    /// Use a different search results page
    pub fn search_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_endpoint = endpoint.into();
        self
    }

    /// Length used by `get_page_content` when the caller gives none
    pub fn default_max_length(mut self, max_length: usize) -> Self {
        self.default_max_length = max_length;
        self
    }

    /// Result count used by `search_web` when the caller gives none
    pub fn default_num_results(mut self, num_results: usize) -> Self {
        self.default_num_results = num_results;
        self
    }

    /// Build the toolkit
    ///
    /// Fails only if the HTTP client cannot be created.
    pub fn build(self) -> Result<Toolkit, FetchError> {
        let fetcher = BoundedFetcher::new(FetchOptions {
            user_agent: self.user_agent,
            allow_prefixes: self.allow_prefixes,
            block_prefixes: self.block_prefixes,
            page_timeout: self.page_timeout,
            favicon_timeout: self.favicon_timeout,
        })?;

        let registry = ToolRegistry::with_defaults(
            self.default_max_length,
            self.search_endpoint.clone(),
            self.default_num_results,
        );

        Ok(Toolkit {
            fetcher,
            registry,
            search_endpoint: self.search_endpoint,
            default_max_length: self.default_max_length,
            default_num_results: self.default_num_results,
        })
    }
}

/// Configured set of tools sharing one HTTP client
///
/// Built once per process; holds no mutable state, so concurrent calls are
/// independent.
pub struct Toolkit {
    fetcher: BoundedFetcher,
    registry: ToolRegistry,
    search_endpoint: String,
    default_max_length: usize,
    default_num_results: usize,
}

impl Toolkit {
    /// Create a new tool builder
    pub fn builder() -> ToolBuilder {
        ToolBuilder::new()
    }

    /// The fetcher all tools go through
    pub fn fetcher(&self) -> &BoundedFetcher {
        &self.fetcher
    }

    /// Registered tools, in listing order
    pub fn tools(&self) -> impl Iterator<Item = &dyn PageTool> {
        self.registry.tools()
    }

    /// Link preview for `url`
    pub async fn link_preview(&self, url: &str) -> Result<LinkPreview, ToolError> {
        fetch_link_preview(&self.fetcher, url).await
    }

    /// Readable text of `url`; `max_length` defaults to the configured length
    pub async fn page_content(
        &self,
        url: &str,
        max_length: Option<usize>,
    ) -> Result<ContentDigest, ToolError> {
        let max_length = max_length.unwrap_or(self.default_max_length);
        get_page_content(&self.fetcher, url, max_length).await
    }

    /// Web search; `num_results` defaults to the configured count
    pub async fn search(
        &self,
        query: &str,
        num_results: Option<usize>,
    ) -> Result<Vec<SearchResult>, ToolError> {
        let num_results = num_results.unwrap_or(self.default_num_results);
        search_web(&self.fetcher, &self.search_endpoint, query, num_results).await
    }

    /// Run a tool by name, returning its raw result
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        self.registry.dispatch(&self.fetcher, name, arguments).await
    }

    /// Run a tool by name, converting any failure into an error payload
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResponse {
        match self.dispatch(name, arguments).await {
            Ok(text) => ToolResponse::success(text),
            Err(err) => {
                debug!(tool = name, kind = ?err.kind(), error = %err, "Tool call failed");
                ToolResponse::failure(&err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_builder() {
        let builder = Toolkit::builder()
            .user_agent("TestAgent/1.0")
            .allow_prefix("https://allowed.com")
            .block_prefix("https://blocked.com")
            .page_timeout(Duration::from_secs(5))
            .favicon_timeout(Duration::from_millis(500))
            .search_endpoint("http://localhost:9000/html/")
            .default_max_length(100)
            .default_num_results(3);

        assert_eq!(builder.user_agent, Some("TestAgent/1.0".to_string()));
        assert_eq!(builder.allow_prefixes, vec!["https://allowed.com"]);
        assert_eq!(builder.block_prefixes, vec!["https://blocked.com"]);
        assert_eq!(builder.search_endpoint, "http://localhost:9000/html/");

        let toolkit = builder.build().unwrap();
        let options = toolkit.fetcher().options();
        assert_eq!(options.page_timeout, Duration::from_secs(5));
        assert_eq!(options.favicon_timeout, Duration::from_millis(500));
        assert_eq!(toolkit.default_max_length, 100);
        assert_eq!(toolkit.default_num_results, 3);
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ToolBuilder::default();
        assert_eq!(builder.page_timeout, Duration::from_secs(15));
        assert_eq!(builder.favicon_timeout, Duration::from_secs(3));
        assert_eq!(builder.search_endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(builder.default_max_length, 5000);
        assert_eq!(builder.default_num_results, 10);
    }

    #[test]
    fn test_failure_payload() {
        let response = ToolResponse::failure(&ToolError::MissingArgument("url"));
        assert!(response.is_error);
        let payload: Value = serde_json::from_str(&response.text).unwrap();
        assert_eq!(
            payload,
            json!({ "error": "Missing required parameter: url" })
        );
    }

    #[tokio::test]
    async fn test_call_never_raises() {
        let toolkit = Toolkit::builder().build().unwrap();

        let response = toolkit.call("fetch_link_preview", json!({ "url": "" })).await;
        assert!(response.is_error);
        assert!(response.text.contains("Missing required parameter: url"));

        let response = toolkit.call("get_page_content", json!({})).await;
        assert!(response.is_error);
        assert!(response.text.contains("error"));

        let response = toolkit.call("no_such_tool", json!({})).await;
        assert!(response.is_error);
        assert!(response.text.contains("Unknown tool: no_such_tool"));
    }
}
