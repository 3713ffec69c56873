//! Core types for linkscout

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments of `fetch_link_preview`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LinkPreviewRequest {
    /// The page to preview (required, must be http:// or https://)
    pub url: String,
}

impl LinkPreviewRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Arguments of `get_page_content`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageContentRequest {
    /// The page to read (required, must be http:// or https://)
    pub url: String,

    /// Maximum number of characters to return (optional, default 5000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl PageContentRequest {
    /// Create a new request with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum content length
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// Arguments of `search_web`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebSearchRequest {
    /// Search query (required)
    pub query: String,

    /// Maximum number of results (optional, default 10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_results: Option<usize>,
}

impl WebSearchRequest {
    /// Create a new request with the given query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of results
    pub fn num_results(mut self, num_results: usize) -> Self {
        self.num_results = Some(num_results);
        self
    }
}

/// Social-preview metadata for a page
///
/// Every field except `url` is optional and omitted from JSON when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    /// The requested URL
    pub url: String,

    /// Content-Type response header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// `lang` attribute of the root element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preview image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// OpenGraph object type (`website`, `article`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Canonical URL declared by `og:url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_canonical: Option<String>,

    /// Twitter card style (`summary`, `summary_large_image`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,

    /// Site icon, present only when `/favicon.ico` answered successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// Readable text extracted from a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentDigest {
    /// Whitespace-normalized text, at most `max_length` characters
    pub text: String,
    /// Character budget the text was truncated to
    pub max_length: usize,
}

/// A single web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    /// Result excerpt, empty when the provider shows none
    pub snippet: String,
}
