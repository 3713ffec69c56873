//! Linkscout - link previews, readable page text and web search for agents
//!
//! This crate fetches arbitrary web pages under a strict time budget and
//! extracts structured information from them:
//!
//! - link preview metadata (OpenGraph, Twitter Card and HTML fallbacks, plus
//!   a best-effort favicon probe)
//! - boilerplate-free readable text
//! - web search results
//!
//! ## Tool System
//!
//! Each operation is exposed as a [`PageTool`] held in a [`ToolRegistry`].
//! A [`Toolkit`] owns the shared [`BoundedFetcher`] and the registry; its
//! [`Toolkit::call`] converts every failure into an `{"error": ...}` payload.
//!
//! Built-in tools:
//! - [`LinkPreviewTool`] - `fetch_link_preview`
//! - [`PageContentTool`] - `get_page_content`
//! - [`WebSearchTool`] - `search_web`

pub mod client;
mod error;
pub mod extract;
mod favicon;
mod tool;
pub mod tools;
mod types;

pub use client::{BoundedFetcher, FetchOptions, FetchedPage};
pub use error::{ErrorKind, FetchError, ToolError};
pub use favicon::{favicon_candidate, probe_favicon};
pub use tool::{ToolBuilder, ToolResponse, Toolkit};
pub use tools::{LinkPreviewTool, PageContentTool, PageTool, ToolRegistry, WebSearchTool};
pub use types::{
    ContentDigest, LinkPreview, LinkPreviewRequest, PageContentRequest, SearchResult,
    WebSearchRequest,
};

/// Default User-Agent string
///
/// Browser-like, since many sites serve a stripped page to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default character budget of `get_page_content`
pub const DEFAULT_MAX_LENGTH: usize = 5000;

/// Default result count of `search_web`
pub const DEFAULT_NUM_RESULTS: usize = 10;

/// Results page queried by `search_web`
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# Linkscout Tools

Structured information from arbitrary web pages. Pages are fetched with a
15 second budget; JavaScript is not executed.

## fetch_link_preview
Link preview metadata of a page.

### Input Parameters
- `url` (required): The page URL (must be http:// or https://)

### Output Fields (absent fields are omitted)
- `url`: The requested URL
- `contentType`: Content-Type response header
- `language`: `lang` attribute of the page
- `title`: og:title, then twitter:title, then <title>
- `description`: og:description, then twitter:description, then meta description
- `image`: og:image, then twitter:image
- `siteName`: og:site_name
- `type`: og:type
- `urlCanonical`: og:url
- `twitterCard`: twitter:card
- `favicon`: /favicon.ico of the site, if it exists

## get_page_content
Readable text of a page as plain text. Scripts, styles, navigation,
headers, footers, sidebars, forms and iframes are removed; text is taken
from <article>, <main> or <body>, whitespace is collapsed.

### Input Parameters
- `url` (required): The page URL
- `maxLength` (optional): Maximum characters returned (default: 5000)

## search_web
Web search results as a JSON array of `{title, url, snippet}`.

### Input Parameters
- `query` (required): Search query
- `numResults` (optional): Maximum results (default: 10)

## Examples

```json
{"name": "fetch_link_preview", "arguments": {"url": "https://example.com"}}
```

```json
{"name": "get_page_content", "arguments": {"url": "https://example.com", "maxLength": 2000}}
```

```json
{"name": "search_web", "arguments": {"query": "rust async runtime", "numResults": 5}}
```

## Error Handling
- Failures return `{"error": "<message>"}` with the error flag set
- Missing or invalid arguments, timeouts and network failures are errors
- A missing favicon is not an error; the field is omitted
- Error pages (404, 500) are still parsed; they are not errors
"#;
