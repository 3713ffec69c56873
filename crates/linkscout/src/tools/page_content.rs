//! `get_page_content` tool

use super::{parse_arguments, schema_value, PageTool};
use crate::client::BoundedFetcher;
use crate::error::{FetchError, ToolError};
use crate::extract::{extract_content, Html};
use crate::types::{ContentDigest, PageContentRequest};
use async_trait::async_trait;
use schemars::schema_for;
use serde_json::Value;
use tracing::warn;

/// Fetch `url` and return its readable text, cut to `max_length` characters
pub async fn get_page_content(
    fetcher: &BoundedFetcher,
    url: &str,
    max_length: usize,
) -> Result<ContentDigest, ToolError> {
    if url.trim().is_empty() {
        return Err(FetchError::MissingUrl.into());
    }

    let page = fetcher.fetch(url, fetcher.options().page_timeout).await?;
    if !page.status_ok {
        warn!(url, status = page.status, "Extracting content from a non-success response");
    }

    let doc = Html::parse_document(&page.body);
    Ok(extract_content(&doc, max_length))
}

/// Boilerplate-free plain text of a page
pub struct PageContentTool {
    default_max_length: usize,
}

impl PageContentTool {
    /// Create the tool with the length used when the caller gives none
    pub fn new(default_max_length: usize) -> Self {
        Self { default_max_length }
    }
}

#[async_trait]
impl PageTool for PageContentTool {
    fn name(&self) -> &'static str {
        "get_page_content"
    }

    fn description(&self) -> &'static str {
        "Fetch a web page and return its main readable text. Scripts, styles, \
         navigation, headers, footers, sidebars and forms are removed, \
         whitespace is collapsed and the text is cut to maxLength characters \
         (default 5000)."
    }

    fn input_schema(&self) -> Value {
        schema_value(schema_for!(PageContentRequest))
    }

    async fn execute(
        &self,
        fetcher: &BoundedFetcher,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let request: PageContentRequest = parse_arguments(arguments)?;
        let max_length = request.max_length.unwrap_or(self.default_max_length);
        let digest = get_page_content(fetcher, &request.url, max_length).await?;
        Ok(digest.text)
    }
}
