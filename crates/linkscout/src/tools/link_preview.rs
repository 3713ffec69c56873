//! `fetch_link_preview` tool

use super::{parse_arguments, schema_value, PageTool};
use crate::client::BoundedFetcher;
use crate::error::{FetchError, ToolError};
use crate::extract::{extract_preview, Html};
use crate::favicon::probe_favicon;
use crate::types::{LinkPreview, LinkPreviewRequest};
use async_trait::async_trait;
use schemars::schema_for;
use serde_json::Value;
use tracing::warn;

/// Fetch `url` and build its link preview
///
/// The favicon is probed after the page itself; its failure never fails
/// the preview.
pub async fn fetch_link_preview(
    fetcher: &BoundedFetcher,
    url: &str,
) -> Result<LinkPreview, ToolError> {
    if url.trim().is_empty() {
        return Err(FetchError::MissingUrl.into());
    }

    let page = fetcher.fetch(url, fetcher.options().page_timeout).await?;
    if !page.status_ok {
        warn!(url, status = page.status, "Previewing a non-success response");
    }

    let preview = {
        let doc = Html::parse_document(&page.body);
        extract_preview(&doc, url, page.header("content-type"))
    };

    let favicon = probe_favicon(fetcher, url).await;

    Ok(LinkPreview { favicon, ..preview })
}

/// Social-preview metadata (OpenGraph, Twitter Card, HTML fallbacks)
pub struct LinkPreviewTool;

#[async_trait]
impl PageTool for LinkPreviewTool {
    fn name(&self) -> &'static str {
        "fetch_link_preview"
    }

    fn description(&self) -> &'static str {
        "Fetch a web page and return its link preview metadata as JSON: title, \
         description, image, site name, type, canonical URL, Twitter card, \
         language, content type and favicon. Fields that the page does not \
         provide are omitted."
    }

    fn input_schema(&self) -> Value {
        schema_value(schema_for!(LinkPreviewRequest))
    }

    async fn execute(
        &self,
        fetcher: &BoundedFetcher,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let request: LinkPreviewRequest = parse_arguments(arguments)?;
        let preview = fetch_link_preview(fetcher, &request.url).await?;
        Ok(serde_json::to_string_pretty(&preview).unwrap_or_default())
    }
}
