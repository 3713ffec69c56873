//! `search_web` tool

use super::{parse_arguments, schema_value, PageTool};
use crate::client::BoundedFetcher;
use crate::error::{FetchError, ToolError};
use crate::extract::{extract_search_results, Html};
use crate::types::{SearchResult, WebSearchRequest};
use async_trait::async_trait;
use schemars::schema_for;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Query the results page at `endpoint` and return up to `num_results` hits
pub async fn search_web(
    fetcher: &BoundedFetcher,
    endpoint: &str,
    query: &str,
    num_results: usize,
) -> Result<Vec<SearchResult>, ToolError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ToolError::MissingArgument("query"));
    }

    let search_url =
        Url::parse_with_params(endpoint, &[("q", query)]).map_err(|_| FetchError::InvalidUrl)?;

    let page = fetcher
        .fetch(search_url.as_str(), fetcher.options().page_timeout)
        .await?;
    if !page.status_ok {
        warn!(status = page.status, "Search provider returned a non-success response");
    }

    let results = {
        let doc = Html::parse_document(&page.body);
        extract_search_results(&doc, &search_url, num_results)
    };
    debug!(query, count = results.len(), "Search results extracted");

    Ok(results)
}

/// Web search through a results page
pub struct WebSearchTool {
    endpoint: String,
    default_num_results: usize,
}

impl WebSearchTool {
    /// Create the tool for a results page endpoint
    pub fn new(endpoint: impl Into<String>, default_num_results: usize) -> Self {
        Self {
            endpoint: endpoint.into(),
            default_num_results,
        }
    }
}

#[async_trait]
impl PageTool for WebSearchTool {
    fn name(&self) -> &'static str {
        "search_web"
    }

    fn description(&self) -> &'static str {
        "Search the web and return a JSON array of results, each with title, \
         url and snippet, in ranking order. Returns at most numResults \
         results (default 10)."
    }

    fn input_schema(&self) -> Value {
        schema_value(schema_for!(WebSearchRequest))
    }

    async fn execute(
        &self,
        fetcher: &BoundedFetcher,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let request: WebSearchRequest = parse_arguments(arguments)?;
        let num_results = request.num_results.unwrap_or(self.default_num_results);
        let results = search_web(fetcher, &self.endpoint, &request.query, num_results).await?;
        Ok(serde_json::to_string_pretty(&results).unwrap_or_default())
    }
}
