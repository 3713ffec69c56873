//! Tool system
//!
//! Design: each tool is one named entry point with a JSON argument object
//! and a text result. ToolRegistry dispatches calls by tool name.

mod link_preview;
mod page_content;
mod web_search;

pub use link_preview::{fetch_link_preview, LinkPreviewTool};
pub use page_content::{get_page_content, PageContentTool};
pub use web_search::{search_web, WebSearchTool};

use crate::client::BoundedFetcher;
use crate::error::ToolError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for agent-callable tools
///
/// Implement this trait to expose a new operation. The registry hands every
/// tool the shared [`BoundedFetcher`], so tools never open connections of
/// their own.
#[async_trait]
pub trait PageTool: Send + Sync {
    /// Name the agent calls the tool by
    fn name(&self) -> &'static str;

    /// One-paragraph description for tool listings
    fn description(&self) -> &'static str;

    /// JSON Schema of the argument object
    fn input_schema(&self) -> Value;

    /// Run the tool
    ///
    /// Returns the text handed back to the agent on success.
    async fn execute(&self, fetcher: &BoundedFetcher, arguments: Value)
        -> Result<String, ToolError>;
}

/// Decode a tool's argument object
pub(crate) fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Serialize a schemars schema into a plain JSON value
pub(crate) fn schema_value(schema: schemars::schema::RootSchema) -> Value {
    serde_json::to_value(schema).unwrap_or_default()
}

/// Registry of tools, dispatched by name
///
/// Maintains tools in registration order, which is also the order they are
/// listed to agents.
pub struct ToolRegistry {
    tools: Vec<Box<dyn PageTool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry with the built-in tools
    ///
    /// Includes `fetch_link_preview`, `get_page_content` and `search_web`.
    pub fn with_defaults(
        default_max_length: usize,
        search_endpoint: impl Into<String>,
        default_num_results: usize,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(LinkPreviewTool));
        registry.register(Box::new(PageContentTool::new(default_max_length)));
        registry.register(Box::new(WebSearchTool::new(
            search_endpoint,
            default_num_results,
        )));
        registry
    }

    /// Register a tool
    ///
    /// Tools are matched in registration order, so an earlier tool with the
    /// same name keeps winning dispatch.
    pub fn register(&mut self, tool: Box<dyn PageTool>) {
        self.tools.push(tool);
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn PageTool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    /// Registered tools, in registration order
    pub fn tools(&self) -> impl Iterator<Item = &dyn PageTool> {
        self.tools.iter().map(|tool| tool.as_ref())
    }

    /// Run the named tool
    pub async fn dispatch(
        &self,
        fetcher: &BoundedFetcher,
        name: &str,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let Some(tool) = self.get(name) else {
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        tracing::debug!(tool = tool.name(), "Dispatching tool call");
        tool.execute(fetcher, arguments).await
    }
}
