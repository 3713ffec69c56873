//! MCP (Model Context Protocol) server implementation

use linkscout::Toolkit;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// JSON-RPC 2.0 request
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    /// Serialized as `null` when the request id could not be read
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// MCP Server implementation
struct McpServer {
    toolkit: Toolkit,
}

impl McpServer {
    fn new(toolkit: Toolkit) -> Self {
        Self { toolkit }
    }

    /// Handle one line of input; notifications produce no response
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => {
                if request.id.is_none() && request.method.starts_with("notifications/") {
                    debug!(method = %request.method, "Ignoring notification");
                    return None;
                }
                Some(self.handle_request(request).await)
            }
            Err(e) => Some(JsonRpcResponse::error(
                None,
                -32700,
                format!("Parse error: {}", e),
            )),
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "linkscout",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = self
            .toolkit
            .tools()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.input_schema()
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let response = self.toolkit.call(tool_name, arguments).await;

        let mut result = json!({
            "content": [{
                "type": "text",
                "text": response.text
            }]
        });
        if response.is_error {
            result["isError"] = json!(true);
        }
        JsonRpcResponse::success(id, result)
    }
}

/// Run the MCP server over stdio
///
/// Returns when stdin is closed.
pub async fn run_server(toolkit: Toolkit) {
    let server = McpServer::new(toolkit);
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    info!("MCP server listening on stdio");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Error reading stdin: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let Some(response) = server.handle_line(&line).await else {
            continue;
        };

        let json = serde_json::to_string(&response).unwrap_or_default();
        if let Err(e) = write_line(&mut stdout, &json).await {
            warn!("Error writing to stdout: {}", e);
            break;
        }
    }

    info!("Transport closed, shutting down");
}

async fn write_line(stdout: &mut io::Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        McpServer::new(Toolkit::builder().build().unwrap())
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server().handle_request(request("initialize", json!({}))).await;
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "linkscout");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = server().handle_request(request("tools/list", json!({}))).await;
        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["fetch_link_preview", "get_page_content", "search_web"]
        );
        assert!(result["tools"][0]["inputSchema"]["properties"]["url"].is_object());
    }

    #[tokio::test]
    async fn test_parse_error_carries_null_id() {
        let response = server().handle_line("{not json").await.unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"]["code"], -32700);
        assert!(json.as_object().unwrap().contains_key("id"));
        assert_eq!(json["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server().handle_line(line).await.is_none());
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let line = r#"{"jsonrpc":"2.0","id":"abc","method":"ping"}"#;
        let response = server().handle_line(line).await.unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["result"], json!({}));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server().handle_request(request("resources/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_tool_errors_are_results() {
        let response = server()
            .handle_request(request(
                "tools/call",
                json!({ "name": "fetch_link_preview", "arguments": { "url": "" } }),
            ))
            .await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["error"], "Missing required parameter: url");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let response = server()
            .handle_request(request("tools/call", json!({ "name": "shell" })))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Unknown tool: shell"));
    }
}
