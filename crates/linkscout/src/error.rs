//! Error types for linkscout

use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL is malformed or has a non-HTTP scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrl,

    /// URL is blocked by prefix list
    #[error("Blocked URL: prefix not allowed")]
    BlockedUrl,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// No complete response within the fetch budget
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// DNS, connection, TLS or body read failure
    #[error("Network error: {0}")]
    Network(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { timeout_ms }
        } else if err.is_builder() {
            FetchError::InvalidUrl
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Failure class reported at the tool boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid argument
    Input,
    /// Fetch exceeded its budget
    Timeout,
    /// Connection, DNS or TLS failure
    Network,
    /// Dispatch received an unrecognized tool name
    UnknownTool,
}

/// Errors surfaced by tool invocations
#[derive(Debug, Error)]
pub enum ToolError {
    /// Required argument is absent or empty
    #[error("Missing required parameter: {0}")]
    MissingArgument(&'static str),

    /// Arguments could not be decoded
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Page fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ToolError {
    /// Taxonomy class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::MissingArgument(_) | ToolError::InvalidArguments(_) => ErrorKind::Input,
            ToolError::UnknownTool(_) => ErrorKind::UnknownTool,
            ToolError::Fetch(err) => match err {
                FetchError::MissingUrl | FetchError::InvalidUrl | FetchError::BlockedUrl => {
                    ErrorKind::Input
                }
                FetchError::Timeout { .. } => ErrorKind::Timeout,
                FetchError::Network(_) | FetchError::ClientBuildError(_) => ErrorKind::Network,
            },
        }
    }
}
