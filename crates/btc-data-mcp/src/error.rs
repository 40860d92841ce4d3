//! Errors surfaced to MCP clients.

use thiserror::Error;

use btc_data_provider::ProviderError;

/// JSON-RPC "method not found".
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC "internal error".
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// A single upstream fetch failed, or an all-or-nothing join had a member fail.
    #[error("{operation} failed: {cause}")]
    UpstreamFailure { operation: String, cause: String },

    /// Some members of a partial-tolerant fan-out failed. Not fatal: the
    /// tool still answers and carries this as a warning.
    #[error("{operation}: {failed} of {total} upstream fetches failed")]
    PartialUpstreamFailure {
        operation: String,
        failed: usize,
        total: usize,
    },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    MalformedArgument { tool: String, message: String },
}

impl ToolError {
    pub fn malformed(tool: &str, message: impl Into<String>) -> Self {
        ToolError::MalformedArgument {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    /// JSON-RPC error code reported to the client.
    ///
    /// Only an unknown tool maps to "method not found"; argument and
    /// upstream problems are all reported as internal errors.
    pub fn rpc_code(&self) -> i32 {
        match self {
            ToolError::UnknownTool(_) => METHOD_NOT_FOUND,
            _ => INTERNAL_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::UpstreamFailure { .. } => "upstream_failure",
            ToolError::PartialUpstreamFailure { .. } => "partial_upstream_failure",
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::MalformedArgument { .. } => "malformed_argument",
        }
    }
}

impl From<ProviderError> for ToolError {
    fn from(err: ProviderError) -> Self {
        ToolError::UpstreamFailure {
            operation: err.operation().to_string(),
            cause: err.cause().to_string(),
        }
    }
}
