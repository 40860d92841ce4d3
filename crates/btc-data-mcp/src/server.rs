//! rmcp server over stdio.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorCode, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde_json::Value;
use tracing::info;

use crate::error::ToolError;
use crate::state::ToolDispatcher;
use crate::tools::tool_definitions;

#[derive(Clone)]
pub struct BitcoinDataServer {
    dispatcher: Arc<ToolDispatcher>,
}

impl BitcoinDataServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Tool list in rmcp's model, schemas as declared in [`tool_definitions`].
pub fn rmcp_tools() -> Vec<Tool> {
    tool_definitions()
        .into_iter()
        .map(|def| {
            let schema = match def.input_schema {
                Value::Object(map) => map,
                _ => serde_json::Map::new(),
            };
            Tool::new(def.name, def.description, Arc::new(schema))
        })
        .collect()
}

pub fn to_mcp_error(err: &ToolError) -> McpError {
    McpError::new(
        ErrorCode(err.rpc_code()),
        err.to_string(),
        Some(serde_json::json!({ "kind": err.kind() })),
    )
}

impl ServerHandler for BitcoinDataServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Bitcoin data MCP server. Blocks, transactions, addresses, prices, fees and mempool state with derived analysis."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(rmcp_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let input = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        let output = self
            .dispatcher
            .dispatch(&request.name, input)
            .await
            .map_err(|err| to_mcp_error(&err))?;
        let text = serde_json::to_string_pretty(&output.result)
            .map_err(|err| McpError::internal_error(err.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

/// Serve until the client disconnects.
pub async fn serve_stdio(dispatcher: ToolDispatcher) -> anyhow::Result<()> {
    let server = BitcoinDataServer::new(dispatcher);
    info!("Bitcoin Data MCP server running on stdio");
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    info!("MCP session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmcp_tool_list_carries_schemas() {
        let tools = rmcp_tools();
        assert_eq!(tools.len(), 12);
        let utxo = tools
            .iter()
            .find(|t| t.name == "analyze_utxo_distribution")
            .unwrap();
        assert_eq!(utxo.input_schema["required"], serde_json::json!(["address_list"]));
    }

    #[test]
    fn error_codes_reach_the_client() {
        let err = to_mcp_error(&ToolError::UnknownTool("nope".into()));
        assert_eq!(err.code, ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(err.message, "Unknown tool: nope");

        let err = to_mcp_error(&ToolError::malformed("get_block", "missing field"));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }
}
