use anyhow::Result;
use clap::Parser;

use btc_data_mcp::server::serve_stdio;
use btc_data_mcp::ToolDispatcher;

use super::EndpointArgs;

/// Run the MCP server on stdin/stdout
#[derive(Parser, Debug)]
pub struct ServeCmd {}

impl ServeCmd {
    pub async fn execute(&self, endpoints: &EndpointArgs) -> Result<()> {
        serve_stdio(ToolDispatcher::new(endpoints.config())).await
    }
}
