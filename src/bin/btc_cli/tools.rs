use anyhow::Result;
use clap::Parser;

use btc_data_mcp::tools::tool_definitions;

/// List the available tools
#[derive(Parser, Debug)]
pub struct ToolsCmd {}

impl ToolsCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let tools = tool_definitions();
        if json_output {
            println!("{}", serde_json::to_string_pretty(&tools)?);
            return Ok(());
        }

        let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for tool in &tools {
            println!("{:<width$}  {}", tool.name, tool.description, width = width);
        }
        Ok(())
    }
}
