use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use btc_data_mcp::ToolDispatcher;

use super::EndpointArgs;

/// Dispatch a single tool call and print its result
#[derive(Parser, Debug)]
pub struct CallCmd {
    /// Tool name (e.g., get_block)
    pub name: String,

    /// JSON input string
    #[arg(long, conflicts_with = "file")]
    pub input: Option<String>,

    /// JSON input file path ("-" for stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Print the result on one line
    #[arg(long)]
    pub compact: bool,
}

impl CallCmd {
    pub async fn execute(&self, endpoints: &EndpointArgs, json_output: bool) -> Result<()> {
        let input = self.read_input()?;
        let dispatcher = ToolDispatcher::new(endpoints.config());

        let output = dispatcher
            .dispatch(&self.name, input)
            .await
            .map_err(|err| anyhow!("{} (code {})", err, err.rpc_code()))?;

        for warning in &output.warnings {
            eprintln!("warning: {}", warning);
        }

        let rendered = if json_output {
            serde_json::to_string_pretty(&output)?
        } else if self.compact {
            serde_json::to_string(&output.result)?
        } else {
            serde_json::to_string_pretty(&output.result)?
        };
        println!("{}", rendered);
        Ok(())
    }

    fn read_input(&self) -> Result<Value> {
        let json_str = if let Some(file) = &self.file {
            if file.as_os_str() == "-" {
                use std::io::Read;
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(file)
                    .with_context(|| format!("Failed to read file: {}", file.display()))?
            }
        } else if let Some(input) = &self.input {
            input.clone()
        } else {
            return Ok(Value::Object(Default::default()));
        };

        serde_json::from_str(&json_str).with_context(|| "Failed to parse JSON input")
    }
}
