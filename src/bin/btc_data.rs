//! btc-data: developer CLI for the Bitcoin data MCP tools
//!
//! Runs the same dispatcher as the MCP server, so any tool can be exercised
//! from a shell without an MCP client.
//!
//! ## Example Usage
//!
//! ```bash
//! # List tools and their descriptions
//! btc-data tools
//!
//! # Fetch a block with derived analysis
//! btc-data call get_block --input '{"block_hash_or_height": "800000"}'
//!
//! # Point the explorer at a local Esplora instance
//! btc-data --explorer-url http://localhost:3002 call get_utxos --input '{"address": "bc1q..."}'
//!
//! # Serve MCP over stdio
//! btc-data serve
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod btc_cli;

use btc_cli::{call::CallCmd, serve::ServeCmd, tools::ToolsCmd, EndpointArgs};
use btc_data_mcp::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "btc-data",
    author,
    version,
    about = "Bitcoin blockchain, market and network data tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    endpoints: EndpointArgs,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available tools
    Tools(ToolsCmd),

    /// Dispatch a single tool call and print the result
    Call(CallCmd),

    /// Run the MCP server on stdin/stdout
    Serve(ServeCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        endpoints,
        json,
    } = Cli::parse();
    init_tracing();

    match command {
        Commands::Tools(cmd) => cmd.execute(json),
        Commands::Call(cmd) => cmd.execute(&endpoints, json).await,
        Commands::Serve(cmd) => cmd.execute(&endpoints).await,
    }
}
