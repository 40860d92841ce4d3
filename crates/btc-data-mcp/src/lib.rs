//! Bitcoin data MCP server.
//!
//! Twelve read-only tools over three cached upstreams (block explorer,
//! market index, mempool/fee service). Each tool returns the raw upstream
//! data together with derived metrics computed by [`analysis`].
//!
//! The [`ToolDispatcher`] is the transport-independent entry point; the rmcp
//! stdio server in [`server`] and the `btc-data call` CLI both go through it.

pub mod analysis;
pub mod error;
pub mod logging;
pub mod paths;
pub mod server;
pub mod state;
pub mod tools;

pub use error::ToolError;
pub use paths::DataPaths;
pub use state::{DataConfig, ToolDispatcher, ToolMeta, ToolOutput};
