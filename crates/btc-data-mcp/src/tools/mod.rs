//! MCP tool implementations.
//!
//! - `inputs`: argument structs, defaults and validation
//! - `schema`: the advertised tool list and JSON schemas
//! - `handlers`: one handler per tool, as methods on the dispatcher

pub(crate) mod handlers;
pub mod inputs;
pub mod schema;

pub use schema::{tool_definitions, ToolDefinition, TOOL_NAMES};
