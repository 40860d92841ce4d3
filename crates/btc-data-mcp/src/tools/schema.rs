//! Advertised tool list and JSON input schemas.

use serde::Serialize;
use serde_json::{json, Value};

/// Every tool the dispatcher answers, in listing order.
pub const TOOL_NAMES: [&str; 12] = [
    "get_block",
    "get_transaction",
    "get_address",
    "get_utxos",
    "get_price_data",
    "get_historical_price",
    "get_network_metrics",
    "analyze_fee_landscape",
    "analyze_mempool_state",
    "analyze_utxo_distribution",
    "trace_coin_lineage",
    "detect_transaction_patterns",
];

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    fn new(name: &'static str, description: &'static str, input_schema: Value) -> Self {
        Self {
            name,
            description,
            input_schema,
        }
    }
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        // Chain data
        ToolDefinition::new(
            "get_block",
            "Get block information by hash or height",
            json!({
                "type": "object",
                "properties": {
                    "block_hash_or_height": { "type": "string", "description": "Block hash or height" },
                    "include_transactions": { "type": "boolean", "description": "Include transaction details", "default": false }
                },
                "required": ["block_hash_or_height"]
            }),
        ),
        ToolDefinition::new(
            "get_transaction",
            "Get transaction information by txid",
            json!({
                "type": "object",
                "properties": {
                    "txid": { "type": "string", "description": "Transaction ID" },
                    "include_analysis": { "type": "boolean", "description": "Include basic analysis", "default": false }
                },
                "required": ["txid"]
            }),
        ),
        ToolDefinition::new(
            "get_address",
            "Get address information including balance and transaction history",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Bitcoin address" },
                    "limit": { "type": "number", "description": "Limit number of transactions", "default": 25 },
                    "offset": { "type": "number", "description": "Offset for pagination", "default": 0 }
                },
                "required": ["address"]
            }),
        ),
        ToolDefinition::new(
            "get_utxos",
            "Get unspent transaction outputs for an address",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Bitcoin address" },
                    "min_value": { "type": "number", "description": "Minimum UTXO value in satoshis", "default": 0 }
                },
                "required": ["address"]
            }),
        ),
        // Market data
        ToolDefinition::new(
            "get_price_data",
            "Get current Bitcoin price and market data",
            json!({
                "type": "object",
                "properties": {
                    "timeframe": { "type": "string", "description": "Timeframe for historical data", "default": "current" }
                }
            }),
        ),
        ToolDefinition::new(
            "get_historical_price",
            "Get historical Bitcoin price data",
            json!({
                "type": "object",
                "properties": {
                    "days": { "type": "number", "description": "Number of days of historical data", "default": 30 }
                }
            }),
        ),
        // Network
        ToolDefinition::new(
            "get_network_metrics",
            "Get Bitcoin network health metrics",
            json!({
                "type": "object",
                "properties": {
                    "timeframe": { "type": "string", "description": "Timeframe for metrics", "default": "current" }
                }
            }),
        ),
        ToolDefinition::new(
            "analyze_fee_landscape",
            "Analyze current fee landscape and get recommendations",
            json!({
                "type": "object",
                "properties": {
                    "prediction_horizon": { "type": "string", "description": "Fee prediction horizon", "default": "current" }
                }
            }),
        ),
        ToolDefinition::new(
            "analyze_mempool_state",
            "Analyze current mempool state",
            json!({
                "type": "object",
                "properties": {
                    "include_predictions": { "type": "boolean", "description": "Include basic predictions", "default": false }
                }
            }),
        ),
        // Analysis
        ToolDefinition::new(
            "analyze_utxo_distribution",
            "Analyze UTXO distribution for multiple addresses",
            json!({
                "type": "object",
                "properties": {
                    "address_list": { "type": "array", "items": { "type": "string" }, "description": "List of Bitcoin addresses" }
                },
                "required": ["address_list"]
            }),
        ),
        ToolDefinition::new(
            "trace_coin_lineage",
            "Trace the lineage of coins from a transaction output",
            json!({
                "type": "object",
                "properties": {
                    "txid": { "type": "string", "description": "Transaction ID" },
                    "output_index": { "type": "number", "description": "Output index" },
                    "depth": { "type": "number", "description": "Trace depth", "default": 3 }
                },
                "required": ["txid", "output_index"]
            }),
        ),
        ToolDefinition::new(
            "detect_transaction_patterns",
            "Detect patterns in a transaction (basic analysis)",
            json!({
                "type": "object",
                "properties": {
                    "txid": { "type": "string", "description": "Transaction ID" }
                },
                "required": ["txid"]
            }),
        ),
    ]
}
