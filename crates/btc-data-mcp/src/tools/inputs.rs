//! Input structs for MCP tool handlers.
//!
//! Defaults mirror the advertised JSON schemas. Numeric arguments accept
//! integral floats and numeric strings as well as plain integers, since MCP
//! clients are not consistent about number encoding.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use btc_data_provider::price::DEFAULT_HISTORY_DAYS;

use crate::error::ToolError;

/// Deserialize a tool's arguments, mapping any serde failure to
/// [`ToolError::MalformedArgument`]. A missing argument object counts as `{}`.
pub fn extract_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, ToolError> {
    let input = match input {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(input).map_err(|e| ToolError::malformed(tool, e.to_string()))
}

/// Reject identifiers that would change the shape of an upstream URL.
///
/// Block hashes, heights, txids and addresses are all plain ASCII
/// alphanumerics, so anything else (slashes, `?`, whitespace) is refused
/// before it reaches a path segment.
pub fn path_segment<'a>(tool: &str, field: &str, value: &'a str) -> Result<&'a str, ToolError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolError::malformed(tool, format!("`{}` must not be empty", field)));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ToolError::malformed(
            tool,
            format!("`{}` must be alphanumeric, got {:?}", field, value),
        ));
    }
    Ok(value)
}

#[derive(Debug, Deserialize)]
pub struct GetBlockInput {
    #[serde(deserialize_with = "string_or_number")]
    pub block_hash_or_height: String,
    #[serde(default)]
    pub include_transactions: bool,
}

#[derive(Debug, Deserialize)]
pub struct GetTransactionInput {
    pub txid: String,
    #[serde(default)]
    pub include_analysis: bool,
}

#[derive(Debug, Deserialize)]
pub struct GetAddressInput {
    pub address: String,
    #[serde(default = "default_limit", deserialize_with = "lenient_u64")]
    pub limit: u64,
    /// Accepted for schema compatibility; recent transactions are always
    /// taken from the newest page.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
pub struct GetUtxosInput {
    pub address: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub min_value: u64,
}

/// Shared by the tools whose only argument is an informational timeframe.
#[derive(Debug, Deserialize)]
pub struct TimeframeInput {
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoricalPriceInput {
    #[serde(default = "default_days", deserialize_with = "lenient_u64")]
    pub days: u64,
}

#[derive(Debug, Deserialize)]
pub struct FeeLandscapeInput {
    #[serde(default = "default_timeframe")]
    pub prediction_horizon: String,
}

#[derive(Debug, Deserialize)]
pub struct MempoolStateInput {
    #[serde(default)]
    pub include_predictions: bool,
}

#[derive(Debug, Deserialize)]
pub struct UtxoDistributionInput {
    pub address_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TraceLineageInput {
    pub txid: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub output_index: u64,
    #[serde(default = "default_depth", deserialize_with = "lenient_u64")]
    pub depth: u64,
}

#[derive(Debug, Deserialize)]
pub struct DetectPatternsInput {
    pub txid: String,
}

fn default_limit() -> u64 {
    25
}

fn default_days() -> u64 {
    u64::from(DEFAULT_HISTORY_DAYS)
}

fn default_depth() -> u64 {
    3
}

fn default_timeframe() -> String {
    "current".to_string()
}

/// Heights are often sent as numbers even though the field is a string.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) if n.is_u64() => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a block hash or height, got {}",
            other
        ))),
    }
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(v);
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
                _ => Err(de::Error::custom(format!(
                    "expected a non-negative integer, got {}",
                    n
                ))),
            }
        }
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| {
            de::Error::custom(format!("expected a non-negative integer, got {:?}", s))
        }),
        other => Err(de::Error::custom(format!(
            "expected a non-negative integer, got {}",
            other
        ))),
    }
}
