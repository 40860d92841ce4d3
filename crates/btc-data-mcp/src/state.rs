use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use btc_data_provider::DataProviders;
use btc_transport::{Endpoints, HttpSource, UpstreamSource};

use crate::error::ToolError;
use crate::logging::{LogConfig, LogRecord, McpLogger};

/// Everything the dispatcher needs at construction time.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub endpoints: Endpoints,
    pub log: LogConfig,
}

impl DataConfig {
    /// Endpoints from `BTC_*_URL`, call logging from `BTC_DATA_CALL_LOG`.
    pub fn from_env() -> Self {
        Self {
            endpoints: Endpoints::from_env(),
            log: LogConfig::from_env(),
        }
    }
}

/// Invocation metadata a client may attach under `_meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolMeta {
    pub request_id: Option<String>,
    pub reason: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// A successful tool result plus any non-fatal warnings.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    pub result: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ToolOutput {
    pub fn new(result: Value) -> Self {
        Self {
            result,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Routes tool calls to their handlers.
///
/// Holds only shared handles (the providers and the call logger); nothing
/// is carried from one call to the next except what the provider caches
/// remember.
pub struct ToolDispatcher {
    providers: Arc<DataProviders>,
    logger: McpLogger,
}

impl ToolDispatcher {
    /// Dispatcher over live HTTP upstreams.
    pub fn new(config: DataConfig) -> Self {
        Self::with_source(config, Arc::new(HttpSource::from_env()))
    }

    pub fn from_env() -> Self {
        Self::new(DataConfig::from_env())
    }

    /// Dispatcher over an arbitrary upstream, e.g. a stub in tests.
    pub fn with_source(config: DataConfig, source: Arc<dyn UpstreamSource>) -> Self {
        let providers = Arc::new(DataProviders::new(source, &config.endpoints));
        Self::from_parts(providers, McpLogger::new(config.log))
    }

    pub fn from_parts(providers: Arc<DataProviders>, logger: McpLogger) -> Self {
        Self { providers, logger }
    }

    pub fn providers(&self) -> &DataProviders {
        &self.providers
    }

    pub fn logger(&self) -> &McpLogger {
        &self.logger
    }

    pub async fn dispatch(&self, tool: &str, input: Value) -> Result<ToolOutput, ToolError> {
        let (meta, clean_input) = extract_meta(&input);
        let request_id = meta
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let start = Instant::now();

        let result = self.dispatch_inner(tool, clean_input.clone()).await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(output) => {
                for warning in &output.warnings {
                    warn!(%request_id, tool, "{}", warning);
                }
                info!(%request_id, tool, duration_ms = duration_ms as u64, "tool call succeeded");
            }
            Err(err) => {
                warn!(%request_id, tool, kind = err.kind(), duration_ms = duration_ms as u64, "{}", err);
            }
        }

        let record = LogRecord {
            ts: Utc::now().to_rfc3339(),
            request_id,
            tool: tool.to_string(),
            input: clean_input,
            duration_ms,
            success: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
            error_code: result.as_ref().err().map(|e| e.rpc_code()),
            warnings: result
                .as_ref()
                .map(|o| o.warnings.clone())
                .unwrap_or_default(),
            llm_reason: meta.reason,
            tags: meta.tags,
        };
        if let Err(err) = self.logger.log_tool_call(&record) {
            warn!("failed to write call log: {}", err);
        }

        result
    }

    async fn dispatch_inner(&self, tool: &str, input: Value) -> Result<ToolOutput, ToolError> {
        match tool {
            "get_block" => self.get_block(input).await,
            "get_transaction" => self.get_transaction(input).await,
            "get_address" => self.get_address(input).await,
            "get_utxos" => self.get_utxos(input).await,
            "get_price_data" => self.get_price_data(input).await,
            "get_historical_price" => self.get_historical_price(input).await,
            "get_network_metrics" => self.get_network_metrics(input).await,
            "analyze_fee_landscape" => self.analyze_fee_landscape(input).await,
            "analyze_mempool_state" => self.analyze_mempool_state(input).await,
            "analyze_utxo_distribution" => self.analyze_utxo_distribution(input).await,
            "trace_coin_lineage" => self.trace_coin_lineage(input).await,
            "detect_transaction_patterns" => self.detect_transaction_patterns(input).await,
            _ => Err(ToolError::UnknownTool(tool.to_string())),
        }
    }
}

/// Split `_meta` off the arguments. Non-object input passes through as is.
fn extract_meta(input: &Value) -> (ToolMeta, Value) {
    let mut meta = ToolMeta::default();
    if let Value::Object(map) = input {
        if let Some(Value::Object(meta_map)) = map.get("_meta") {
            if let Some(Value::String(reason)) = meta_map.get("reason") {
                meta.reason = Some(reason.clone());
            }
            if let Some(Value::String(req)) = meta_map.get("request_id") {
                meta.request_id = Some(req.clone());
            }
            if let Some(Value::Array(tags)) = meta_map.get("tags") {
                let parsed: Vec<String> = tags
                    .iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect();
                if !parsed.is_empty() {
                    meta.tags = Some(parsed);
                }
            }
        }

        let mut cleaned = map.clone();
        cleaned.remove("_meta");
        return (meta, Value::Object(cleaned));
    }
    (meta, input.clone())
}
