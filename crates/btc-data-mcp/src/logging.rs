//! Call logging.
//!
//! Two sinks: `tracing` events on stderr for operators, and one JSONL record
//! per tool call under `<BTC_DATA_HOME>/logs/mcp/` for offline inspection.
//! Stdout is reserved for the MCP stdio transport, so nothing here writes to it.

use anyhow::Result;
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

use btc_data_types::env_bool_or;

use crate::paths::default_paths;

/// Set to `0` to disable the JSONL call log.
pub const CALL_LOG_ENV: &str = "BTC_DATA_CALL_LOG";
/// Tracing filter directive, checked before `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "BTC_DATA_LOG";

/// Install the stderr `tracing` subscriber.
///
/// Filter precedence is `BTC_DATA_LOG`, then `RUST_LOG`, then `info`.
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub rotation_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_paths().logs_dir(),
            rotation_mb: 50,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env_bool_or(CALL_LOG_ENV, true),
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct McpLogger {
    config: LogConfig,
    file: Mutex<Option<File>>,
    file_path: Mutex<Option<PathBuf>>,
    /// Files opened so far; keeps names unique within one clock tick.
    files_opened: AtomicU64,
}

impl McpLogger {
    pub fn new(config: LogConfig) -> Self {
        Self {
            config,
            file: Mutex::new(None),
            file_path: Mutex::new(None),
            files_opened: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Path of the file currently being appended to, if one is open.
    pub fn current_file(&self) -> Option<PathBuf> {
        self.file_path.lock().clone()
    }

    pub fn log_tool_call(&self, record: &LogRecord) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        fs::create_dir_all(&self.config.path)?;
        self.rotate_if_needed();

        let mut file_guard = self.file.lock();
        if file_guard.is_none() {
            let file_path = self.new_log_path();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file_path)?;
            *file_guard = Some(file);
            *self.file_path.lock() = Some(file_path);
        }

        if let Some(file) = file_guard.as_mut() {
            let line = serde_json::to_string(record)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    fn rotate_if_needed(&self) {
        let current = self.file_path.lock().clone();
        if let Some(path) = current {
            if let Ok(metadata) = fs::metadata(&path) {
                let size_mb = metadata.len() / (1024 * 1024);
                if size_mb >= self.config.rotation_mb {
                    *self.file.lock() = None;
                    *self.file_path.lock() = None;
                }
            }
        }
    }

    fn new_log_path(&self) -> PathBuf {
        let ts = Utc::now().format("%Y%m%d-%H%M%S-%3f");
        let seq = self.files_opened.fetch_add(1, Ordering::Relaxed);
        self.config.path.join(format!("mcp-{}-{:04}.jsonl", ts, seq))
    }
}

/// One line of the call log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub ts: String,
    pub request_id: String,
    pub tool: String,
    pub input: Value,
    pub duration_ms: u128,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub llm_reason: Option<String>,
    pub tags: Option<Vec<String>>,
}
