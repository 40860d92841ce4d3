//! Environment variable parsing utilities.
//!
//! Every tunable in the workspace (endpoint URLs, HTTP timeouts, log
//! switches) is read through these helpers so an unset or unparsable value
//! silently falls back to its default.
//!
//! # Example
//!
//! ```
//! use btc_data_types::env_utils::{env_bool_or, env_var_or};
//!
//! let timeout: u64 = env_var_or("BTC_HTTP_TIMEOUT_SECS", 30);
//! let call_log = env_bool_or("BTC_DATA_CALL_LOG", true);
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Truthy when set to "1", "true", "yes" or "on" (case-insensitive);
/// `default` when unset.
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

/// Get a non-blank environment variable as a string, or `default`.
pub fn env_string_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
