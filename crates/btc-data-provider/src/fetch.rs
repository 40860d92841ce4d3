//! Shared fetch path: GET, decode into the expected shape, optionally cache.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use btc_transport::UpstreamSource;

use crate::cache::TtlCache;
use crate::error::{ProviderError, ProviderResult};

/// Decode a raw body, reporting shape mismatches as upstream failures.
pub(crate) fn decode<T: DeserializeOwned>(operation: &str, raw: Value) -> ProviderResult<T> {
    serde_json::from_value(raw)
        .map_err(|e| ProviderError::upstream(operation, format!("malformed body: {}", e)))
}

/// Uncached fetch.
pub(crate) async fn fetch<T: DeserializeOwned>(
    source: &dyn UpstreamSource,
    operation: &str,
    url: &str,
) -> ProviderResult<T> {
    let raw = source
        .get_json(url)
        .await
        .map_err(|e| ProviderError::from_transport(operation, e))?;
    decode(operation, raw)
}

/// Cache-checked fetch. Only bodies that decode are stored, so a malformed
/// response is never served from cache.
pub(crate) async fn fetch_cached<T: DeserializeOwned>(
    source: &dyn UpstreamSource,
    cache: &TtlCache<Value>,
    operation: &str,
    key: String,
    url: &str,
    ttl: Duration,
) -> ProviderResult<T> {
    if let Some(raw) = cache.get(&key) {
        debug!(operation, key = %key, "cache hit");
        return decode(operation, raw);
    }
    debug!(operation, key = %key, "cache miss");

    let raw = source
        .get_json(url)
        .await
        .map_err(|e| ProviderError::from_transport(operation, e))?;
    let value = decode(operation, raw.clone())?;
    cache.set_with_ttl(key, raw, ttl);
    Ok(value)
}
