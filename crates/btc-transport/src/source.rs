//! The upstream seam.
//!
//! Providers only ever see `Arc<dyn UpstreamSource>`, so a test can swap the
//! real HTTP client for [`StubSource`](crate::stub::StubSource) and count
//! calls.

use std::time::Duration;

use async_trait::async_trait;
use btc_data_types::env_var_or;
use serde_json::Value;
use tracing::debug;

use crate::error::TransportError;

/// A JSON-over-GET data source.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    /// GET `url` and parse the body as JSON. Non-2xx, transport failures and
    /// unparsable bodies are all errors.
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// `ureq`-backed source. Each request runs on the blocking pool so the
/// calling task suspends instead of stalling the executor.
#[derive(Clone, Debug)]
pub struct HttpSource {
    agent: ureq::Agent,
}

impl HttpSource {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Timeouts from `BTC_HTTP_TIMEOUT_SECS` / `BTC_HTTP_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let timeout = env_var_or("BTC_HTTP_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS);
        let connect = env_var_or(
            "BTC_HTTP_CONNECT_TIMEOUT_SECS",
            Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        );
        Self::with_timeouts(Duration::from_secs(timeout), Duration::from_secs(connect))
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .user_agent(concat!("btc-data/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }

    fn get_blocking(agent: &ureq::Agent, url: &str) -> Result<Value, TransportError> {
        let response = agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => TransportError::Status {
                    url: url.to_string(),
                    status,
                },
                ureq::Error::Transport(t) => TransportError::Network {
                    url: url.to_string(),
                    message: t.to_string(),
                },
            })?;

        response
            .into_json::<Value>()
            .map_err(|e| TransportError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl UpstreamSource for HttpSource {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        debug!(url, "upstream GET");
        let agent = self.agent.clone();
        let owned_url = url.to_string();
        tokio::task::spawn_blocking(move || Self::get_blocking(&agent, &owned_url))
            .await
            .map_err(|e| TransportError::Network {
                url: url.to_string(),
                message: format!("request task aborted: {}", e),
            })?
    }
}
