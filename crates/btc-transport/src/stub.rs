//! In-memory upstream for tests.
//!
//! Responses are registered per exact URL. Every `get_json` is counted, hit
//! or miss, so cache behaviour can be asserted from call counts.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::TransportError;
use crate::source::UpstreamSource;

#[derive(Debug, Clone)]
enum StubResponse {
    Json(Value),
    Status(u16),
}

#[derive(Debug, Default)]
pub struct StubSource {
    routes: Mutex<HashMap<String, StubResponse>>,
    calls: Mutex<HashMap<String, usize>>,
    latency: Option<Duration>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`, to exercise concurrent fan-out.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Serve `body` for `url`, replacing any earlier route.
    pub fn respond(&self, url: impl Into<String>, body: Value) -> &Self {
        self.routes.lock().insert(url.into(), StubResponse::Json(body));
        self
    }

    /// Answer `url` with a non-2xx status.
    pub fn fail(&self, url: impl Into<String>, status: u16) -> &Self {
        self.routes.lock().insert(url.into(), StubResponse::Status(status));
        self
    }

    /// Number of requests made for `url`.
    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl UpstreamSource for StubSource {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        *self.calls.lock().entry(url.to_string()).or_insert(0) += 1;
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let route = self.routes.lock().get(url).cloned();
        match route {
            Some(StubResponse::Json(body)) => Ok(body),
            Some(StubResponse::Status(status)) => Err(TransportError::Status {
                url: url.to_string(),
                status,
            }),
            // Unregistered routes behave like an unknown resource.
            None => Err(TransportError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
