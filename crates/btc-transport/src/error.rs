use thiserror::Error;

/// Ways a single upstream GET can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The source answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or timeout failure before a status was received.
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The body was not valid JSON.
    #[error("malformed body from {url}: {message}")]
    Decode { url: String, message: String },
}

impl TransportError {
    pub fn url(&self) -> &str {
        match self {
            TransportError::Status { url, .. }
            | TransportError::Network { url, .. }
            | TransportError::Decode { url, .. } => url,
        }
    }
}
