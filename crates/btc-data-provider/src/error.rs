use thiserror::Error;

use btc_transport::TransportError;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider failure. Timeouts, non-2xx statuses, unknown ids and bodies that
/// don't match the expected shape all collapse into [`ProviderError::Upstream`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{operation} failed: {cause}")]
    Upstream { operation: String, cause: String },
}

impl ProviderError {
    pub fn upstream(operation: &str, cause: impl std::fmt::Display) -> Self {
        ProviderError::Upstream {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    pub(crate) fn from_transport(operation: &str, err: TransportError) -> Self {
        Self::upstream(operation, err)
    }

    pub fn operation(&self) -> &str {
        match self {
            ProviderError::Upstream { operation, .. } => operation,
        }
    }

    pub fn cause(&self) -> &str {
        match self {
            ProviderError::Upstream { cause, .. } => cause,
        }
    }
}
