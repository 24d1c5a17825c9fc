//! Tenant API errors

use responsum_logging::{ErrorInfo, Fields};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response; `body` is the parsed JSON error body, or the raw
    /// text when it is not JSON
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: String,
        status: u16,
        body: serde_json::Value,
    },

    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<&ApiError> for ErrorInfo {
    fn from(error: &ApiError) -> Self {
        let info = ErrorInfo::from_error(error);
        match error {
            ApiError::Status {
                endpoint,
                status,
                body,
            } => info.with_context(
                Fields::new()
                    .with("endpoint", endpoint.as_str())
                    .with("status", *status)
                    .with("body", body.clone()),
            ),
            ApiError::Transport { endpoint, .. } | ApiError::Decode { endpoint, .. } => {
                info.with_context(Fields::new().with("endpoint", endpoint.as_str()))
            }
            ApiError::Client(_) => info,
        }
    }
}
