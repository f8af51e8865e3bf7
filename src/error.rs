use crate::request::ApiEndpoint;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Network error on {endpoint}: {reason}")]
    Network { endpoint: ApiEndpoint, reason: String },

    #[error("{endpoint} endpoint returned HTTP {status}")]
    Endpoint { endpoint: ApiEndpoint, status: u16 },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: ApiEndpoint, reason: String },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three ways a sync cycle can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Endpoint(u16),
    MalformedResponse,
}

impl DashboardError {
    /// Classify a cycle failure. Returns `None` for errors that never come
    /// out of a fetch (configuration, filter parsing, ...).
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            DashboardError::Network { .. } => Some(FailureKind::Network),
            DashboardError::Endpoint { status, .. } => Some(FailureKind::Endpoint(*status)),
            DashboardError::MalformedResponse { .. } => Some(FailureKind::MalformedResponse),
            _ => None,
        }
    }

    /// Only transport failures are worth another attempt; a bad status or a
    /// bad payload will come back the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DashboardError::Network { .. })
    }

    /// The endpoint a fetch error came from, if any.
    pub fn endpoint(&self) -> Option<ApiEndpoint> {
        match self {
            DashboardError::Network { endpoint, .. }
            | DashboardError::Endpoint { endpoint, .. }
            | DashboardError::MalformedResponse { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
