//! Fetch error types.

use roster_model::SourceKind;
use thiserror::Error;

/// Failure of a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Connection, TLS or body read failure.
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The upstream answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Success status with an empty body.
    #[error("{url} returned an empty body")]
    EmptyBody { url: String },

    /// Body present but not the expected document shape.
    #[error("malformed payload from {url}: {reason}")]
    Malformed { url: String, reason: String },

    /// The client could not be built or the request could not be formed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Whether another attempt against the same endpoint may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidRequest(_))
    }

    /// Short machine-friendly label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::EmptyBody { .. } => "empty_body",
            Self::Malformed { .. } => "malformed",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// Terminal failure for one (organization, source) pair after every endpoint
/// exhausted its retry budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source_kind} fetch for {organization} failed after {attempts} attempts: {last_error}")]
pub struct FetchFailure {
    pub organization: String,
    pub source_kind: SourceKind,
    /// Attempts across all endpoints.
    pub attempts: u32,
    pub last_error: FetchError,
}

pub type Result<T> = std::result::Result<T, FetchError>;
