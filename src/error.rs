use crate::score::ScoreValidation;

/// All errors that can occur when talking to the refdesk API.
#[derive(thiserror::Error, Debug)]
pub enum RefdeskError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The bearer token was missing, expired, or rejected (HTTP 401).
    #[error("unauthorized request to {url}")]
    Unauthorized { url: String },

    /// Server returned a non-success HTTP status code other than 401.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to decode the JSON response body.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    /// The client has no active session (after `logout`).
    #[error("no active session")]
    NotAuthenticated,

    /// A score sheet failed validation and was not submitted.
    #[error(transparent)]
    Validation(#[from] ScoreValidation),
}

impl RefdeskError {
    /// Whether this error is an authorization rejection.
    ///
    /// The live-scoring session branches on this to decide between a
    /// terminal freeze and a transient, retryable failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RefdeskError::Unauthorized { .. })
    }
}

pub type Result<T> = std::result::Result<T, RefdeskError>;
