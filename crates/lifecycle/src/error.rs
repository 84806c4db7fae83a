//! Error types for label store operations.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by a [`LabelClient`](crate::client::LabelClient).
#[derive(Debug, Error)]
pub enum LabelClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by GitHub
    #[error("Rate limit exceeded, reset in {reset_in:?}")]
    RateLimited { reset_in: Duration },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}
