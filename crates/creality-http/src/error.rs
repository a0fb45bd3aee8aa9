//! Error types for the HTTP collaborators.

use thiserror::Error;

/// Errors from the printer's HTTP endpoints.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport-level failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("unexpected HTTP status {status}")]
    Status { status: reqwest::StatusCode },

    /// No probe endpoint answered during validation
    #[error("printer at {host}:{port} is unreachable")]
    Unreachable { host: String, port: u16 },
}
