//! Gateway error model.

use thiserror::Error;

/// Failure of a single round-trip against the Product Store.
///
/// Non-2xx statuses are failures regardless of body content; the body is
/// carried along for diagnostics only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The store answered with a non-success status.
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not decode to the expected shape.
    #[error("malformed store payload: {0}")]
    Decode(String),
}
