//! Error types for untoc library.

use thiserror::Error;

/// Result type alias for untoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline extraction.
///
/// Per-fragment anomalies (malformed metadata, duplicate text, a missing
/// embedding backend) are recovered locally and surfaced through
/// [`Diagnostics`](crate::model::Diagnostics) instead of this enum. Only
/// document-level failures are reported here.
#[derive(Error, Debug)]
pub enum Error {
    /// The extraction options are inconsistent (e.g. threshold outside [0, 1]).
    #[error("Invalid extraction options: {0}")]
    InvalidOptions(String),

    /// Error serializing the outline to JSON.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
