//! Error types for tagplan core.

use thiserror::Error;

/// Result type for tagplan core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while interpreting core domain values.
#[derive(Debug, Error)]
pub enum Error {
    /// An identifier could not be read as an ARN.
    #[error("Invalid ARN {arn:?}: {reason}")]
    InvalidArn {
        /// The identifier that failed to parse.
        arn: String,
        /// Why it was rejected.
        reason: String,
    },
}
