//! Error types for objtab-common.

use thiserror::Error;

/// Common error type for objtab operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A fixed-size record could not be reinterpreted from its bytes.
    #[error("invalid {size}-byte record at offset {offset}")]
    InvalidRecord { offset: usize, size: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
