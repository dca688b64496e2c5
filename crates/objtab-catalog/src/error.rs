//! Error types for catalog loading.

use thiserror::Error;

use crate::loader::LoadFailure;

/// Errors that can occur when decoding or loading an object catalog.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] objtab_common::Error),

    /// The decoded catalog chunk has the wrong length.
    #[error("malformed catalog: expected {expected} bytes, got {actual}")]
    MalformedCatalog { expected: usize, actual: usize },

    /// The entry list does not cover every slot of the configuration.
    #[error("catalog holds {actual} entries, configuration has {expected} slots")]
    EntryCount { expected: usize, actual: usize },

    /// One or more objects failed to resolve; nothing was loaded.
    #[error("failed to load {} required object(s)", failures.len())]
    LoadFailed { failures: Vec<LoadFailure> },

    /// Invalid group configuration.
    #[error("invalid group configuration: {0}")]
    InvalidConfig(String),

    /// JSON configuration error.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
