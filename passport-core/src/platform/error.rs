//! Error types for box store substrates.

use thiserror::Error;

/// Result type for substrate operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a [`BoxStore`](super::BoxStore) implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O operation failed.
    #[error("{context}: {source}")]
    Io {
        /// Context describing the operation.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The value exceeds the substrate's box size limit.
    #[error("box too large: {size} bytes exceeds the {limit} byte limit")]
    BoxTooLarge {
        /// Size of the rejected value.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The key cannot be addressed by this substrate.
    #[error("invalid box key: {0}")]
    InvalidKey(String),

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("box store lock poisoned: {0}")]
    Poisoned(String),
}

impl StorageError {
    /// Wraps an I/O error with context.
    pub(crate) fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
