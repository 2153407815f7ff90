//! Persistence error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Stored bytes are not valid preferences
//! - **`EncodeError`**: Preferences could not be serialized
//! - **`Unavailable`**: The store refuses writes (read-only or quota)
//!
//! None of these are fatal to a session: callers log them and continue with
//! in-memory state.

use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Stored value could not be decoded
    #[error("Error while decoding stored preferences: {0}")]
    DecodeError(#[source] serde_json::Error),

    /// Value could not be encoded
    #[error("Error while encoding preferences: {0}")]
    EncodeError(#[source] serde_json::Error),

    /// Storage is not accepting writes
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
