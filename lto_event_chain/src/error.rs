//! Error types for the event chain.

use thiserror::Error;

/// Event chain failures.
#[derive(Error, Debug)]
pub enum ChainError {
    /// An event does not point at the hash of the event before it.
    #[error("Broken link at event {index}: expected previous {expected}, got {actual}")]
    BrokenLink {
        index: usize,
        expected: String,
        actual: String,
    },

    /// An event's stored hash does not match its content.
    #[error("Hash mismatch at event {index}: stored {stored}, computed {computed}")]
    HashMismatch {
        index: usize,
        stored: String,
        computed: String,
    },

    /// Canonical JSON serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
