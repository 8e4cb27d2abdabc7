//! Projection cache: a single value stamped with the chain head it was
//! computed at.
//!
//! The stamp is compared against the current chain head on every read.
//! There is no explicit invalidation: once the chain moves on, the cached
//! value is stale and is withheld, but kept until the next write.

use serde_json::Value;

/// Validity of the cached projection relative to a chain head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionState {
    /// Nothing has been stored.
    Missing,
    /// A value is stored but the chain has moved since.
    Stale,
    /// The stored value matches the chain head.
    Valid,
}

/// Single-slot projection cache.
#[derive(Debug, Clone, Default)]
pub struct ProjectionCache {
    value: Option<Value>,
    source_hash: Option<String>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` as computed at chain head `source_hash`.
    pub fn store(&mut self, value: Value, source_hash: String) {
        self.value = Some(value);
        self.source_hash = Some(source_hash);
    }

    /// The cached value if it was stored at `current_hash`.
    pub fn get(&self, current_hash: &str) -> Option<&Value> {
        match self.state(current_hash) {
            ProjectionState::Valid => self.value.as_ref(),
            ProjectionState::Missing | ProjectionState::Stale => None,
        }
    }

    pub fn state(&self, current_hash: &str) -> ProjectionState {
        match (&self.value, &self.source_hash) {
            (Some(_), Some(hash)) if hash == current_hash => ProjectionState::Valid,
            (Some(_), _) => ProjectionState::Stale,
            (None, _) => ProjectionState::Missing,
        }
    }

    /// The stored value, whether or not it is still current.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Chain head the cached value was computed at.
    pub fn source_hash(&self) -> Option<&str> {
        self.source_hash.as_deref()
    }
}
