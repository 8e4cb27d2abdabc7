/// LTO Event Chain: Event Definitions
///
/// Events are pure data. The body is an arbitrary JSON document;
/// the chain links it to its predecessor by hash.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content of an event before it is linked into a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBody {
    pub data: Value,
    /// Seconds since the Unix epoch, supplied by the caller.
    pub timestamp: u64,
}

impl EventBody {
    pub fn new(data: Value, timestamp: u64) -> Self {
        Self { data, timestamp }
    }
}

/// An event linked into a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub body: EventBody,
    /// Hash of the preceding event, or the chain's initial hash.
    pub previous: String,
    pub hash: String,
}

impl Event {
    /// Convert to a serde_json::Value in the chain's wire shape.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "body": self.body.data,
            "timestamp": self.body.timestamp,
            "previous": self.previous,
            "hash": self.hash,
        })
    }
}
