//! Action response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema URI of a response envelope.
pub const RESPONSE_SCHEMA: &str = "https://specs.livecontracts.io/v0.2.0/response/schema.json#";

/// Reference to the action a response answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRef {
    pub key: String,
}

/// Response to an action, addressed to a process.
///
/// `data` is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Id of the process that produced the response.
    pub process: String,
    pub action: ActionRef,
    pub key: String,
    pub data: Value,
}

impl Response {
    pub fn new(process: &str, action_key: &str, key: &str, data: Value) -> Self {
        Self {
            schema: RESPONSE_SCHEMA.to_string(),
            process: process.to_string(),
            action: ActionRef {
                key: action_key.to_string(),
            },
            key: key.to_string(),
            data,
        }
    }
}
