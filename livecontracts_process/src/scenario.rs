//! Scenario descriptors.
//!
//! A scenario is owned by whoever loaded it. A process reads the action
//! table and the title, assigns the `id`, and otherwise embeds the
//! descriptor exactly as loaded: same keys, same key order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response key used when an action has no `default_response`.
pub const DEFAULT_RESPONSE_KEY: &str = "ok";

/// A loaded scenario definition, kept as its JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scenario(Map<String, Value>);

/// One action of a scenario, borrowed from the descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action<'a> {
    key: &'a str,
    body: &'a Value,
}

impl Scenario {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Resource id, assigned when the scenario is bound to a process.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Set the resource id. An existing `id` keeps its position; a new one
    /// is appended after the loaded fields.
    pub fn set_id(&mut self, id: String) {
        self.0.insert("id".to_string(), Value::String(id));
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Actions in descriptor order.
    pub fn actions(&self) -> impl Iterator<Item = Action<'_>> {
        self.0
            .get("actions")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|actions| actions.iter())
            .map(|(key, body)| Action { key, body })
    }

    pub fn action(&self, key: &str) -> Option<Action<'_>> {
        self.actions().find(|action| action.key == key)
    }
}

impl<'a> Action<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn default_response(&self) -> Option<&'a str> {
        self.body.get("default_response").and_then(Value::as_str)
    }

    /// The configured default response, or `"ok"`.
    pub fn response_key(&self) -> &'a str {
        self.default_response().unwrap_or(DEFAULT_RESPONSE_KEY)
    }
}
