//! Process: one running instance of a Live Contracts scenario.
//!
//! A process is bound to an event chain for its whole life. It uses the
//! chain for two things only: minting its identifiers and reading the
//! chain head to decide whether its cached projection is still current.
//! The process never appends to the chain.
//!
//! Mutation (`load_scenario`, `set_projection`, `add_actor`) takes
//! `&mut self`; callers sharing a process across threads must serialize
//! writers themselves.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use tracing::{debug, info, warn};

use lto_event_chain::{Account, EventChain, ResourceChain};

use crate::error::ProcessError;
use crate::loader::ScenarioLoader;
use crate::projection::{ProjectionCache, ProjectionState};
use crate::response::Response;
use crate::scenario::Scenario;

/// Schema URI of a serialized process.
pub const PROCESS_SCHEMA: &str = "https://specs.livecontracts.io/v0.2.0/process/schema.json#";

/// A Live Contracts process bound to an event chain.
pub struct Process<C: ResourceChain + ?Sized = EventChain> {
    id: String,
    scenario: Option<Scenario>,
    actors: Vec<Account>,
    chain: Arc<C>,
    projection: ProjectionCache,
}

impl<C: ResourceChain + ?Sized> Process<C> {
    /// Create a process on `chain`.
    ///
    /// The id is minted by the chain from `reference`; `None` lets the
    /// chain pick a random seed.
    pub fn new(chain: Arc<C>, reference: Option<&str>) -> Self {
        let id = chain.create_resource_id(reference);
        debug!(process_id = %id, "created process");

        Self {
            id,
            scenario: None,
            actors: Vec::new(),
            chain,
            projection: ProjectionCache::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn schema(&self) -> &'static str {
        PROCESS_SCHEMA
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn actors(&self) -> &[Account] {
        &self.actors
    }

    /// Append an actor. Order is kept; duplicates are allowed.
    pub fn add_actor(&mut self, actor: Account) {
        self.actors.push(actor);
    }

    pub fn chain(&self) -> &Arc<C> {
        &self.chain
    }

    /// Bind a scenario. May succeed at most once.
    ///
    /// The process id is re-derived from `process:<name>` before the
    /// loader runs. If loading fails the id has already changed and the
    /// process should be discarded.
    pub fn load_scenario<L: ScenarioLoader + ?Sized>(
        &mut self,
        loader: &L,
        name: &str,
        path: &str,
    ) -> Result<(), ProcessError> {
        if self.scenario.is_some() {
            return Err(ProcessError::ScenarioAlreadyBound);
        }

        self.id = self.chain.create_resource_id(Some(&format!("process:{}", name)));

        let mut scenario = loader.load(name, path).map_err(|source| {
            warn!(name, path, error = %source, "scenario load failed");
            ProcessError::ScenarioLoadFailed {
                name: name.to_string(),
                path: path.to_string(),
                source,
            }
        })?;

        let scenario_id = self.chain.create_resource_id(Some(&format!("scenario:{}", path)));
        info!(
            process_id = %self.id,
            scenario_id = %scenario_id,
            name,
            path,
            "bound scenario"
        );
        scenario.set_id(scenario_id);
        self.scenario = Some(scenario);

        Ok(())
    }

    /// Build a response to `action_key`.
    ///
    /// Without an explicit `key` the bound scenario's `default_response`
    /// for the action is used, or `"ok"` when it has none.
    pub fn create_response(
        &self,
        action_key: &str,
        key: Option<&str>,
        data: Option<Value>,
    ) -> Result<Response, ProcessError> {
        let key = match key {
            Some(key) => key,
            None => self.default_response_key(action_key)?,
        };

        Ok(Response::new(
            &self.id,
            action_key,
            key,
            data.unwrap_or(Value::Null),
        ))
    }

    fn default_response_key(&self, action_key: &str) -> Result<&str, ProcessError> {
        let scenario = self
            .scenario
            .as_ref()
            .ok_or_else(|| ProcessError::ScenarioNotBound {
                action: action_key.to_string(),
            })?;

        let action = scenario
            .action(action_key)
            .ok_or_else(|| ProcessError::UnknownAction {
                action: action_key.to_string(),
            })?;

        Ok(action.response_key())
    }

    /// The cached projection, if no event has been added to the chain
    /// since it was set.
    pub fn projection(&self) -> Option<&Value> {
        let head = self.chain.latest_hash();
        match self.projection.state(&head) {
            ProjectionState::Valid => self.projection.value(),
            ProjectionState::Stale => {
                debug!(
                    process_id = %self.id,
                    source_hash = ?self.projection.source_hash(),
                    head = %head,
                    "projection is stale"
                );
                None
            }
            ProjectionState::Missing => None,
        }
    }

    pub fn projection_state(&self) -> ProjectionState {
        self.projection.state(&self.chain.latest_hash())
    }

    /// Cache `projection` as computed at the current chain head.
    pub fn set_projection(&mut self, projection: Value) {
        let head = self.chain.latest_hash();
        debug!(process_id = %self.id, head = %head, "stored projection");
        self.projection.store(projection, head);
    }
}

/// Serializes `$schema`, `id`, `scenario` and `actors`. The chain handle
/// and the projection are runtime state and are left out.
impl<C: ResourceChain + ?Sized> Serialize for Process<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Process", 4)?;
        s.serialize_field("$schema", PROCESS_SCHEMA)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("scenario", &self.scenario)?;
        s.serialize_field("actors", &self.actors)?;
        s.end()
    }
}
