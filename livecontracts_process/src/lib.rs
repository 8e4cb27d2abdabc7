#![forbid(unsafe_code)]

//! Live Contracts: Process
//!
//! A process ties a scenario definition to a position in an event chain
//! and builds response envelopes for its actions.
//!
//! The process does not advance itself or validate events. Scenario
//! loading and the chain are collaborators reached through
//! [`ScenarioLoader`] and [`lto_event_chain::ResourceChain`].

pub mod error;
pub mod loader;
pub mod process;
pub mod projection;
pub mod response;
pub mod scenario;

pub use error::{LoadError, ProcessError};
pub use loader::{FileScenarioLoader, LoaderConfig, ScenarioLoader};
pub use process::{Process, PROCESS_SCHEMA};
pub use projection::{ProjectionCache, ProjectionState};
pub use response::{ActionRef, Response, RESPONSE_SCHEMA};
pub use scenario::{Action, Scenario, DEFAULT_RESPONSE_KEY};
