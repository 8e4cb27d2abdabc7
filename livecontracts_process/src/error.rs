//! Error types for process operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a scenario loader.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Scenario source not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Process errors.
///
/// `ScenarioAlreadyBound`, `ScenarioNotBound` and `UnknownAction` are
/// caller contract violations. `ScenarioLoadFailed` comes from the loader.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Scenario already set")]
    ScenarioAlreadyBound,

    #[error("No scenario bound; cannot resolve default response for action '{action}'")]
    ScenarioNotBound { action: String },

    #[error("Scenario has no action '{action}'")]
    UnknownAction { action: String },

    #[error("Failed to load scenario '{name}' from '{path}'")]
    ScenarioLoadFailed {
        name: String,
        path: String,
        #[source]
        source: LoadError,
    },
}
