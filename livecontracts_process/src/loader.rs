//! Scenario loading.
//!
//! `ScenarioLoader` is the seam a process binds scenarios through. The
//! loader is passed to `Process::load_scenario` explicitly; there is no
//! process-wide instance.
//!
//! `FileScenarioLoader` reads scenario descriptors stored as JSON:
//!   - `<base_dir>/<path>` when `path` is a file
//!   - `<base_dir>/<path>/scenario.json` when `path` is a directory
//!
//! Loaded scenarios are cached by (name, path) when enabled. A cached
//! copy is returned as a clone, so the caller may assign its `id`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use tracing::debug;

use crate::error::LoadError;
use crate::scenario::Scenario;

/// File name looked up when a scenario path is a directory.
pub const SCENARIO_FILE_NAME: &str = "scenario.json";

/// Materializes a scenario from a name and a locator.
pub trait ScenarioLoader {
    fn load(&self, name: &str, path: &str) -> Result<Scenario, LoadError>;
}

/// Settings for [`FileScenarioLoader`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory scenario paths are resolved against.
    pub base_dir: PathBuf,
    /// Keep parsed scenarios in memory.
    pub cache: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            cache: true,
        }
    }
}

/// Loads JSON scenario descriptors from disk.
pub struct FileScenarioLoader {
    config: LoaderConfig,
    cache: Mutex<HashMap<(String, String), Scenario>>,
}

impl FileScenarioLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Loader rooted at `base_dir` with caching enabled.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(LoaderConfig {
            base_dir: base_dir.into(),
            ..LoaderConfig::default()
        })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Number of cached scenarios.
    pub fn cached(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Resolve a scenario locator to the JSON file to read.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let full = self.config.base_dir.join(path);
        if full.is_dir() {
            full.join(SCENARIO_FILE_NAME)
        } else {
            full
        }
    }

    fn read_scenario(file: &Path) -> Result<Scenario, LoadError> {
        if !file.exists() {
            return Err(LoadError::NotFound(file.to_path_buf()));
        }

        let content = fs::read_to_string(file).map_err(|source| LoadError::Io {
            path: file.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: file.to_path_buf(),
            source,
        })
    }
}

impl Default for FileScenarioLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl ScenarioLoader for FileScenarioLoader {
    fn load(&self, name: &str, path: &str) -> Result<Scenario, LoadError> {
        let key = (name.to_string(), path.to_string());

        if self.config.cache {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(scenario) = cache.get(&key) {
                debug!(name, path, "scenario cache hit");
                return Ok(scenario.clone());
            }
        }

        let file = self.resolve(path);
        let scenario = Self::read_scenario(&file)?;
        debug!(name, file = %file.display(), actions = scenario.actions().count(), "loaded scenario");

        if self.config.cache {
            self.cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key, scenario.clone());
        }

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_caches_from_current_dir() {
        let config = LoaderConfig::default();
        assert!(config.cache);
        assert_eq!(config.base_dir, PathBuf::from("."));
    }

    #[test]
    fn config_fields_are_optional() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{ "base_dir": "/srv/scenarios" }"#).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/srv/scenarios"));
        assert!(config.cache);
    }

    #[test]
    fn missing_file_is_not_found() {
        let loader = FileScenarioLoader::with_base_dir("/nonexistent-scenarios");
        assert_eq!(loader.config().base_dir, PathBuf::from("/nonexistent-scenarios"));
        assert!(loader.config().cache);
        match loader.load("basic", "basic.json") {
            Err(LoadError::NotFound(p)) => {
                assert_eq!(p, PathBuf::from("/nonexistent-scenarios/basic.json"))
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(loader.cached(), 0);
    }
}
