//! Configuration loading functionality.
//!
//! [`ConfigLoader`] reads the engine configuration from a YAML file;
//! [`SharedConfig`] wraps a loaded configuration in a process-wide handle
//! that can be refreshed without a restart.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Loads the engine configuration from a YAML file.
///
/// # Example
///
/// ```no_run
/// use timecard_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// assert_eq!(loader.config().tolerance_minutes, 10);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns `ConfigNotFound` when the file is missing and
    /// `ConfigParseError` when its contents are not valid configuration
    /// YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// A process-wide configuration handle.
///
/// Holds the active [`EngineConfig`] behind a read-write lock so that the
/// engine can pick up configuration changes between computations without a
/// restart. Cloning the handle shares the same underlying configuration.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    inner: Arc<RwLock<EngineConfig>>,
    path: Option<PathBuf>,
}

impl SharedConfig {
    /// Wraps an already-built configuration. `refresh` is a no-op for
    /// handles created this way.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path: None,
        }
    }

    /// Loads the configuration from a YAML file and remembers the path for
    /// later refreshes.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let loader = ConfigLoader::load(&path)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(loader.config().clone())),
            path: Some(path),
        })
    }

    /// Returns a snapshot of the current configuration.
    pub fn get(&self) -> EngineConfig {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Re-reads the configuration file, replacing the active configuration
    /// atomically. Handles without a backing file keep their configuration.
    pub fn refresh(&self) -> EngineResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let loader = ConfigLoader::load(path)?;
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = loader.config().clone();
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
