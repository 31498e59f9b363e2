//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading simulation
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{SimulationConfig, SimulationFile};

/// Loads a simulation configuration from YAML.
///
/// # File Format
///
/// ```text
/// total_budget: 1000000
/// include_monthly: true
/// rates:
///   mode: matrix          # or `flat`
///   values:
///     S: { low: 8.0, mid: 7.0, high: 6.0 }
///     A: { low: 6.0, mid: 5.0, high: 4.0 }
/// ```
///
/// Rates are percentage points; they are divided by 100 on load.
///
/// # Example
///
/// ```no_run
/// use raise_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default.yaml").unwrap();
/// println!("Budget: {}", loader.config().total_budget());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: SimulationFile,
    config: SimulationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or an unknown rate mode (`ConfigParseError`)
    /// - The budget or any rate is negative (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use raise_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/flat.yaml")?;
    /// # Ok::<(), raise_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// `source` names the origin of the text in error messages.
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let file: SimulationFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        let config = SimulationConfig::try_from(file.clone())?;
        debug!(
            source,
            total_budget = %config.total_budget(),
            matrix = config.rate_table().is_matrix(),
            "Loaded simulation configuration"
        );

        Ok(Self { file, config })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the configuration as written, in percentage points.
    pub fn file(&self) -> &SimulationFile {
        &self.file
    }

    /// Consumes the loader, returning the validated configuration.
    pub fn into_config(self) -> SimulationConfig {
        self.config
    }
}
