//! Application state for the raise simulation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::SimulationConfig;

/// Shared application state.
///
/// Holds the default simulation configuration. Requests may override parts
/// of it, but every run works on its own copy.
#[derive(Clone)]
pub struct AppState {
    /// The default configuration, loaded at startup.
    config: Arc<SimulationConfig>,
}

impl AppState {
    /// Creates a new application state with the given default configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the default configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
