//! Configuration loading and management for the raise simulation engine.
//!
//! This module loads the simulation budget and raise rate table from YAML and
//! turns them into an immutable [`SimulationConfig`].
//!
//! # Example
//!
//! ```no_run
//! use raise_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default.yaml").unwrap();
//! println!("Budget: {}", loader.config().total_budget());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{RatePercentages, RateTable, SimulationConfig, SimulationFile};
