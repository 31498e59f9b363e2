//! HTTP API module for the raise simulation engine.
//!
//! This module provides the REST API endpoints for running raise
//! simulations over JSON or CSV rosters.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CsvSimulationQuery, SimulationRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
