//! Calculation logic for the raise simulation engine.
//!
//! This module contains rate lookup, per-employee raise computation, roster
//! schema validation, and the whole-roster simulation that aggregates cost
//! against the budget.

mod raise;
mod rate_resolver;
mod schema;
mod simulation;

pub use raise::{MONTHS_PER_YEAR, RaiseCalculation, calculate_raise, monthly_figures, round_currency};
pub use rate_resolver::{LookupOutcome, RateLookup, RateResolver};
pub use schema::{
    BAND_POSITION_COLUMN, NAME_COLUMN, RATING_COLUMN, RosterSchema, SALARY_COLUMN,
    required_columns, validate_schema,
};
pub use simulation::{run_simulation, simulate, summarize};
