//! Core data models for the raise simulation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod simulation_result;

pub use employee::{BandPosition, Employee, Rating};
pub use simulation_result::{
    AuditTrace, AuditWarning, BudgetSummary, EnrichedEmployee, MonthlyFigures, SimulationResult,
};
