//! Raise Simulation Engine
//!
//! This crate computes per-employee salary raises from a roster and a
//! rating (or rating × band position) rate table, and reports the total cost
//! against a fixed raise budget.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod roster;
