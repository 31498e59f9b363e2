//! Whole-roster raise simulation.
//!
//! A run validates the roster schema once, converts every row into a typed
//! [`Employee`], computes each raise independently, then reduces the enriched
//! rows into a [`BudgetSummary`]. Any failure aborts the run before a result
//! is produced.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, BudgetSummary, Employee, EnrichedEmployee, SimulationResult,
};
use crate::roster::Roster;

use super::raise::calculate_raise;
use super::rate_resolver::RateResolver;
use super::schema::validate_schema;

/// Runs a raise simulation over a roster.
///
/// # Arguments
///
/// * `roster` - The uploaded roster; never modified
/// * `resolver` - Rate lookup for this run
/// * `total_budget` - The raise budget; must not be negative
/// * `include_monthly` - Whether to compute monthly-equivalent figures
///
/// # Returns
///
/// The enriched rows in roster order plus the budget summary, or an error if:
/// - A required column is missing (`SchemaError`)
/// - Any salary is empty, non-numeric or negative (`InvalidSalary`)
/// - The budget is negative (`InvalidConfig`)
/// - An increase or the total cost overflows `Decimal` (`CalculationError`)
///
/// Going over budget is not an error; it shows up as a negative
/// `remaining_budget`.
///
/// # Examples
///
/// ```
/// use raise_engine::calculation::{RateResolver, simulate};
/// use raise_engine::config::RateTable;
/// use raise_engine::models::Rating;
/// use raise_engine::roster::read_csv;
/// use rust_decimal::Decimal;
///
/// let roster = read_csv("name,salary,rating\nA,6000000,S\n".as_bytes()).unwrap();
/// let resolver = RateResolver::new(RateTable::flat([(Rating::S, Decimal::new(5, 2))]));
///
/// let result = simulate(&roster, &resolver, Decimal::new(1_000_000, 0), false).unwrap();
/// assert_eq!(result.summary.total_cost, Decimal::new(300_000, 0));
/// assert_eq!(result.summary.remaining_budget, Decimal::new(700_000, 0));
/// ```
pub fn simulate(
    roster: &Roster,
    resolver: &RateResolver,
    total_budget: Decimal,
    include_monthly: bool,
) -> EngineResult<SimulationResult> {
    let start_time = Instant::now();

    if total_budget < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: "total_budget".to_string(),
            message: format!("must not be negative, got {}", total_budget),
        });
    }

    let schema = validate_schema(roster, resolver)?;

    // Convert every row before computing anything so a bad salary late in the
    // roster still yields no output.
    let employees: Vec<(usize, Employee)> = roster
        .rows()
        .iter()
        .map(|row| schema.employee(row).map(|employee| (row.line, employee)))
        .collect::<EngineResult<_>>()?;

    let mut rows = Vec::with_capacity(employees.len());
    let mut warnings = Vec::new();
    for (line, employee) in employees {
        let calculation = calculate_raise(employee, line, resolver, include_monthly)?;
        rows.push(calculation.row);
        warnings.extend(calculation.warning);
    }

    let summary = summarize(&rows, total_budget)?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    let simulation_id = Uuid::new_v4();
    debug!(
        simulation_id = %simulation_id,
        employees = rows.len(),
        warnings = warnings.len(),
        total_cost = %summary.total_cost,
        remaining_budget = %summary.remaining_budget,
        duration_us,
        "Simulation completed"
    );

    Ok(SimulationResult {
        simulation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employees: rows,
        summary,
        audit_trace: AuditTrace {
            warnings,
            duration_us,
        },
    })
}

/// Runs a simulation with everything taken from a [`SimulationConfig`].
pub fn run_simulation(roster: &Roster, config: &SimulationConfig) -> EngineResult<SimulationResult> {
    let resolver = RateResolver::new(config.rate_table().clone());
    simulate(
        roster,
        &resolver,
        config.total_budget(),
        config.include_monthly(),
    )
}

/// Totals the increases of enriched rows against a budget.
///
/// The sum is exact decimal arithmetic, so row order does not matter. Fails
/// with `CalculationError` if the total does not fit in a `Decimal`.
pub fn summarize(rows: &[EnrichedEmployee], total_budget: Decimal) -> EngineResult<BudgetSummary> {
    let total_cost = rows
        .iter()
        .try_fold(Decimal::ZERO, |total, row| total.checked_add(row.increase_amount))
        .ok_or_else(|| EngineError::CalculationError {
            line: 0,
            message: "total cost exceeds the supported decimal range".to_string(),
        })?;
    Ok(BudgetSummary::new(total_budget, total_cost))
}
