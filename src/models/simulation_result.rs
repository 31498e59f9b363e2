//! Simulation result models for the raise simulation engine.
//!
//! This module contains the [`SimulationResult`] type and the structures it
//! is built from: enriched employee rows, monthly figures, the budget summary
//! and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Employee;

/// Monthly-equivalent salary figures for one employee.
///
/// Each monthly salary is the annual figure divided by 12 and rounded to a
/// whole currency unit; the increase is the difference of the rounded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFigures {
    /// Current monthly salary.
    pub monthly_salary_current: Decimal,
    /// Monthly salary after the raise.
    pub monthly_salary_new: Decimal,
    /// `monthly_salary_new - monthly_salary_current`.
    pub monthly_increase: Decimal,
}

/// An employee row with its computed raise.
///
/// # Example
///
/// ```
/// use raise_engine::models::{EnrichedEmployee, Employee};
/// use rust_decimal::Decimal;
///
/// let row = EnrichedEmployee {
///     line: 2,
///     employee: Employee {
///         name: Some("A".to_string()),
///         salary: Decimal::new(6_000_000, 0),
///         rating: "S".to_string(),
///         band_position: None,
///     },
///     raise_rate: Decimal::new(5, 2),
///     increase_amount: Decimal::new(300_000, 0),
///     new_salary: Decimal::new(6_300_000, 0),
///     monthly: None,
/// };
/// assert_eq!(row.new_salary, row.employee.salary + row.increase_amount);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEmployee {
    /// Line in the source roster (the header is line 1).
    pub line: usize,
    /// The original record.
    #[serde(flatten)]
    pub employee: Employee,
    /// The resolved raise rate as a fraction.
    pub raise_rate: Decimal,
    /// The raise in whole currency units.
    pub increase_amount: Decimal,
    /// `salary + increase_amount`.
    pub new_salary: Decimal,
    /// Monthly figures, when the run asked for them.
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<MonthlyFigures>,
}

/// Aggregate cost of a simulation against its budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// The raise budget supplied by the caller.
    pub total_budget: Decimal,
    /// Sum of every row's `increase_amount`.
    pub total_cost: Decimal,
    /// `total_budget - total_cost`. Negative when over budget.
    pub remaining_budget: Decimal,
}

impl BudgetSummary {
    /// Builds a summary, deriving the remaining budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use raise_engine::models::BudgetSummary;
    /// use rust_decimal::Decimal;
    ///
    /// let summary = BudgetSummary::new(Decimal::new(500_000, 0), Decimal::new(550_000, 0));
    /// assert_eq!(summary.remaining_budget, Decimal::new(-50_000, 0));
    /// assert!(summary.is_over_budget());
    /// ```
    pub fn new(total_budget: Decimal, total_cost: Decimal) -> Self {
        Self {
            total_budget,
            total_cost,
            remaining_budget: total_budget - total_cost,
        }
    }

    /// Returns true if the raises cost more than the budget.
    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget < Decimal::ZERO
    }
}

/// A warning generated during simulation.
///
/// Warnings flag rows that were computed under the zero-rate fallback; they
/// never stop a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
    /// The roster line the warning refers to.
    pub line: usize,
}

/// The audit trace for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Warnings raised while resolving rates.
    pub warnings: Vec<AuditWarning>,
    /// Time spent computing the run, in microseconds.
    pub duration_us: u64,
}

/// The complete output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Unique identifier for this run.
    pub simulation_id: Uuid,
    /// When the run completed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced this result.
    pub engine_version: String,
    /// Enriched rows, in roster order.
    pub employees: Vec<EnrichedEmployee>,
    /// Budget totals.
    pub summary: BudgetSummary,
    /// Warnings and timing.
    pub audit_trace: AuditTrace,
}
