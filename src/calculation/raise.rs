//! Per-employee raise calculation.
//!
//! All currency rounding goes through [`round_currency`], which rounds half
//! to even (banker's rounding). Using one policy for every row keeps the
//! aggregate free of rounding bias.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, Employee, EnrichedEmployee, MonthlyFigures};

use super::rate_resolver::{LookupOutcome, RateResolver};

/// Months in a year, for monthly-equivalent figures.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of calculating one employee's raise.
#[derive(Debug, Clone, PartialEq)]
pub struct RaiseCalculation {
    /// The enriched row.
    pub row: EnrichedEmployee,
    /// Set when the rate fell back to zero.
    pub warning: Option<AuditWarning>,
}

/// Rounds an amount to a whole currency unit, half to even.
///
/// # Examples
///
/// ```
/// use raise_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(25, 1)), Decimal::new(2, 0));
/// assert_eq!(round_currency(Decimal::new(35, 1)), Decimal::new(4, 0));
/// assert_eq!(round_currency(Decimal::new(26, 1)), Decimal::new(3, 0));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Computes monthly-equivalent salaries before and after a raise.
///
/// Both monthly salaries are rounded independently; the increase is their
/// difference, so it always reconciles with the displayed figures.
pub fn monthly_figures(salary: Decimal, new_salary: Decimal) -> MonthlyFigures {
    let monthly_salary_current = round_currency(salary / MONTHS_PER_YEAR);
    let monthly_salary_new = round_currency(new_salary / MONTHS_PER_YEAR);
    MonthlyFigures {
        monthly_salary_current,
        monthly_salary_new,
        monthly_increase: monthly_salary_new - monthly_salary_current,
    }
}

/// Calculates the raise for a single employee.
///
/// # Arguments
///
/// * `employee` - The roster record; its salary must already be validated
/// * `line` - The record's line in the roster, for warnings
/// * `resolver` - The rate resolver for this run
/// * `include_monthly` - Whether to compute monthly figures
///
/// Fails with `CalculationError` if the increase or the new salary does not
/// fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use raise_engine::calculation::{RateResolver, calculate_raise};
/// use raise_engine::config::RateTable;
/// use raise_engine::models::{Employee, Rating};
/// use rust_decimal::Decimal;
///
/// let resolver = RateResolver::new(RateTable::flat([(Rating::S, Decimal::new(5, 2))]));
/// let employee = Employee {
///     name: Some("A".to_string()),
///     salary: Decimal::new(6_000_000, 0),
///     rating: "S".to_string(),
///     band_position: None,
/// };
///
/// let result = calculate_raise(employee, 2, &resolver, false).unwrap();
/// assert_eq!(result.row.increase_amount, Decimal::new(300_000, 0));
/// assert_eq!(result.row.new_salary, Decimal::new(6_300_000, 0));
/// assert!(result.warning.is_none());
/// ```
pub fn calculate_raise(
    employee: Employee,
    line: usize,
    resolver: &RateResolver,
    include_monthly: bool,
) -> EngineResult<RaiseCalculation> {
    let lookup = resolver.lookup(employee.rating(), employee.band_position());

    let increase_amount = employee
        .salary
        .checked_mul(lookup.rate)
        .map(round_currency)
        .ok_or_else(|| overflow(line, "increase amount"))?;
    let new_salary = employee
        .salary
        .checked_add(increase_amount)
        .ok_or_else(|| overflow(line, "new salary"))?;
    let monthly = include_monthly.then(|| monthly_figures(employee.salary, new_salary));

    let warning = fallback_warning(lookup.outcome, &employee, line);

    Ok(RaiseCalculation {
        row: EnrichedEmployee {
            line,
            employee,
            raise_rate: lookup.rate,
            increase_amount,
            new_salary,
            monthly,
        },
        warning,
    })
}

fn overflow(line: usize, what: &str) -> EngineError {
    EngineError::CalculationError {
        line,
        message: format!("{} exceeds the supported decimal range", what),
    }
}

fn fallback_warning(
    outcome: LookupOutcome,
    employee: &Employee,
    line: usize,
) -> Option<AuditWarning> {
    let band = employee.band_position.as_deref().unwrap_or("");
    let (code, message) = match outcome {
        LookupOutcome::Matched => return None,
        LookupOutcome::UnknownRating => (
            "UNRECOGNIZED_RATING",
            format!("Rating '{}' is not recognised; raise rate set to 0", employee.rating),
        ),
        LookupOutcome::RatingNotConfigured => (
            "RATING_NOT_CONFIGURED",
            format!("No rate configured for rating '{}'; raise rate set to 0", employee.rating),
        ),
        LookupOutcome::UnknownBandPosition => (
            "UNRECOGNIZED_BAND_POSITION",
            format!("Band position '{}' is not recognised; raise rate set to 0", band),
        ),
        LookupOutcome::BandNotConfigured => (
            "BAND_NOT_CONFIGURED",
            format!(
                "No rate configured for rating '{}' at band position '{}'; raise rate set to 0",
                employee.rating, band
            ),
        ),
    };

    Some(AuditWarning {
        code: code.to_string(),
        message,
        severity: "low".to_string(),
        line,
    })
}
