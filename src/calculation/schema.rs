//! Roster schema validation and record extraction.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::roster::{Roster, RosterRow};

use super::rate_resolver::RateResolver;

/// Column holding the annual salary.
pub const SALARY_COLUMN: &str = "salary";
/// Column holding the rating label.
pub const RATING_COLUMN: &str = "rating";
/// Column holding the band position label.
pub const BAND_POSITION_COLUMN: &str = "band_position";
/// Optional display name column.
pub const NAME_COLUMN: &str = "name";

/// Positions of the columns the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSchema {
    salary: usize,
    rating: usize,
    band_position: Option<usize>,
    name: Option<usize>,
}

/// Returns the columns a roster must have for this resolver.
pub fn required_columns(resolver: &RateResolver) -> Vec<&'static str> {
    let mut columns = vec![SALARY_COLUMN, RATING_COLUMN];
    if resolver.requires_band_position() {
        columns.push(BAND_POSITION_COLUMN);
    }
    columns
}

/// Checks that the roster has every required column.
///
/// All missing columns are reported together in a single `SchemaError`.
///
/// # Examples
///
/// ```
/// use raise_engine::calculation::{RateResolver, validate_schema};
/// use raise_engine::config::RateTable;
/// use raise_engine::error::EngineError;
/// use raise_engine::roster::Roster;
///
/// let resolver = RateResolver::new(RateTable::default_matrix());
/// let roster = Roster::new(["name", "salary"], vec![]);
///
/// match validate_schema(&roster, &resolver) {
///     Err(EngineError::SchemaError { missing }) => {
///         assert_eq!(missing, vec!["rating", "band_position"]);
///     }
///     _ => panic!("expected a schema error"),
/// }
/// ```
pub fn validate_schema(roster: &Roster, resolver: &RateResolver) -> EngineResult<RosterSchema> {
    let missing: Vec<String> = required_columns(resolver)
        .into_iter()
        .filter(|column| !roster.has_column(column))
        .map(str::to_string)
        .collect();

    match (
        roster.column_index(SALARY_COLUMN),
        roster.column_index(RATING_COLUMN),
    ) {
        (Some(salary), Some(rating)) if missing.is_empty() => Ok(RosterSchema {
            salary,
            rating,
            band_position: roster.column_index(BAND_POSITION_COLUMN),
            name: roster.column_index(NAME_COLUMN),
        }),
        _ => Err(EngineError::SchemaError { missing }),
    }
}

impl RosterSchema {
    /// Builds a typed employee from one roster row.
    ///
    /// Fails with `InvalidSalary` if the salary cell is empty, not a number,
    /// or negative. Blank name and band position cells become `None`.
    pub fn employee(&self, row: &RosterRow) -> EngineResult<Employee> {
        let raw_salary = row.get(self.salary).unwrap_or_default();
        let salary = parse_salary(raw_salary).ok_or_else(|| EngineError::InvalidSalary {
            line: row.line,
            value: raw_salary.to_string(),
        })?;

        Ok(Employee {
            name: optional_cell(row, self.name),
            salary,
            rating: row.get(self.rating).unwrap_or_default().to_string(),
            band_position: optional_cell(row, self.band_position),
        })
    }
}

fn parse_salary(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()?;
    (value >= Decimal::ZERO).then_some(value)
}

fn optional_cell(row: &RosterRow, index: Option<usize>) -> Option<String> {
    index
        .and_then(|idx| row.get(idx))
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
