//! Configuration types for raise simulation.
//!
//! The YAML file is written in percentage points ([`RatePercentages`]); the
//! engine works with fractions ([`RateTable`]). [`SimulationConfig`] is the
//! validated, immutable bundle handed to each run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, EngineResult};
use crate::models::{BandPosition, Rating};

/// Raise rates in percentage points, as entered by a user.
///
/// ```yaml
/// mode: matrix
/// values:
///   S: { low: 8.0, mid: 7.0, high: 6.0 }
///   A: { low: 6.0, mid: 5.0, high: 4.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "values", rename_all = "snake_case")]
pub enum RatePercentages {
    /// One percentage per rating.
    Flat(BTreeMap<Rating, Decimal>),
    /// One percentage per rating and band position.
    Matrix(BTreeMap<Rating, BTreeMap<BandPosition, Decimal>>),
}

/// Simulation configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationFile {
    /// The raise budget, in currency units.
    pub total_budget: Decimal,
    /// Whether to compute monthly-equivalent figures.
    #[serde(default = "default_include_monthly")]
    pub include_monthly: bool,
    /// The rate table in percentage points.
    pub rates: RatePercentages,
}

fn default_include_monthly() -> bool {
    true
}

/// A raise rate table in fractions (0.05 = 5%).
///
/// Keys missing from the table are not an error; the resolver treats them
/// as a zero rate.
#[derive(Debug, Clone, PartialEq)]
pub enum RateTable {
    /// Rating → rate.
    Flat(HashMap<Rating, Decimal>),
    /// Rating → band position → rate.
    Matrix(HashMap<Rating, HashMap<BandPosition, Decimal>>),
}

impl RateTable {
    /// Builds a flat table from `(rating, fraction)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use raise_engine::config::RateTable;
    /// use raise_engine::models::Rating;
    /// use rust_decimal::Decimal;
    ///
    /// let table = RateTable::flat([(Rating::S, Decimal::new(5, 2))]);
    /// assert!(!table.is_matrix());
    /// ```
    pub fn flat(rates: impl IntoIterator<Item = (Rating, Decimal)>) -> Self {
        RateTable::Flat(rates.into_iter().collect())
    }

    /// Builds a matrix table from `(rating, band position, fraction)` triples.
    pub fn matrix(rates: impl IntoIterator<Item = (Rating, BandPosition, Decimal)>) -> Self {
        let mut table: HashMap<Rating, HashMap<BandPosition, Decimal>> = HashMap::new();
        for (rating, band_position, rate) in rates {
            table.entry(rating).or_default().insert(band_position, rate);
        }
        RateTable::Matrix(table)
    }

    /// Converts percentage points into fractions.
    ///
    /// Returns `InvalidConfig` if any rate is negative. Rates above 100% are
    /// accepted as-is.
    pub fn from_percentages(percentages: &RatePercentages) -> EngineResult<Self> {
        match percentages {
            RatePercentages::Flat(values) => {
                let mut table = HashMap::with_capacity(values.len());
                for (rating, percent) in values {
                    let field = format!("rates.{}", rating.as_str());
                    table.insert(*rating, to_fraction(&field, *percent)?);
                }
                Ok(RateTable::Flat(table))
            }
            RatePercentages::Matrix(values) => {
                let mut table = HashMap::with_capacity(values.len());
                for (rating, bands) in values {
                    let mut row = HashMap::with_capacity(bands.len());
                    for (band_position, percent) in bands {
                        let field =
                            format!("rates.{}.{}", rating.as_str(), band_position.as_str());
                        row.insert(*band_position, to_fraction(&field, *percent)?);
                    }
                    table.insert(*rating, row);
                }
                Ok(RateTable::Matrix(table))
            }
        }
    }

    /// The default matrix: S 8/7/6, A 6/5/4, B 4/3/2, C 1/0/0, D 0/0/0 percent
    /// for low/mid/high band positions.
    pub fn default_matrix() -> Self {
        let grid: [(Rating, [i64; 3]); 5] = [
            (Rating::S, [8, 7, 6]),
            (Rating::A, [6, 5, 4]),
            (Rating::B, [4, 3, 2]),
            (Rating::C, [1, 0, 0]),
            (Rating::D, [0, 0, 0]),
        ];
        RateTable::matrix(grid.into_iter().flat_map(|(rating, percents)| {
            BandPosition::ALL
                .into_iter()
                .zip(percents)
                .map(move |(band_position, percent)| {
                    (rating, band_position, Decimal::new(percent, 2))
                })
        }))
    }

    /// Returns true if lookups need a band position.
    pub fn is_matrix(&self) -> bool {
        matches!(self, RateTable::Matrix(_))
    }
}

fn to_fraction(field: &str, percent: Decimal) -> EngineResult<Decimal> {
    if percent < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("rate must not be negative, got {}%", percent),
        });
    }
    Ok(percent / Decimal::ONE_HUNDRED)
}

/// Everything one simulation run needs besides the roster.
///
/// Built once per run and never mutated while the run is in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    total_budget: Decimal,
    rate_table: RateTable,
    include_monthly: bool,
}

impl SimulationConfig {
    /// Creates a configuration, rejecting a negative budget.
    pub fn new(
        total_budget: Decimal,
        rate_table: RateTable,
        include_monthly: bool,
    ) -> EngineResult<Self> {
        validate_budget(total_budget)?;
        Ok(Self {
            total_budget,
            rate_table,
            include_monthly,
        })
    }

    /// Returns a copy with a different budget.
    pub fn with_total_budget(&self, total_budget: Decimal) -> EngineResult<Self> {
        validate_budget(total_budget)?;
        Ok(Self {
            total_budget,
            ..self.clone()
        })
    }

    /// Returns a copy with a different rate table.
    pub fn with_rate_table(&self, rate_table: RateTable) -> Self {
        Self {
            rate_table,
            ..self.clone()
        }
    }

    /// Returns a copy with monthly figures switched on or off.
    pub fn with_include_monthly(&self, include_monthly: bool) -> Self {
        Self {
            include_monthly,
            ..self.clone()
        }
    }

    /// The raise budget.
    pub fn total_budget(&self) -> Decimal {
        self.total_budget
    }

    /// The rate table in fractions.
    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }

    /// Whether monthly figures are computed.
    pub fn include_monthly(&self) -> bool {
        self.include_monthly
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_budget: Decimal::new(1_000_000, 0),
            rate_table: RateTable::default_matrix(),
            include_monthly: true,
        }
    }
}

impl TryFrom<SimulationFile> for SimulationConfig {
    type Error = EngineError;

    fn try_from(file: SimulationFile) -> EngineResult<Self> {
        let rate_table = RateTable::from_percentages(&file.rates)?;
        SimulationConfig::new(file.total_budget, rate_table, file.include_monthly)
    }
}

fn validate_budget(total_budget: Decimal) -> EngineResult<()> {
    if total_budget < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: "total_budget".to_string(),
            message: format!("must not be negative, got {}", total_budget),
        });
    }
    Ok(())
}
