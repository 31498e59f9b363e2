//! Request types for the raise simulation API.
//!
//! This module defines the JSON request body for `/simulate` and the query
//! parameters for `/simulate/csv`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{RatePercentages, RateTable, SimulationConfig};
use crate::error::EngineResult;
use crate::models::Employee;

/// Request body for the `/simulate` endpoint.
///
/// Every setting is optional; omitted settings come from the server's
/// default configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// The raise budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<Decimal>,
    /// The rate table in percentage points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<RatePercentages>,
    /// Whether to compute monthly figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_monthly: Option<bool>,
    /// The roster.
    pub employees: Vec<Employee>,
}

impl SimulationRequest {
    /// Applies the request's overrides to a base configuration.
    pub fn resolve_config(&self, base: &SimulationConfig) -> EngineResult<SimulationConfig> {
        let mut config = base.clone();
        if let Some(total_budget) = self.total_budget {
            config = config.with_total_budget(total_budget)?;
        }
        if let Some(rates) = &self.rates {
            config = config.with_rate_table(RateTable::from_percentages(rates)?);
        }
        if let Some(include_monthly) = self.include_monthly {
            config = config.with_include_monthly(include_monthly);
        }
        Ok(config)
    }
}

/// Query parameters for the `/simulate/csv` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvSimulationQuery {
    /// Overrides the default budget.
    #[serde(default)]
    pub budget: Option<Decimal>,
    /// Overrides whether monthly figures are computed.
    #[serde(default)]
    pub include_monthly: Option<bool>,
}

impl CsvSimulationQuery {
    /// Applies the query's overrides to a base configuration.
    pub fn resolve_config(&self, base: &SimulationConfig) -> EngineResult<SimulationConfig> {
        let mut config = base.clone();
        if let Some(budget) = self.budget {
            config = config.with_total_budget(budget)?;
        }
        if let Some(include_monthly) = self.include_monthly {
            config = config.with_include_monthly(include_monthly);
        }
        Ok(config)
    }
}
