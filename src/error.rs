//! Error types for the raise simulation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that aborts a simulation run.

use thiserror::Error;

/// The main error type for the raise simulation engine.
///
/// A run either produces a complete result or one of these errors; there is
/// no partial output.
///
/// # Example
///
/// ```
/// use raise_engine::error::EngineError;
///
/// let error = EngineError::SchemaError {
///     missing: vec!["salary".to_string(), "rating".to_string()],
/// };
/// assert_eq!(error.to_string(), "Missing required column(s): salary, rating");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is outside its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The roster is missing one or more required columns.
    #[error("Missing required column(s): {}", missing.join(", "))]
    SchemaError {
        /// Names of every missing column, in requirement order.
        missing: Vec<String>,
    },

    /// The roster could not be read as tabular data.
    #[error("Failed to parse roster: {message}")]
    ParseError {
        /// The underlying cause.
        message: String,
    },

    /// A salary cell was empty, non-numeric or negative.
    #[error("Invalid salary '{value}' on line {line}: must be a non-negative number")]
    InvalidSalary {
        /// 1-based line number in the roster (the header is line 1).
        line: usize,
        /// The raw cell value.
        value: String,
    },

    /// An amount fell outside the representable decimal range.
    #[error("Calculation error on line {line}: {message}")]
    CalculationError {
        /// 1-based line number of the row being computed, or 0 for totals.
        line: usize,
        /// A description of the calculation error.
        message: String,
    },

    /// The enriched roster could not be written.
    #[error("Failed to write output: {message}")]
    OutputError {
        /// The underlying cause.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ParseError {
            message: error.to_string(),
        }
    }
}
