//! Error types for the Total Cost of Employment engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The calculation pipeline itself never fails; errors come from configuration
//! loading, upstream input validation, and the strict gross-up entry point.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Total Cost of Employment engine.
///
/// # Example
///
/// ```
/// use tce_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// A tax schedule violates the bracket table invariants.
    #[error("Invalid tax schedule '{version}': {message}")]
    InvalidTaxSchedule {
        /// The version label of the offending schedule.
        version: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// No tax schedule is effective on the requested date.
    #[error("No tax schedule effective on {date}")]
    TaxScheduleNotFound {
        /// The date for which a schedule was requested.
        date: NaiveDate,
    },

    /// A compensation input field failed validation.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The gross-up solver hit its iteration ceiling before reaching tolerance.
    #[error(
        "Gross-up did not converge for net {net_monthly}: gross {gross}, residual {residual} after {iterations} iterations"
    )]
    GrossUpNotConverged {
        /// The requested net monthly salary.
        net_monthly: Decimal,
        /// The last gross estimate.
        gross: Decimal,
        /// The remaining difference between the requested and achieved net.
        residual: Decimal,
        /// The number of refinement steps performed.
        iterations: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
