//! Core data models for the cost engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod compensation;
mod cost_breakdown;

pub use audit::{AuditStep, AuditTrace, AuditWarning, WarningSeverity};
pub use compensation::{
    CompensationInput, ContractMode, MAX_MONETARY_AMOUNT, MAX_MONTHLY_HOURS, validate_amount,
};
pub use cost_breakdown::{CalculationResult, CostBreakdown, GrossUpOutcome};
