//! Request types for the cost engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/gross-up` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AllowanceDefaults;
use crate::models::{CompensationInput, ContractMode};

/// Request body for the `/calculate` endpoint.
///
/// Only `contract_mode` and `base_salary` are required. Omitted housing,
/// grocery and children allowances and the overtime divisor take the
/// configured statutory defaults; every other omitted amount is zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// How `base_salary` is interpreted.
    pub contract_mode: ContractMode,
    /// Gross base pay, or guaranteed net pay for net contracts.
    pub base_salary: Decimal,
    /// Date whose tax schedule applies; today (UTC) when omitted.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,

    /// Insurable job absorption allowance.
    #[serde(default)]
    pub job_absorption: Option<Decimal>,
    /// Insurable responsibility allowance.
    #[serde(default)]
    pub responsibility_allowance: Option<Decimal>,
    /// Insurable job superlative allowance.
    #[serde(default)]
    pub job_superlative: Option<Decimal>,

    /// Housing allowance; defaults to the statutory floor.
    #[serde(default)]
    pub housing_allowance: Option<Decimal>,
    /// Grocery allowance; defaults to the statutory floor.
    #[serde(default)]
    pub grocery_allowance: Option<Decimal>,
    /// Children allowance; defaults to the configured amount.
    #[serde(default)]
    pub children_allowance: Option<Decimal>,
    /// Other non-insurable fixed benefits.
    #[serde(default)]
    pub other_benefits: Option<Decimal>,

    /// Overtime divisor; defaults to the configured standard month.
    #[serde(default)]
    pub overtime_base_hours: Option<Decimal>,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
    /// Monthly performance pay.
    #[serde(default)]
    pub monthly_performance: Option<Decimal>,
    /// Monthly bonus.
    #[serde(default)]
    pub monthly_bonus: Option<Decimal>,

    /// Monthly supplementary insurance cost.
    #[serde(default)]
    pub supplementary_insurance: Option<Decimal>,
    /// Annual occasional benefits.
    #[serde(default)]
    pub annual_occasional_benefits: Option<Decimal>,

    /// Monthly recruitment cost.
    #[serde(default)]
    pub recruitment_cost: Option<Decimal>,
    /// Monthly training cost.
    #[serde(default)]
    pub training_cost: Option<Decimal>,
    /// Other monthly HR overhead.
    #[serde(default)]
    pub misc_cost: Option<Decimal>,
}

impl CalculationRequest {
    /// Builds the engine input, filling omitted fields from `defaults`.
    pub fn into_input(self, defaults: &AllowanceDefaults) -> CompensationInput {
        let zero = |value: Option<Decimal>| value.unwrap_or(Decimal::ZERO);

        CompensationInput {
            contract_mode: self.contract_mode,
            base_salary: self.base_salary,
            job_absorption: zero(self.job_absorption),
            responsibility_allowance: zero(self.responsibility_allowance),
            job_superlative: zero(self.job_superlative),
            housing_allowance: self.housing_allowance.unwrap_or(defaults.housing_allowance),
            grocery_allowance: self.grocery_allowance.unwrap_or(defaults.grocery_allowance),
            children_allowance: self
                .children_allowance
                .unwrap_or(defaults.children_allowance),
            other_benefits: zero(self.other_benefits),
            overtime_base_hours: self
                .overtime_base_hours
                .unwrap_or(defaults.overtime_base_hours),
            overtime_hours: zero(self.overtime_hours),
            monthly_performance: zero(self.monthly_performance),
            monthly_bonus: zero(self.monthly_bonus),
            supplementary_insurance: zero(self.supplementary_insurance),
            annual_occasional_benefits: zero(self.annual_occasional_benefits),
            recruitment_cost: zero(self.recruitment_cost),
            training_cost: zero(self.training_cost),
            misc_cost: zero(self.misc_cost),
        }
    }
}

/// Request body for the `/gross-up` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossUpRequest {
    /// The guaranteed net monthly salary.
    pub net_monthly: Decimal,
    /// Date whose tax schedule applies; today (UTC) when omitted.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}
