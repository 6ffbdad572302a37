//! Welfare and hidden HR cost calculations.
//!
//! Neither is statutory. Welfare covers supplementary insurance and annual
//! occasional benefits spread over twelve months; hidden HR costs are passed
//! through as entered.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::common::{MONTHS_PER_YEAR, audit_value};

/// A secondary cost total with its audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryCostResult {
    /// The monthly total.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly welfare cost.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tce_engine::calculation::calculate_welfare_cost;
///
/// let result = calculate_welfare_cost(dec!(2000000), dec!(24000000), 1);
/// assert_eq!(result.total, dec!(4000000));
/// ```
pub fn calculate_welfare_cost(
    supplementary_insurance: Decimal,
    annual_occasional_benefits: Decimal,
    step_number: u32,
) -> SecondaryCostResult {
    let amortized = annual_occasional_benefits / MONTHS_PER_YEAR;
    let total = supplementary_insurance + amortized;

    SecondaryCostResult {
        total,
        audit_step: AuditStep {
            step_number,
            rule_id: "welfare_cost".to_string(),
            rule_name: "Welfare Cost".to_string(),
            legal_ref: "company policy".to_string(),
            input: serde_json::json!({
                "supplementary_insurance": audit_value(supplementary_insurance),
                "annual_occasional_benefits": audit_value(annual_occasional_benefits),
            }),
            output: serde_json::json!({
                "amortized_occasional_benefits": audit_value(amortized),
                "total_welfare_cost": audit_value(total),
            }),
            reasoning: format!(
                "{} + {} / 12 = {}",
                audit_value(supplementary_insurance),
                audit_value(annual_occasional_benefits),
                audit_value(total)
            ),
        },
    }
}

/// Sums the hidden HR costs without transformation.
pub fn calculate_hidden_hr_cost(
    recruitment_cost: Decimal,
    training_cost: Decimal,
    misc_cost: Decimal,
    step_number: u32,
) -> SecondaryCostResult {
    let total = recruitment_cost + training_cost + misc_cost;

    SecondaryCostResult {
        total,
        audit_step: AuditStep {
            step_number,
            rule_id: "hidden_hr_cost".to_string(),
            rule_name: "Hidden HR Cost".to_string(),
            legal_ref: "company policy".to_string(),
            input: serde_json::json!({
                "recruitment_cost": audit_value(recruitment_cost),
                "training_cost": audit_value(training_cost),
                "misc_cost": audit_value(misc_cost),
            }),
            output: serde_json::json!({
                "total_hidden_hr_cost": audit_value(total),
            }),
            reasoning: format!(
                "{} + {} + {} = {}",
                audit_value(recruitment_cost),
                audit_value(training_cost),
                audit_value(misc_cost),
                audit_value(total)
            ),
        },
    }
}
