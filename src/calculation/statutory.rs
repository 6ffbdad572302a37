//! Employer statutory cost calculations.
//!
//! This module covers the social insurance contribution, the income tax an
//! employer absorbs under a net contract, and the monthly accruals for
//! severance, Eidi and unused leave.
//!
//! ## Rates
//!
//! | Term                | Gross contract | Net contract |
//! |---------------------|----------------|--------------|
//! | Insurance           | 23%            | 30% (23% + employee 7%) |
//! | Absorbed income tax | 0              | full monthly tax |
//! | Severance           | base / 12      | base / 12    |
//! | Eidi                | base x 2 / 12  | base x 2 / 12 |
//! | Leave redemption    | base / 30 x 2.5 | base / 30 x 2.5 |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, ContractMode};

use super::common::{MONTHS_PER_YEAR, audit_value};
use super::tax_brackets::INCOME_TAX_LEGAL_REF;

/// Employee share of social insurance.
pub const EMPLOYEE_INSURANCE_RATE: Decimal = dec!(0.07);

/// Employer share of social insurance.
pub const EMPLOYER_INSURANCE_RATE: Decimal = dec!(0.23);

/// Insurance borne by the employer under a net contract (both shares).
pub const NET_CONTRACT_INSURANCE_RATE: Decimal = dec!(0.30);

/// Months of base salary owed as severance per year of service.
pub const SEVERANCE_MONTHS_PER_YEAR: Decimal = dec!(1);

/// Months of base salary paid as Eidi each year.
pub const EIDI_MONTHS_PER_YEAR: Decimal = dec!(2);

/// Days used to derive a daily rate from a monthly base.
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// Unused leave days accrued per month.
pub const LEAVE_REDEMPTION_DAYS_PER_MONTH: Decimal = dec!(2.5);

const INSURANCE_LEGAL_REF: &str = "Social Security Act art. 28";
const SEVERANCE_LEGAL_REF: &str = "Labour Law art. 24";
const EIDI_LEGAL_REF: &str = "Eidi Payment Act";
const LEAVE_LEGAL_REF: &str = "Labour Law art. 64";

/// Returns the insurance rate the employer bears for a contract mode.
pub fn employer_insurance_rate(mode: ContractMode) -> Decimal {
    match mode {
        ContractMode::Gross => EMPLOYER_INSURANCE_RATE,
        ContractMode::Net => NET_CONTRACT_INSURANCE_RATE,
    }
}

/// The employer's insurance contribution with its audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceResult {
    /// The rate applied.
    pub rate: Decimal,
    /// The employer's contribution.
    pub contribution: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employer's social insurance contribution.
pub fn calculate_employer_insurance(
    insurable_gross: Decimal,
    mode: ContractMode,
    step_number: u32,
) -> InsuranceResult {
    let rate = employer_insurance_rate(mode);
    let contribution = insurable_gross * rate;

    let reasoning = match mode {
        ContractMode::Gross => format!(
            "Gross contract: employer share {} x {} = {}",
            audit_value(insurable_gross),
            audit_value(rate),
            audit_value(contribution)
        ),
        ContractMode::Net => format!(
            "Net contract: employer bears both shares {} x {} = {}",
            audit_value(insurable_gross),
            audit_value(rate),
            audit_value(contribution)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "employer_insurance".to_string(),
        rule_name: "Employer Social Insurance".to_string(),
        legal_ref: INSURANCE_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "insurable_gross": audit_value(insurable_gross),
            "contract_mode": mode.as_str(),
        }),
        output: serde_json::json!({
            "rate": audit_value(rate),
            "contribution": audit_value(contribution),
        }),
        reasoning,
    };

    InsuranceResult {
        rate,
        contribution,
        audit_step,
    }
}

/// The income tax the employer absorbs, with its audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBurdenResult {
    /// The absorbed tax (0 for gross contracts).
    pub burden: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the income tax the employer absorbs.
///
/// Under a net contract the employer pays the employee's tax so the stated
/// net is guaranteed; under a gross contract the employee bears it.
pub fn calculate_employer_tax_burden(
    monthly_income_tax: Decimal,
    mode: ContractMode,
    step_number: u32,
) -> TaxBurdenResult {
    let (burden, reasoning) = match mode {
        ContractMode::Net => (
            monthly_income_tax,
            format!(
                "Net contract: employer absorbs the monthly income tax of {}",
                audit_value(monthly_income_tax)
            ),
        ),
        ContractMode::Gross => (
            Decimal::ZERO,
            format!(
                "Gross contract: income tax of {} is withheld from the employee",
                audit_value(monthly_income_tax)
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "employer_tax_burden".to_string(),
        rule_name: "Employer Income Tax Burden".to_string(),
        legal_ref: INCOME_TAX_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "monthly_income_tax": audit_value(monthly_income_tax),
            "contract_mode": mode.as_str(),
        }),
        output: serde_json::json!({
            "burden": audit_value(burden),
        }),
        reasoning,
    };

    TaxBurdenResult { burden, audit_step }
}

/// The monthly statutory accruals, with one audit step each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualResult {
    /// Severance accrued this month.
    pub severance: Decimal,
    /// Eidi accrued this month.
    pub eidi: Decimal,
    /// Unused leave accrued this month.
    pub leave_redemption: Decimal,
    /// Audit steps for severance, Eidi and leave, in that order.
    pub audit_steps: Vec<AuditStep>,
}

impl AccrualResult {
    /// Sum of the three accruals.
    pub fn total(&self) -> Decimal {
        self.severance + self.eidi + self.leave_redemption
    }
}

/// Calculates the severance, Eidi and leave accruals on the base salary.
///
/// All three use the effective gross base only, never allowances.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tce_engine::calculation::calculate_accruals;
///
/// let result = calculate_accruals(dec!(60000000), 1);
/// assert_eq!(result.severance, dec!(5000000));
/// assert_eq!(result.eidi, dec!(10000000));
/// assert_eq!(result.leave_redemption, dec!(5000000));
/// ```
pub fn calculate_accruals(effective_gross_base: Decimal, step_number_start: u32) -> AccrualResult {
    let severance = effective_gross_base * SEVERANCE_MONTHS_PER_YEAR / MONTHS_PER_YEAR;
    let eidi = effective_gross_base * EIDI_MONTHS_PER_YEAR / MONTHS_PER_YEAR;
    let daily_rate = effective_gross_base / DAYS_PER_MONTH;
    let leave_redemption = daily_rate * LEAVE_REDEMPTION_DAYS_PER_MONTH;

    let base = audit_value(effective_gross_base);
    let audit_steps = vec![
        AuditStep {
            step_number: step_number_start,
            rule_id: "severance_accrual".to_string(),
            rule_name: "Severance Accrual".to_string(),
            legal_ref: SEVERANCE_LEGAL_REF.to_string(),
            input: serde_json::json!({ "effective_gross_base": base }),
            output: serde_json::json!({ "severance_accrual": audit_value(severance) }),
            reasoning: format!(
                "One month's base per year of service: {} / 12 = {}",
                base,
                audit_value(severance)
            ),
        },
        AuditStep {
            step_number: step_number_start + 1,
            rule_id: "eidi_accrual".to_string(),
            rule_name: "Eidi Accrual".to_string(),
            legal_ref: EIDI_LEGAL_REF.to_string(),
            input: serde_json::json!({ "effective_gross_base": base }),
            output: serde_json::json!({ "eidi_accrual": audit_value(eidi) }),
            reasoning: format!(
                "Two months' base per year: {} x 2 / 12 = {}",
                base,
                audit_value(eidi)
            ),
        },
        AuditStep {
            step_number: step_number_start + 2,
            rule_id: "leave_redemption_accrual".to_string(),
            rule_name: "Leave Redemption Accrual".to_string(),
            legal_ref: LEAVE_LEGAL_REF.to_string(),
            input: serde_json::json!({ "effective_gross_base": base }),
            output: serde_json::json!({
                "daily_rate": audit_value(daily_rate),
                "leave_redemption_accrual": audit_value(leave_redemption),
            }),
            reasoning: format!(
                "{} / 30 = {} per day x 2.5 days = {}",
                base,
                audit_value(daily_rate),
                audit_value(leave_redemption)
            ),
        },
    ];

    AccrualResult {
        severance,
        eidi,
        leave_redemption,
        audit_steps,
    }
}
