//! Total cost of employment composition.
//!
//! [`compose`] turns a [`CompensationInput`] into a [`CostBreakdown`]. Each
//! stage consumes only values computed before it:
//!
//! 1. effective gross base (grossed up from net for net contracts)
//! 2. insurable gross and total gross salary
//! 3. overtime and variable pay
//! 4. income tax on the insurable gross
//! 5. statutory employer costs
//! 6. welfare and hidden HR costs
//! 7. totals, take-home pay and the cost multiplier

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::TaxSchedule;
use crate::models::{
    AuditStep, AuditWarning, CompensationInput, ContractMode, CostBreakdown, WarningSeverity,
};

use super::common::audit_value;
use super::gross_up::{MAX_GROSS_UP_ITERATIONS, calculate_gross_up};
use super::overtime::calculate_overtime_pay;
use super::statutory::{
    EMPLOYEE_INSURANCE_RATE, calculate_accruals, calculate_employer_insurance,
    calculate_employer_tax_burden,
};
use super::tax_brackets::calculate_income_tax;
use super::welfare::{calculate_hidden_hr_cost, calculate_welfare_cost};

/// Warning code for a net-to-gross solve that hit its iteration ceiling.
pub const GROSS_UP_NOT_CONVERGED: &str = "GROSS_UP_NOT_CONVERGED";

/// Warning code for insurable allowances discarded under a net contract.
pub const NET_MODE_ALLOWANCES_SUPPRESSED: &str = "NET_MODE_ALLOWANCES_SUPPRESSED";

/// Warning code for a zero take-home pay, where the multiplier falls back to 0.
pub const ZERO_NET_SALARY: &str = "ZERO_NET_SALARY";

/// The composed breakdown together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostComposition {
    /// Every derived cost term.
    pub breakdown: CostBreakdown,
    /// One step per applied rule, in calculation order.
    pub audit_steps: Vec<AuditStep>,
    /// Conditions the caller should review.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the full monthly cost breakdown for one employee.
///
/// This never fails. Zero divisors fall back to zero, and a gross-up that
/// does not converge is reported through [`CostBreakdown::gross_up`] and a
/// `GROSS_UP_NOT_CONVERGED` warning.
///
/// Under a net contract the insurable allowances (`job_absorption`,
/// `responsibility_allowance`, `job_superlative`) are discarded, not merely
/// defaulted; a `NET_MODE_ALLOWANCES_SUPPRESSED` warning is raised when any
/// of them was non-zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tce_engine::calculation::compose;
/// use tce_engine::config::TaxSchedule;
/// use tce_engine::models::{CompensationInput, ContractMode};
///
/// let input = CompensationInput {
///     base_salary: dec!(60000000),
///     ..CompensationInput::new(ContractMode::Gross)
/// };
/// let composition = compose(&input, &TaxSchedule::default());
///
/// let breakdown = composition.breakdown;
/// assert_eq!(breakdown.insurable_gross, dec!(60000000));
/// assert_eq!(breakdown.employer_insurance_contribution, dec!(13800000));
/// assert_eq!(breakdown.total_statutory_cost, dec!(33800000));
/// ```
pub fn compose(input: &CompensationInput, schedule: &TaxSchedule) -> CostComposition {
    compose_with_limit(input, schedule, MAX_GROSS_UP_ITERATIONS)
}

/// Like [`compose`] with an explicit gross-up iteration ceiling.
pub fn compose_with_limit(
    input: &CompensationInput,
    schedule: &TaxSchedule,
    max_gross_up_iterations: u32,
) -> CostComposition {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let mode = input.contract_mode;

    // Effective base and insurable allowances
    let (effective_gross_base, insurable_allowances, gross_up) = if input.is_net() {
        let result = calculate_gross_up(
            input.base_salary,
            schedule,
            max_gross_up_iterations,
            step_number,
        );
        audit_steps.push(result.audit_step);
        step_number += 1;

        if !result.outcome.converged {
            warnings.push(AuditWarning::new(
                GROSS_UP_NOT_CONVERGED,
                format!(
                    "Gross-up of net {} stopped after {} iterations with residual {}; \
                     gross-derived figures are imprecise",
                    audit_value(input.base_salary),
                    result.outcome.iterations,
                    audit_value(result.outcome.residual)
                ),
                WarningSeverity::High,
            ));
        }

        let discarded = input.insurable_allowances();
        if discarded != Decimal::ZERO {
            warn!(
                discarded = %discarded,
                "Insurable allowances discarded for net contract"
            );
            warnings.push(AuditWarning::new(
                NET_MODE_ALLOWANCES_SUPPRESSED,
                format!(
                    "Net contracts ignore job absorption, responsibility and superlative \
                     allowances; {} was discarded",
                    audit_value(discarded)
                ),
                WarningSeverity::Medium,
            ));
        }

        (result.outcome.gross, Decimal::ZERO, Some(result.outcome))
    } else {
        (input.base_salary, input.insurable_allowances(), None)
    };

    let insurable_gross = effective_gross_base + insurable_allowances;
    let fixed_allowances = input.fixed_allowances();
    let total_gross_salary = insurable_gross + fixed_allowances;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        legal_ref: "Labour Law art. 36".to_string(),
        input: serde_json::json!({
            "contract_mode": mode.as_str(),
            "effective_gross_base": audit_value(effective_gross_base),
            "insurable_allowances": audit_value(insurable_allowances),
            "fixed_allowances": audit_value(fixed_allowances),
        }),
        output: serde_json::json!({
            "insurable_gross": audit_value(insurable_gross),
            "total_gross_salary": audit_value(total_gross_salary),
        }),
        reasoning: format!(
            "Insurable {} + {} = {}; with non-insurable allowances {} the gross is {}",
            audit_value(effective_gross_base),
            audit_value(insurable_allowances),
            audit_value(insurable_gross),
            audit_value(fixed_allowances),
            audit_value(total_gross_salary)
        ),
    });
    step_number += 1;

    // Variable pay
    let overtime = calculate_overtime_pay(
        insurable_gross,
        input.overtime_base_hours,
        input.overtime_hours,
        step_number,
    );
    audit_steps.push(overtime.audit_step);
    step_number += 1;

    let overtime_pay = overtime.overtime_pay;
    let variable_pay_total = overtime_pay + input.monthly_performance + input.monthly_bonus;

    // Tax is assessed on the insurable base; fixed allowances are exempt
    let income_tax = calculate_income_tax(insurable_gross, schedule, step_number);
    audit_steps.push(income_tax.audit_step);
    step_number += 1;
    let monthly_income_tax = income_tax.monthly_tax;

    // Statutory employer costs
    let insurance = calculate_employer_insurance(insurable_gross, mode, step_number);
    audit_steps.push(insurance.audit_step);
    step_number += 1;

    let tax_burden = calculate_employer_tax_burden(monthly_income_tax, mode, step_number);
    audit_steps.push(tax_burden.audit_step);
    step_number += 1;

    let accruals = calculate_accruals(effective_gross_base, step_number);
    let total_accruals = accruals.total();
    step_number += accruals.audit_steps.len() as u32;
    audit_steps.extend(accruals.audit_steps);

    let total_statutory_cost = insurance.contribution + tax_burden.burden + total_accruals;

    // Welfare and hidden costs
    let welfare = calculate_welfare_cost(
        input.supplementary_insurance,
        input.annual_occasional_benefits,
        step_number,
    );
    audit_steps.push(welfare.audit_step);
    step_number += 1;

    let hidden = calculate_hidden_hr_cost(
        input.recruitment_cost,
        input.training_cost,
        input.misc_cost,
        step_number,
    );
    audit_steps.push(hidden.audit_step);
    step_number += 1;

    // Totals
    let total_monthly_cost = total_gross_salary
        + variable_pay_total
        + total_statutory_cost
        + welfare.total
        + hidden.total;

    let net_salary = match mode {
        ContractMode::Net => input.base_salary,
        ContractMode::Gross => {
            total_gross_salary - insurable_gross * EMPLOYEE_INSURANCE_RATE - monthly_income_tax
        }
    };

    let cost_multiplier = if net_salary > Decimal::ZERO {
        total_monthly_cost / net_salary
    } else {
        warnings.push(AuditWarning::new(
            ZERO_NET_SALARY,
            "Net salary is not positive; cost multiplier reported as 0",
            WarningSeverity::Low,
        ));
        Decimal::ZERO
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "total_cost".to_string(),
        rule_name: "Total Monthly Cost".to_string(),
        legal_ref: "n/a".to_string(),
        input: serde_json::json!({
            "total_gross_salary": audit_value(total_gross_salary),
            "variable_pay_total": audit_value(variable_pay_total),
            "total_statutory_cost": audit_value(total_statutory_cost),
            "total_welfare_cost": audit_value(welfare.total),
            "total_hidden_hr_cost": audit_value(hidden.total),
        }),
        output: serde_json::json!({
            "total_monthly_cost": audit_value(total_monthly_cost),
            "net_salary": audit_value(net_salary),
            "cost_multiplier": audit_value(cost_multiplier),
        }),
        reasoning: format!(
            "{} + {} + {} + {} + {} = {}; divided by net {} gives multiplier {}",
            audit_value(total_gross_salary),
            audit_value(variable_pay_total),
            audit_value(total_statutory_cost),
            audit_value(welfare.total),
            audit_value(hidden.total),
            audit_value(total_monthly_cost),
            audit_value(net_salary),
            audit_value(cost_multiplier)
        ),
    });

    debug!(
        contract_mode = mode.as_str(),
        insurable_gross = %insurable_gross,
        total_monthly_cost = %total_monthly_cost,
        net_salary = %net_salary,
        warnings = warnings.len(),
        "Cost breakdown composed"
    );

    CostComposition {
        breakdown: CostBreakdown {
            contract_mode: mode,
            effective_gross_base,
            insurable_gross,
            total_gross_salary,
            overtime_pay,
            variable_pay_total,
            monthly_income_tax,
            employer_insurance_contribution: insurance.contribution,
            employer_income_tax_burden: tax_burden.burden,
            severance_accrual: accruals.severance,
            eidi_accrual: accruals.eidi,
            leave_redemption_accrual: accruals.leave_redemption,
            total_statutory_cost,
            total_welfare_cost: welfare.total,
            total_hidden_hr_cost: hidden.total,
            total_monthly_cost,
            net_salary,
            cost_multiplier,
            gross_up,
        },
        audit_steps,
        warnings,
    }
}
