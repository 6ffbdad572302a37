//! Cost breakdown models for the cost engine.
//!
//! This module contains the [`CostBreakdown`] produced by the composer, the
//! [`GrossUpOutcome`] reported by the net-to-gross solver, and the
//! [`CalculationResult`] envelope returned by the HTTP API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::round_currency;

use super::{AuditTrace, ContractMode};

/// Decimal places kept for the cost multiplier after rounding.
const MULTIPLIER_DECIMAL_PLACES: u32 = 4;

/// The result of solving a net salary back to its gross.
///
/// `converged` is false when the iteration ceiling was reached with the
/// residual still at or above tolerance; `gross` is then the last estimate
/// and must not be used for payroll without review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossUpOutcome {
    /// The gross monthly salary found.
    pub gross: Decimal,
    /// Requested net minus the net achieved by `gross`.
    pub residual: Decimal,
    /// Number of refinement steps performed.
    pub iterations: u32,
    /// Whether the residual fell below tolerance.
    pub converged: bool,
}

/// Every derived cost term for one employee, monthly.
///
/// All amounts are kept at full decimal precision; call
/// [`CostBreakdown::rounded`] at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// The contract mode the breakdown was computed for.
    pub contract_mode: ContractMode,
    /// Base gross salary (the grossed-up amount for net contracts).
    pub effective_gross_base: Decimal,
    /// Base plus insurable allowances.
    pub insurable_gross: Decimal,
    /// Insurable gross plus non-insurable fixed allowances.
    pub total_gross_salary: Decimal,
    /// Overtime pay at the statutory premium.
    pub overtime_pay: Decimal,
    /// Overtime plus performance pay plus bonus.
    pub variable_pay_total: Decimal,
    /// Income tax on the insurable gross.
    pub monthly_income_tax: Decimal,
    /// Employer's social insurance contribution.
    pub employer_insurance_contribution: Decimal,
    /// Income tax absorbed by the employer (net contracts only).
    pub employer_income_tax_burden: Decimal,
    /// Monthly severance liability.
    pub severance_accrual: Decimal,
    /// Monthly share of the annual Eidi bonus.
    pub eidi_accrual: Decimal,
    /// Monthly value of unused leave.
    pub leave_redemption_accrual: Decimal,
    /// Insurance, absorbed tax, and the three accruals.
    pub total_statutory_cost: Decimal,
    /// Supplementary insurance plus amortized occasional benefits.
    pub total_welfare_cost: Decimal,
    /// Recruitment, training and miscellaneous HR overhead.
    pub total_hidden_hr_cost: Decimal,
    /// The employer's total monthly cost.
    pub total_monthly_cost: Decimal,
    /// The employee's monthly take-home pay.
    pub net_salary: Decimal,
    /// Total monthly cost divided by net salary (0 when net is 0).
    pub cost_multiplier: Decimal,
    /// Solver report for net contracts; `None` for gross contracts.
    pub gross_up: Option<GrossUpOutcome>,
}

impl CostBreakdown {
    /// Returns true unless a net-to-gross solve failed to converge.
    pub fn is_reliable(&self) -> bool {
        self.gross_up.is_none_or(|outcome| outcome.converged)
    }

    /// Returns a copy rounded for presentation.
    ///
    /// Amounts are rounded half away from zero to whole currency units and the
    /// multiplier to four decimal places. Solver diagnostics are kept as-is.
    pub fn rounded(&self) -> Self {
        Self {
            contract_mode: self.contract_mode,
            effective_gross_base: round_currency(self.effective_gross_base),
            insurable_gross: round_currency(self.insurable_gross),
            total_gross_salary: round_currency(self.total_gross_salary),
            overtime_pay: round_currency(self.overtime_pay),
            variable_pay_total: round_currency(self.variable_pay_total),
            monthly_income_tax: round_currency(self.monthly_income_tax),
            employer_insurance_contribution: round_currency(self.employer_insurance_contribution),
            employer_income_tax_burden: round_currency(self.employer_income_tax_burden),
            severance_accrual: round_currency(self.severance_accrual),
            eidi_accrual: round_currency(self.eidi_accrual),
            leave_redemption_accrual: round_currency(self.leave_redemption_accrual),
            total_statutory_cost: round_currency(self.total_statutory_cost),
            total_welfare_cost: round_currency(self.total_welfare_cost),
            total_hidden_hr_cost: round_currency(self.total_hidden_hr_cost),
            total_monthly_cost: round_currency(self.total_monthly_cost),
            net_salary: round_currency(self.net_salary),
            cost_multiplier: self.cost_multiplier.round_dp_with_strategy(
                MULTIPLIER_DECIMAL_PLACES,
                rust_decimal::RoundingStrategy::MidpointAwayFromZero,
            ),
            gross_up: self.gross_up,
        }
    }
}

/// The complete result of a cost calculation served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tax schedule version applied.
    pub tax_schedule_version: String,
    /// The cost breakdown, rounded for presentation.
    pub breakdown: CostBreakdown,
    /// The complete audit trace.
    pub audit_trace: AuditTrace,
}
