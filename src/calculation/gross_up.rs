//! Net-to-gross salary solving for net contracts.
//!
//! The take-home pay of a gross salary `g` is
//! `g - 0.07 g - monthly_tax(g)`. That function is piecewise linear with a
//! slope between 0.63 and 0.93, so it has no single closed-form inverse but
//! the fixed-point update `g += net - take_home(g)` contracts by a factor of
//! at most 0.37 per step. The solver iterates until the residual is below one
//! currency unit and reports the outcome instead of assuming convergence.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::TaxSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, GrossUpOutcome};

use super::common::audit_value;
use super::statutory::EMPLOYEE_INSURANCE_RATE;
use super::tax_brackets::{INCOME_TAX_LEGAL_REF, monthly_tax};

/// A gross is accepted once the achieved net is within this many units.
pub const GROSS_UP_TOLERANCE: Decimal = dec!(1);

/// Safety ceiling on refinement steps. Realistic salaries need about twenty.
pub const MAX_GROSS_UP_ITERATIONS: u32 = 100;

/// The result of a gross-up, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossUpResult {
    /// The solver outcome.
    pub outcome: GrossUpOutcome,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the employee's take-home pay for a gross monthly salary.
///
/// Only the employee insurance share and income tax are deducted.
pub fn net_from_gross(gross: Decimal, schedule: &TaxSchedule) -> Decimal {
    gross - gross * EMPLOYEE_INSURANCE_RATE - monthly_tax(gross, schedule)
}

/// Finds the gross monthly salary whose take-home pay equals `net_monthly`.
///
/// Iteration starts from `net / 0.93`, the exact answer inside the exempt
/// bracket, and stops when the residual drops below [`GROSS_UP_TOLERANCE`] or
/// after [`MAX_GROSS_UP_ITERATIONS`] steps. A non-positive net yields a zero
/// gross.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tce_engine::calculation::{gross_up_from_net, net_from_gross};
/// use tce_engine::config::TaxSchedule;
///
/// let schedule = TaxSchedule::default();
/// let outcome = gross_up_from_net(dec!(50000000), &schedule);
///
/// assert!(outcome.converged);
/// let achieved = net_from_gross(outcome.gross, &schedule);
/// assert!((achieved - dec!(50000000)).abs() < dec!(1));
/// ```
pub fn gross_up_from_net(net_monthly: Decimal, schedule: &TaxSchedule) -> GrossUpOutcome {
    gross_up_with_limit(net_monthly, schedule, MAX_GROSS_UP_ITERATIONS)
}

/// Like [`gross_up_from_net`] with an explicit iteration ceiling.
pub fn gross_up_with_limit(
    net_monthly: Decimal,
    schedule: &TaxSchedule,
    max_iterations: u32,
) -> GrossUpOutcome {
    if net_monthly <= Decimal::ZERO {
        return GrossUpOutcome {
            gross: Decimal::ZERO,
            residual: Decimal::ZERO,
            iterations: 0,
            converged: true,
        };
    }

    let mut gross = net_monthly / (Decimal::ONE - EMPLOYEE_INSURANCE_RATE);
    let mut iterations = 0;

    loop {
        let residual = net_monthly - net_from_gross(gross, schedule);

        if residual.abs() < GROSS_UP_TOLERANCE {
            debug!(
                net_monthly = %net_monthly,
                gross = %gross,
                iterations,
                "Gross-up converged"
            );
            return GrossUpOutcome {
                gross,
                residual,
                iterations,
                converged: true,
            };
        }

        if iterations >= max_iterations {
            warn!(
                net_monthly = %net_monthly,
                gross = %gross,
                residual = %residual,
                iterations,
                "Gross-up did not converge"
            );
            return GrossUpOutcome {
                gross,
                residual,
                iterations,
                converged: false,
            };
        }

        gross += residual;
        iterations += 1;
    }
}

/// Turns an outcome into the gross salary, or an error if it did not converge.
pub fn ensure_converged(net_monthly: Decimal, outcome: GrossUpOutcome) -> EngineResult<Decimal> {
    if outcome.converged {
        Ok(outcome.gross)
    } else {
        Err(EngineError::GrossUpNotConverged {
            net_monthly,
            gross: outcome.gross,
            residual: outcome.residual,
            iterations: outcome.iterations,
        })
    }
}

/// Strict gross-up for callers that must not act on an imprecise gross.
///
/// # Errors
///
/// Returns `GrossUpNotConverged` when the residual is still at or above
/// tolerance after the iteration ceiling.
pub fn try_gross_up_from_net(net_monthly: Decimal, schedule: &TaxSchedule) -> EngineResult<Decimal> {
    ensure_converged(net_monthly, gross_up_from_net(net_monthly, schedule))
}

/// Grosses up a net salary within `max_iterations` steps and records it in
/// the audit trail.
pub fn calculate_gross_up(
    net_monthly: Decimal,
    schedule: &TaxSchedule,
    max_iterations: u32,
    step_number: u32,
) -> GrossUpResult {
    let outcome = gross_up_with_limit(net_monthly, schedule, max_iterations);

    let reasoning = if outcome.converged {
        format!(
            "Net {} requires gross {} ({} iterations, residual {})",
            audit_value(net_monthly),
            audit_value(outcome.gross),
            outcome.iterations,
            audit_value(outcome.residual)
        )
    } else {
        format!(
            "Net {} did NOT converge after {} iterations: last gross {}, residual {}",
            audit_value(net_monthly),
            outcome.iterations,
            audit_value(outcome.gross),
            audit_value(outcome.residual)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_up".to_string(),
        rule_name: "Net-to-Gross Solve".to_string(),
        legal_ref: INCOME_TAX_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "net_monthly": audit_value(net_monthly),
            "employee_insurance_rate": audit_value(EMPLOYEE_INSURANCE_RATE),
            "tolerance": audit_value(GROSS_UP_TOLERANCE),
            "max_iterations": max_iterations,
        }),
        output: serde_json::json!({
            "gross": audit_value(outcome.gross),
            "residual": audit_value(outcome.residual),
            "iterations": outcome.iterations,
            "converged": outcome.converged,
        }),
        reasoning,
    };

    GrossUpResult {
        outcome,
        audit_step,
    }
}
