//! Overtime pay calculation.
//!
//! Overtime is paid on the insurable gross only, at an hourly rate derived
//! from the standard monthly hours, plus the statutory 40% premium.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::common::audit_value;

/// Hourly multiplier for overtime work (a 40% premium).
pub const OVERTIME_PREMIUM_MULTIPLIER: Decimal = dec!(1.4);

/// Standard monthly hours used as the overtime divisor when none is given.
pub const DEFAULT_OVERTIME_BASE_HOURS: Decimal = dec!(176);

/// Statute defining the overtime premium.
pub const OVERTIME_LEGAL_REF: &str = "Labour Law art. 59";

/// The result of the overtime calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// Insurable gross divided by the base hours.
    pub hourly_rate: Decimal,
    /// Overtime pay for the month.
    pub overtime_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates monthly overtime pay.
///
/// `hourly_rate = insurable_gross / overtime_base_hours`, and overtime pay is
/// `hourly_rate x 1.4 x overtime_hours`. A zero (or negative) divisor yields
/// a zero hourly rate, and negative hours count as zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tce_engine::calculation::calculate_overtime_pay;
///
/// let result = calculate_overtime_pay(dec!(17600000), dec!(176), dec!(10), 1);
/// assert_eq!(result.hourly_rate, dec!(100000));
/// assert_eq!(result.overtime_pay, dec!(1400000));
/// ```
pub fn calculate_overtime_pay(
    insurable_gross: Decimal,
    overtime_base_hours: Decimal,
    overtime_hours: Decimal,
    step_number: u32,
) -> OvertimeResult {
    let hours = overtime_hours.max(Decimal::ZERO);
    let hourly_rate = if overtime_base_hours > Decimal::ZERO {
        insurable_gross / overtime_base_hours
    } else {
        Decimal::ZERO
    };
    let overtime_pay = hourly_rate * OVERTIME_PREMIUM_MULTIPLIER * hours;

    let reasoning = if overtime_base_hours > Decimal::ZERO {
        format!(
            "{} / {} hours = {} per hour; {} x {} x {} hours = {}",
            audit_value(insurable_gross),
            audit_value(overtime_base_hours),
            audit_value(hourly_rate),
            audit_value(hourly_rate),
            audit_value(OVERTIME_PREMIUM_MULTIPLIER),
            audit_value(hours),
            audit_value(overtime_pay)
        )
    } else {
        "Overtime base hours is zero; hourly rate and overtime pay fall back to 0".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        legal_ref: OVERTIME_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "insurable_gross": audit_value(insurable_gross),
            "overtime_base_hours": audit_value(overtime_base_hours),
            "overtime_hours": audit_value(overtime_hours),
        }),
        output: serde_json::json!({
            "hourly_rate": audit_value(hourly_rate),
            "multiplier": audit_value(OVERTIME_PREMIUM_MULTIPLIER),
            "overtime_pay": audit_value(overtime_pay),
        }),
        reasoning,
    };

    OvertimeResult {
        hourly_rate,
        overtime_pay,
        audit_step,
    }
}
