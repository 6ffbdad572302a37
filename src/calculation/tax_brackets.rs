//! Progressive income tax evaluation.
//!
//! Salary tax is assessed on annual income against the brackets of the
//! [`TaxSchedule`] in force. Each bracket taxes only the slice of income that
//! falls inside it, so the tax amount is continuous at every boundary even
//! though the marginal rate jumps.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxSchedule;
use crate::models::AuditStep;

use super::common::{MONTHS_PER_YEAR, audit_value};

/// Statute defining salary tax.
pub const INCOME_TAX_LEGAL_REF: &str = "Direct Taxes Act art. 85";

/// The result of the income tax calculation, including the audit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    /// Tax owed for the month.
    pub monthly_tax: Decimal,
    /// The annualized taxable income.
    pub annual_taxable_income: Decimal,
    /// Tax owed for the year.
    pub annual_tax: Decimal,
    /// Rate applied to the last slice of income.
    pub marginal_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the annual tax on an annual income.
///
/// Non-positive income owes no tax.
pub fn annual_tax(annual_income: Decimal, schedule: &TaxSchedule) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in schedule.brackets() {
        if annual_income <= lower {
            break;
        }
        let upper = bracket
            .upper_bound
            .map_or(annual_income, |bound| bound.min(annual_income));
        tax += (upper - lower) * bracket.rate;

        match bracket.upper_bound {
            Some(bound) => lower = bound,
            None => break,
        }
    }

    tax
}

/// Returns the monthly tax on a monthly taxable income.
///
/// The income is annualized, taxed against the schedule and the annual tax
/// spread back over twelve months. Nothing is rounded.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tce_engine::calculation::monthly_tax;
/// use tce_engine::config::TaxSchedule;
///
/// let schedule = TaxSchedule::default();
/// assert_eq!(monthly_tax(dec!(100000000), &schedule), dec!(0));
/// assert_eq!(monthly_tax(dec!(300000000), &schedule), dec!(19500000));
/// ```
pub fn monthly_tax(monthly_taxable_income: Decimal, schedule: &TaxSchedule) -> Decimal {
    if monthly_taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    annual_tax(monthly_taxable_income * MONTHS_PER_YEAR, schedule) / MONTHS_PER_YEAR
}

/// Returns the marginal rate of the bracket that contains `annual_income`.
///
/// Income exactly on a boundary belongs to the lower bracket.
pub fn marginal_rate(annual_income: Decimal, schedule: &TaxSchedule) -> Decimal {
    schedule
        .brackets()
        .iter()
        .find(|bracket| {
            bracket
                .upper_bound
                .is_none_or(|bound| annual_income <= bound)
        })
        .map_or(Decimal::ZERO, |bracket| bracket.rate)
}

/// Calculates the monthly income tax and records it in the audit trail.
pub fn calculate_income_tax(
    monthly_taxable_income: Decimal,
    schedule: &TaxSchedule,
    step_number: u32,
) -> IncomeTaxResult {
    let annual_taxable_income = monthly_taxable_income.max(Decimal::ZERO) * MONTHS_PER_YEAR;
    let annual = annual_tax(annual_taxable_income, schedule);
    let monthly = monthly_tax(monthly_taxable_income, schedule);
    let rate = marginal_rate(annual_taxable_income, schedule);

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        legal_ref: INCOME_TAX_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "monthly_taxable_income": audit_value(monthly_taxable_income),
            "tax_schedule_version": schedule.version,
        }),
        output: serde_json::json!({
            "annual_taxable_income": audit_value(annual_taxable_income),
            "annual_tax": audit_value(annual),
            "monthly_tax": audit_value(monthly),
            "marginal_rate": audit_value(rate),
        }),
        reasoning: format!(
            "{} x 12 = {} annual, taxed {} across brackets (marginal rate {}), / 12 = {}",
            audit_value(monthly_taxable_income),
            audit_value(annual_taxable_income),
            audit_value(annual),
            audit_value(rate),
            audit_value(monthly)
        ),
    };

    IncomeTaxResult {
        monthly_tax: monthly,
        annual_taxable_income,
        annual_tax: annual,
        marginal_rate: rate,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxBracket;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn schedule() -> TaxSchedule {
        TaxSchedule::default()
    }

    /// Monthly incomes at which the annualized income hits a bracket bound.
    fn monthly_boundaries() -> Vec<Decimal> {
        schedule()
            .brackets()
            .iter()
            .filter_map(|b| b.upper_bound)
            .map(|bound| bound / MONTHS_PER_YEAR)
            .collect()
    }

    #[test]
    fn test_zero_income_owes_nothing() {
        assert_eq!(monthly_tax(Decimal::ZERO, &schedule()), Decimal::ZERO);
    }

    #[test]
    fn test_negative_income_is_clamped_to_zero_tax() {
        assert_eq!(monthly_tax(dec!(-5000000), &schedule()), Decimal::ZERO);
    }

    #[test]
    fn test_exempt_bracket_up_to_its_bound() {
        assert_eq!(monthly_tax(dec!(50000000), &schedule()), Decimal::ZERO);
        assert_eq!(monthly_tax(dec!(140000000), &schedule()), Decimal::ZERO);
    }

    #[test]
    fn test_first_taxed_unit_above_exemption() {
        // 12 annual units above the exempt bound, taxed at 10%
        assert_eq!(monthly_tax(dec!(140000001), &schedule()), dec!(0.1));
    }

    #[test]
    fn test_income_in_third_bracket() {
        // 3.6bn annual: 1.08bn x 10% + 0.84bn x 15% = 234m annual
        assert_eq!(annual_tax(dec!(3600000000), &schedule()), dec!(234000000));
        assert_eq!(monthly_tax(dec!(300000000), &schedule()), dec!(19500000));
    }

    #[test]
    fn test_income_in_top_bracket() {
        // 18bn annual: 108m + 234m + 576m + 1.2bn + 1.8bn = 3.918bn
        assert_eq!(annual_tax(dec!(18000000000), &schedule()), dec!(3918000000));
        assert_eq!(monthly_tax(dec!(1500000000), &schedule()), dec!(326500000));
    }

    #[test]
    fn test_tax_at_each_boundary_equals_sum_of_full_brackets_below() {
        let expected = [
            dec!(0),
            dec!(108000000),
            dec!(342000000),
            dec!(918000000),
            dec!(2118000000),
        ];
        for (bound, tax) in schedule()
            .brackets()
            .iter()
            .filter_map(|b| b.upper_bound)
            .zip(expected)
        {
            assert_eq!(annual_tax(bound, &schedule()), tax, "at bound {}", bound);
        }
    }

    #[test]
    fn test_tax_is_continuous_at_every_boundary() {
        let epsilon = dec!(0.01);
        for boundary in monthly_boundaries() {
            let at = monthly_tax(boundary, &schedule());
            let below = monthly_tax(boundary - epsilon, &schedule());
            let above = monthly_tax(boundary + epsilon, &schedule());

            // a step of epsilon moves tax by at most epsilon x top rate
            assert!(at - below <= epsilon * dec!(0.30), "jump below {}", boundary);
            assert!(above - at <= epsilon * dec!(0.30), "jump above {}", boundary);
            assert!(below <= at && at <= above);
        }
    }

    #[test]
    fn test_marginal_rate_on_boundary_belongs_to_lower_bracket() {
        assert_eq!(marginal_rate(dec!(1680000000), &schedule()), dec!(0));
        assert_eq!(marginal_rate(dec!(1680000001), &schedule()), dec!(0.10));
        assert_eq!(marginal_rate(dec!(50000000000), &schedule()), dec!(0.30));
    }

    #[test]
    fn test_injected_schedule_is_used() {
        let flat = TaxSchedule::new(
            "flat",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            vec![TaxBracket::unbounded(dec!(0.1))],
        )
        .unwrap();
        assert_eq!(monthly_tax(dec!(1000), &flat), dec!(100));
    }

    #[test]
    fn test_calculate_income_tax_records_audit_step() {
        let result = calculate_income_tax(dec!(300000000), &schedule(), 6);

        assert_eq!(result.monthly_tax, dec!(19500000));
        assert_eq!(result.annual_taxable_income, dec!(3600000000));
        assert_eq!(result.annual_tax, dec!(234000000));
        assert_eq!(result.marginal_rate, dec!(0.15));
        assert_eq!(result.audit_step.step_number, 6);
        assert_eq!(result.audit_step.rule_id, "income_tax");
        assert_eq!(result.audit_step.legal_ref, INCOME_TAX_LEGAL_REF);
        assert_eq!(
            result.audit_step.output["monthly_tax"].as_str().unwrap(),
            "19500000"
        );
        assert_eq!(
            result.audit_step.input["tax_schedule_version"]
                .as_str()
                .unwrap(),
            "2025-03-21"
        );
    }
}
