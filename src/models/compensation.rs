//! Compensation input model and related types.
//!
//! This module defines the [`CompensationInput`] record supplied by the
//! calling form and the [`ContractMode`] that decides how its base salary is
//! interpreted.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_OVERTIME_BASE_HOURS;
use crate::error::{EngineError, EngineResult};

/// How the contract states the base salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractMode {
    /// The base salary is the gross amount subject to insurance and tax.
    Gross,
    /// The base salary is the guaranteed take-home amount; the employer
    /// absorbs the tax and both insurance shares.
    Net,
}

impl ContractMode {
    /// Returns the snake_case label used in audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractMode::Gross => "gross",
            ContractMode::Net => "net",
        }
    }
}

/// The compensation inputs for one employee, monthly, in the smallest
/// currency unit.
///
/// # Example
///
/// ```
/// use tce_engine::models::{CompensationInput, ContractMode};
/// use rust_decimal_macros::dec;
///
/// let input = CompensationInput {
///     base_salary: dec!(50000000),
///     ..CompensationInput::new(ContractMode::Gross)
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// How `base_salary` is interpreted.
    pub contract_mode: ContractMode,
    /// Gross base pay (GROSS mode) or guaranteed net pay (NET mode).
    pub base_salary: Decimal,

    /// Insurable job absorption allowance. Discarded in NET mode.
    #[serde(default)]
    pub job_absorption: Decimal,
    /// Insurable responsibility allowance. Discarded in NET mode.
    #[serde(default)]
    pub responsibility_allowance: Decimal,
    /// Insurable job superlative allowance. Discarded in NET mode.
    #[serde(default)]
    pub job_superlative: Decimal,

    /// Non-insurable housing allowance.
    #[serde(default)]
    pub housing_allowance: Decimal,
    /// Non-insurable grocery allowance.
    #[serde(default)]
    pub grocery_allowance: Decimal,
    /// Non-insurable children allowance.
    #[serde(default)]
    pub children_allowance: Decimal,
    /// Other non-insurable fixed benefits.
    #[serde(default)]
    pub other_benefits: Decimal,

    /// Standard monthly hours used as the overtime divisor.
    #[serde(default = "default_overtime_base_hours")]
    pub overtime_base_hours: Decimal,
    /// Hours worked beyond the standard month.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Monthly performance pay.
    #[serde(default)]
    pub monthly_performance: Decimal,
    /// Monthly bonus.
    #[serde(default)]
    pub monthly_bonus: Decimal,

    /// Monthly employer cost of supplementary health insurance.
    #[serde(default)]
    pub supplementary_insurance: Decimal,
    /// Occasional benefits paid over a year (amortized monthly).
    #[serde(default)]
    pub annual_occasional_benefits: Decimal,

    /// Monthly recruitment cost.
    #[serde(default)]
    pub recruitment_cost: Decimal,
    /// Monthly training cost.
    #[serde(default)]
    pub training_cost: Decimal,
    /// Other monthly HR overhead.
    #[serde(default)]
    pub misc_cost: Decimal,
}

fn default_overtime_base_hours() -> Decimal {
    DEFAULT_OVERTIME_BASE_HOURS
}

/// Largest monetary amount accepted by [`CompensationInput::validate`].
pub const MAX_MONETARY_AMOUNT: Decimal = dec!(1000000000000000);

/// Hours in the longest month; the ceiling for both hour fields.
pub const MAX_MONTHLY_HOURS: Decimal = dec!(744);

/// Checks that a monetary amount lies in `[0, MAX_MONETARY_AMOUNT]`.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` otherwise.
pub fn validate_amount(field: &str, value: Decimal) -> EngineResult<()> {
    check_range(field, value, MAX_MONETARY_AMOUNT)
}

fn check_range(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    let message = if value < Decimal::ZERO {
        format!("must not be negative, got {}", value)
    } else if value > max {
        format!("must not exceed {}, got {}", max, value)
    } else {
        return Ok(());
    };
    Err(EngineError::InvalidInput {
        field: field.to_string(),
        message,
    })
}

impl CompensationInput {
    /// Creates an input with every amount zero and the standard overtime divisor.
    pub fn new(contract_mode: ContractMode) -> Self {
        Self {
            contract_mode,
            base_salary: Decimal::ZERO,
            job_absorption: Decimal::ZERO,
            responsibility_allowance: Decimal::ZERO,
            job_superlative: Decimal::ZERO,
            housing_allowance: Decimal::ZERO,
            grocery_allowance: Decimal::ZERO,
            children_allowance: Decimal::ZERO,
            other_benefits: Decimal::ZERO,
            overtime_base_hours: DEFAULT_OVERTIME_BASE_HOURS,
            overtime_hours: Decimal::ZERO,
            monthly_performance: Decimal::ZERO,
            monthly_bonus: Decimal::ZERO,
            supplementary_insurance: Decimal::ZERO,
            annual_occasional_benefits: Decimal::ZERO,
            recruitment_cost: Decimal::ZERO,
            training_cost: Decimal::ZERO,
            misc_cost: Decimal::ZERO,
        }
    }

    /// Returns true for net contracts.
    pub fn is_net(&self) -> bool {
        self.contract_mode == ContractMode::Net
    }

    /// Returns the insurable allowances as entered, before any mode rules.
    pub fn insurable_allowances(&self) -> Decimal {
        self.job_absorption + self.responsibility_allowance + self.job_superlative
    }

    /// Returns the non-insurable fixed allowances.
    pub fn fixed_allowances(&self) -> Decimal {
        self.housing_allowance
            + self.grocery_allowance
            + self.children_allowance
            + self.other_benefits
    }

    /// Validates the input before it enters the engine.
    ///
    /// The engine itself never fails and falls back to zero for its division
    /// guards; this check is for callers that want out-of-range values
    /// rejected instead.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for the first amount outside
    /// `[0, MAX_MONETARY_AMOUNT]`, for hours outside `[0, MAX_MONTHLY_HOURS]`,
    /// or when overtime hours are worked against a divisor below one hour.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("base_salary", self.base_salary),
            ("job_absorption", self.job_absorption),
            ("responsibility_allowance", self.responsibility_allowance),
            ("job_superlative", self.job_superlative),
            ("housing_allowance", self.housing_allowance),
            ("grocery_allowance", self.grocery_allowance),
            ("children_allowance", self.children_allowance),
            ("other_benefits", self.other_benefits),
            ("monthly_performance", self.monthly_performance),
            ("monthly_bonus", self.monthly_bonus),
            ("supplementary_insurance", self.supplementary_insurance),
            ("annual_occasional_benefits", self.annual_occasional_benefits),
            ("recruitment_cost", self.recruitment_cost),
            ("training_cost", self.training_cost),
            ("misc_cost", self.misc_cost),
        ];
        for (field, value) in amounts {
            validate_amount(field, value)?;
        }

        for (field, value) in [
            ("overtime_base_hours", self.overtime_base_hours),
            ("overtime_hours", self.overtime_hours),
        ] {
            check_range(field, value, MAX_MONTHLY_HOURS)?;
        }

        if self.overtime_hours > Decimal::ZERO && self.overtime_base_hours < Decimal::ONE {
            return Err(EngineError::InvalidInput {
                field: "overtime_base_hours".to_string(),
                message: format!(
                    "must be at least 1 when overtime hours are worked, got {}",
                    self.overtime_base_hours
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_input_is_zeroed_with_standard_divisor() {
        let input = CompensationInput::new(ContractMode::Gross);
        assert_eq!(input.base_salary, Decimal::ZERO);
        assert_eq!(input.overtime_base_hours, dec!(176));
        assert!(!input.is_net());
    }

    #[test]
    fn test_deserialize_minimal_net_input() {
        let json = r#"{
            "contract_mode": "net",
            "base_salary": "50000000"
        }"#;

        let input: CompensationInput = serde_json::from_str(json).unwrap();
        assert!(input.is_net());
        assert_eq!(input.base_salary, dec!(50000000));
        assert_eq!(input.overtime_base_hours, dec!(176));
        assert_eq!(input.housing_allowance, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_accepts_numeric_amounts() {
        let json = r#"{
            "contract_mode": "gross",
            "base_salary": 50000000,
            "overtime_hours": 12.5
        }"#;

        let input: CompensationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.contract_mode, ContractMode::Gross);
        assert_eq!(input.overtime_hours, dec!(12.5));
    }

    #[test]
    fn test_allowance_groups_sum_their_fields() {
        let input = CompensationInput {
            job_absorption: dec!(1),
            responsibility_allowance: dec!(2),
            job_superlative: dec!(3),
            housing_allowance: dec!(10),
            grocery_allowance: dec!(20),
            children_allowance: dec!(30),
            other_benefits: dec!(40),
            ..CompensationInput::new(ContractMode::Gross)
        };
        assert_eq!(input.insurable_allowances(), dec!(6));
        assert_eq!(input.fixed_allowances(), dec!(100));
    }

    #[test]
    fn test_validate_accepts_all_zero_input() {
        assert!(CompensationInput::new(ContractMode::Net).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let input = CompensationInput {
            monthly_bonus: dec!(-1),
            ..CompensationInput::new(ContractMode::Gross)
        };

        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "monthly_bonus"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_overtime_against_zero_divisor() {
        let input = CompensationInput {
            overtime_base_hours: Decimal::ZERO,
            overtime_hours: dec!(10),
            ..CompensationInput::new(ContractMode::Gross)
        };

        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "overtime_base_hours")
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_fractional_divisor_with_overtime() {
        let input = CompensationInput {
            overtime_base_hours: dec!(0.000001),
            overtime_hours: dec!(10),
            ..CompensationInput::new(ContractMode::Gross)
        };

        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "overtime_base_hours")
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_amount_above_ceiling() {
        let input = CompensationInput {
            base_salary: dec!(10000000000000000000000000000),
            ..CompensationInput::new(ContractMode::Net)
        };

        match input.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "base_salary");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_amounts_at_ceiling() {
        let input = CompensationInput {
            base_salary: MAX_MONETARY_AMOUNT,
            job_absorption: MAX_MONETARY_AMOUNT,
            annual_occasional_benefits: MAX_MONETARY_AMOUNT,
            overtime_hours: MAX_MONTHLY_HOURS,
            overtime_base_hours: Decimal::ONE,
            ..CompensationInput::new(ContractMode::Gross)
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_hours_beyond_a_month() {
        let input = CompensationInput {
            overtime_hours: dec!(745),
            ..CompensationInput::new(ContractMode::Gross)
        };

        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "overtime_hours"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_amount_names_field() {
        assert!(validate_amount("net_monthly", dec!(50000000)).is_ok());
        match validate_amount("net_monthly", dec!(-1)) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "net_monthly");
                assert!(message.contains("must not be negative"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_allows_zero_divisor_without_overtime() {
        let input = CompensationInput {
            overtime_base_hours: Decimal::ZERO,
            ..CompensationInput::new(ContractMode::Gross)
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_contract_mode_labels() {
        assert_eq!(ContractMode::Gross.as_str(), "gross");
        assert_eq!(ContractMode::Net.as_str(), "net");
    }
}
