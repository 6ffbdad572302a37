//! Configuration types for the cost engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the versioned progressive
//! tax schedule and the statutory fixed-allowance defaults.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the jurisdiction whose rules are configured.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short jurisdiction code (e.g., "IR").
    pub code: String,
    /// Human-readable jurisdiction name.
    pub name: String,
    /// ISO 4217 currency code of every monetary amount.
    pub currency: String,
    /// URL of the issuing authority.
    pub source_url: String,
}

/// A single progressive tax bracket.
///
/// Bounds are annual amounts. The bracket covers income from the previous
/// bracket's upper bound (or zero) up to `upper_bound`; `None` means the
/// bracket is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive annual upper bound, or `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction in `[0, 1]`.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bounded bracket.
    pub fn bounded(upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Creates the unbounded top bracket.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// A versioned, ordered table of progressive tax brackets.
///
/// The table partitions `[0, ∞)` with no gaps or overlaps and its rates are
/// non-decreasing. These properties are checked by [`TaxSchedule::validate`]
/// and are what keep the gross-up solver monotone.
///
/// # Example
///
/// ```
/// use tce_engine::config::TaxSchedule;
///
/// let schedule = TaxSchedule::default();
/// assert_eq!(schedule.brackets().len(), 6);
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// Version label of this schedule (usually its effective date).
    pub version: String,
    /// The first date this schedule applies to.
    pub effective_date: NaiveDate,
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Creates a validated schedule.
    pub fn new(
        version: impl Into<String>,
        effective_date: NaiveDate,
        brackets: Vec<TaxBracket>,
    ) -> EngineResult<Self> {
        let schedule = Self {
            version: version.into(),
            effective_date,
            brackets,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Checks the bracket table invariants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxSchedule` if the table is empty, a bound is not
    /// positive or not strictly increasing, a bracket other than the last is
    /// unbounded, the last bracket is bounded, a rate lies outside `[0, 1]`,
    /// or rates decrease.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTaxSchedule {
            version: self.version.clone(),
            message,
        };

        if self.brackets.is_empty() {
            return Err(invalid("schedule has no brackets".to_string()));
        }

        let last_index = self.brackets.len() - 1;
        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} is outside [0, 1]",
                    index, bracket.rate
                )));
            }
            if bracket.rate < previous_rate {
                return Err(invalid(format!(
                    "bracket {} rate {} is lower than the previous rate {}",
                    index, bracket.rate, previous_rate
                )));
            }
            previous_rate = bracket.rate;

            match bracket.upper_bound {
                Some(bound) if index == last_index => {
                    return Err(invalid(format!(
                        "last bracket must be unbounded, found upper bound {}",
                        bound
                    )));
                }
                Some(bound) => {
                    if bound <= previous_bound {
                        return Err(invalid(format!(
                            "bracket {} upper bound {} must exceed {}",
                            index, bound, previous_bound
                        )));
                    }
                    previous_bound = bound;
                }
                None if index != last_index => {
                    return Err(invalid(format!(
                        "only the last bracket may be unbounded, bracket {} is unbounded",
                        index
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

impl Default for TaxSchedule {
    /// The schedule effective from 2025-03-21, identical to the shipped
    /// `config/iran/tax_schedules/2025-03-21.yaml`.
    fn default() -> Self {
        Self {
            version: "2025-03-21".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2025, 3, 21).expect("valid calendar date"),
            brackets: vec![
                TaxBracket::bounded(dec!(1680000000), dec!(0.00)),
                TaxBracket::bounded(dec!(2760000000), dec!(0.10)),
                TaxBracket::bounded(dec!(4320000000), dec!(0.15)),
                TaxBracket::bounded(dec!(7200000000), dec!(0.20)),
                TaxBracket::bounded(dec!(12000000000), dec!(0.25)),
                TaxBracket::unbounded(dec!(0.30)),
            ],
        }
    }
}

/// Statutory fixed-allowance floors applied when a caller omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceDefaults {
    /// Monthly housing allowance.
    pub housing_allowance: Decimal,
    /// Monthly grocery allowance.
    pub grocery_allowance: Decimal,
    /// Monthly children allowance.
    pub children_allowance: Decimal,
    /// Standard monthly hour count used as the overtime divisor.
    pub overtime_base_hours: Decimal,
}

impl Default for AllowanceDefaults {
    fn default() -> Self {
        Self {
            housing_allowance: Decimal::ZERO,
            grocery_allowance: Decimal::ZERO,
            children_allowance: Decimal::ZERO,
            overtime_base_hours: crate::calculation::DEFAULT_OVERTIME_BASE_HOURS,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: JurisdictionMetadata,
    defaults: AllowanceDefaults,
    /// Tax schedules by effective date (sorted oldest first).
    tax_schedules: Vec<TaxSchedule>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: JurisdictionMetadata,
        defaults: AllowanceDefaults,
        tax_schedules: Vec<TaxSchedule>,
    ) -> Self {
        let mut sorted_schedules = tax_schedules;
        sorted_schedules.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            defaults,
            tax_schedules: sorted_schedules,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the fixed-allowance defaults.
    pub fn defaults(&self) -> &AllowanceDefaults {
        &self.defaults
    }

    /// Returns all tax schedules, oldest first.
    pub fn tax_schedules(&self) -> &[TaxSchedule] {
        &self.tax_schedules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 21).unwrap()
    }

    #[test]
    fn test_default_schedule_is_valid() {
        assert!(TaxSchedule::default().validate().is_ok());
    }

    #[test]
    fn test_default_schedule_matches_published_brackets() {
        let schedule = TaxSchedule::default();
        let bounds: Vec<Option<Decimal>> =
            schedule.brackets().iter().map(|b| b.upper_bound).collect();
        assert_eq!(
            bounds,
            vec![
                Some(dec!(1680000000)),
                Some(dec!(2760000000)),
                Some(dec!(4320000000)),
                Some(dec!(7200000000)),
                Some(dec!(12000000000)),
                None,
            ]
        );
        assert_eq!(schedule.brackets()[5].rate, dec!(0.30));
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let result = TaxSchedule::new("empty", date(), vec![]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidTaxSchedule { ref message, .. }) if message.contains("no brackets")
        ));
    }

    #[test]
    fn test_non_increasing_bounds_rejected() {
        let result = TaxSchedule::new(
            "bad",
            date(),
            vec![
                TaxBracket::bounded(dec!(200), dec!(0)),
                TaxBracket::bounded(dec!(200), dec!(0.1)),
                TaxBracket::unbounded(dec!(0.2)),
            ],
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidTaxSchedule { ref message, .. }) if message.contains("must exceed")
        ));
    }

    #[test]
    fn test_decreasing_rates_rejected() {
        let result = TaxSchedule::new(
            "regressive",
            date(),
            vec![
                TaxBracket::bounded(dec!(100), dec!(0.2)),
                TaxBracket::unbounded(dec!(0.1)),
            ],
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidTaxSchedule { ref message, .. }) if message.contains("lower than")
        ));
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let result = TaxSchedule::new("greedy", date(), vec![TaxBracket::unbounded(dec!(1.5))]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bounded_last_bracket_rejected() {
        let result = TaxSchedule::new(
            "gap",
            date(),
            vec![TaxBracket::bounded(dec!(100), dec!(0))],
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidTaxSchedule { ref message, .. }) if message.contains("must be unbounded")
        ));
    }

    #[test]
    fn test_unbounded_middle_bracket_rejected() {
        let result = TaxSchedule::new(
            "overlap",
            date(),
            vec![
                TaxBracket::unbounded(dec!(0)),
                TaxBracket::unbounded(dec!(0.1)),
            ],
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidTaxSchedule { ref message, .. }) if message.contains("only the last")
        ));
    }

    #[test]
    fn test_single_flat_bracket_is_valid() {
        let schedule = TaxSchedule::new("flat", date(), vec![TaxBracket::unbounded(dec!(0.1))]);
        assert!(schedule.is_ok());
    }

    #[test]
    fn test_engine_config_sorts_schedules_oldest_first() {
        let newer = TaxSchedule {
            version: "newer".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2026, 3, 21).unwrap(),
            ..TaxSchedule::default()
        };
        let older = TaxSchedule::default();
        let config = EngineConfig::new(
            JurisdictionMetadata {
                code: "IR".to_string(),
                name: "Iran".to_string(),
                currency: "IRR".to_string(),
                source_url: String::new(),
            },
            AllowanceDefaults::default(),
            vec![newer, older],
        );
        assert_eq!(config.tax_schedules()[0].version, "2025-03-21");
        assert_eq!(config.tax_schedules()[1].version, "newer");
    }

    #[test]
    fn test_deserialize_schedule_with_null_top_bound() {
        let yaml = r#"
version: "test"
effective_date: 2025-03-21
brackets:
  - upper_bound: "1000"
    rate: "0"
  - upper_bound: null
    rate: "0.1"
"#;
        let schedule: TaxSchedule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schedule.brackets().len(), 2);
        assert_eq!(schedule.brackets()[1].upper_bound, None);
        assert!(schedule.validate().is_ok());
    }
}
