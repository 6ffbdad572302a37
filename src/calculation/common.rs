//! Common helpers shared by the calculation stages.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Months in a year, used to annualize and amortize amounts.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rounds an amount to whole currency units, half away from zero.
///
/// Only presentation code should call this.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tce_engine::calculation::round_currency;
///
/// assert_eq!(round_currency(dec!(1234.49)), dec!(1234));
/// assert_eq!(round_currency(dec!(1234.5)), dec!(1235));
/// assert_eq!(round_currency(dec!(-1234.5)), dec!(-1235));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a decimal for audit JSON without trailing zeros.
pub(crate) fn audit_value(value: Decimal) -> String {
    value.normalize().to_string()
}
