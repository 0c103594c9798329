//! Rounding and clamping helpers shared by the regime calculators.
//!
//! Every rounding here is half away from zero, which is how payroll slips in
//! both regimes present whole units, cents and one-decimal percentages.

use rust_decimal::{Decimal, RoundingStrategy};

fn round_to(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to two decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_cents;
///
/// assert_eq!(round_cents(dec!(593.745)), dec!(593.75));
/// assert_eq!(round_cents(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    round_to(value, 2)
}

/// Rounds to a whole currency unit.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_units;
///
/// assert_eq!(round_units(dec!(1772.5)), dec!(1773));
/// assert_eq!(round_units(dec!(1772.49)), dec!(1772));
/// ```
pub fn round_units(value: Decimal) -> Decimal {
    round_to(value, 0)
}

/// Rounds to one decimal place.
pub fn round_tenths(value: Decimal) -> Decimal {
    round_to(value, 1)
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// `part / whole * 100` rounded to one decimal place, or zero when `whole`
/// is zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(2069), dec!(12500)), dec!(16.6));
/// assert_eq!(percent_of(dec!(10), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_tenths(part / whole * Decimal::ONE_HUNDRED)
}
