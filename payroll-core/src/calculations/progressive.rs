use rust_decimal::Decimal;

use crate::models::TaxBracket;

/// Marginal tax on `base` across touching `brackets`.
///
/// Every row whose lower bound is below `base` contributes the slice of
/// `base` it covers times its rate. The result is not rounded. For
/// `base <= 0` it is zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::progressive_tax;
/// use payroll_core::tables::IRS_FEDERAL_SINGLE;
///
/// assert_eq!(progressive_tax(dec!(48475), IRS_FEDERAL_SINGLE), dec!(5578.50));
/// ```
pub fn progressive_tax(
    base: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    brackets
        .iter()
        .filter(|bracket| base > bracket.lower_bound)
        .map(|bracket| {
            let top = bracket.upper_bound.map_or(base, |upper| base.min(upper));
            (top - bracket.lower_bound) * bracket.rate
        })
        .sum()
}
