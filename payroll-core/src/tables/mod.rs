//! Static 2025 tax tables and shape checks for them.
//!
//! Tables are plain `'static` slices: they are built at compile time, never
//! mutated, and can be shared across threads without synchronization.

pub mod mexico;
pub mod united_states;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::TableError;
use crate::models::BracketRange;

pub use mexico::{SAT_EMPLOYMENT_SUBSIDY, SAT_ISR};
pub use united_states::{CA_FTB_SINGLE, IRS_FEDERAL_SINGLE};

/// Distance between one row's upper bound and the next row's lower bound in
/// the SAT tables.
pub const MX_ROW_GAP: Decimal = dec!(0.01);

/// Checks that a table starts at zero, is ordered, has exactly `gap` between
/// consecutive rows, and ends with a single unbounded row.
///
/// ```
/// use rust_decimal::Decimal;
/// use payroll_core::tables::{IRS_FEDERAL_SINGLE, validate_table};
///
/// assert_eq!(validate_table(IRS_FEDERAL_SINGLE, Decimal::ZERO), Ok(()));
/// ```
pub fn validate_table<T: BracketRange>(
    rows: &[T],
    gap: Decimal,
) -> Result<(), TableError> {
    let first = rows.first().ok_or(TableError::Empty)?;
    if first.lower_bound() != Decimal::ZERO {
        return Err(TableError::Discontinuous {
            index: 0,
            expected: Decimal::ZERO,
            found: first.lower_bound(),
        });
    }

    let last_index = rows.len() - 1;
    for (index, row) in rows.iter().enumerate() {
        match row.upper_bound() {
            Some(upper) => {
                if upper < row.lower_bound() {
                    return Err(TableError::Inverted {
                        index,
                        lower: row.lower_bound(),
                        upper,
                    });
                }
                let Some(next) = rows.get(index + 1) else {
                    return Err(TableError::BoundedTop);
                };
                let expected = upper + gap;
                if next.lower_bound() != expected {
                    return Err(TableError::Discontinuous {
                        index: index + 1,
                        expected,
                        found: next.lower_bound(),
                    });
                }
            }
            None if index != last_index => return Err(TableError::UnboundedInterior(index)),
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::TaxBracket;

    fn row(
        lower: Decimal,
        upper: Option<Decimal>,
    ) -> TaxBracket {
        TaxBracket {
            lower_bound: lower,
            upper_bound: upper,
            base_amount: Decimal::ZERO,
            rate: dec!(0.10),
        }
    }

    #[test]
    fn rejects_empty_table() {
        let rows: Vec<TaxBracket> = vec![];

        assert_eq!(validate_table(&rows, Decimal::ZERO), Err(TableError::Empty));
    }

    #[test]
    fn rejects_table_not_starting_at_zero() {
        let rows = vec![row(dec!(100), None)];

        assert_eq!(
            validate_table(&rows, Decimal::ZERO),
            Err(TableError::Discontinuous {
                index: 0,
                expected: Decimal::ZERO,
                found: dec!(100),
            })
        );
    }

    #[test]
    fn rejects_gap_between_rows() {
        let rows = vec![row(dec!(0), Some(dec!(100))), row(dec!(101), None)];

        assert_eq!(
            validate_table(&rows, Decimal::ZERO),
            Err(TableError::Discontinuous {
                index: 1,
                expected: dec!(100),
                found: dec!(101),
            })
        );
    }

    #[test]
    fn accepts_expected_gap() {
        let rows = vec![row(dec!(0), Some(dec!(100))), row(dec!(100.01), None)];

        assert_eq!(validate_table(&rows, MX_ROW_GAP), Ok(()));
    }

    #[test]
    fn rejects_bounded_top() {
        let rows = vec![row(dec!(0), Some(dec!(100)))];

        assert_eq!(validate_table(&rows, Decimal::ZERO), Err(TableError::BoundedTop));
    }

    #[test]
    fn rejects_unbounded_interior_row() {
        let rows = vec![row(dec!(0), None), row(dec!(100), None)];

        assert_eq!(
            validate_table(&rows, Decimal::ZERO),
            Err(TableError::UnboundedInterior(0))
        );
    }

    #[test]
    fn rejects_inverted_row() {
        let rows = vec![row(dec!(0), Some(dec!(-5))), row(dec!(-5), None)];

        assert_eq!(
            validate_table(&rows, Decimal::ZERO),
            Err(TableError::Inverted {
                index: 0,
                lower: dec!(0),
                upper: dec!(-5),
            })
        );
    }
}
