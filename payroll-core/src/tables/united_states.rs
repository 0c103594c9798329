//! 2025 annual rate schedules for a single filer.
//!
//! Rows touch (each lower bound equals the previous upper bound) and
//! `base_amount` holds the tax accumulated by all lower rows.

use rust_decimal_macros::dec;

use crate::models::TaxBracket;

/// IRS Schedule X.
#[rustfmt::skip]
pub static IRS_FEDERAL_SINGLE: &[TaxBracket] = &[
    TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(11925)), base_amount: dec!(0), rate: dec!(0.10) },
    TaxBracket { lower_bound: dec!(11925), upper_bound: Some(dec!(48475)), base_amount: dec!(1192.50), rate: dec!(0.12) },
    TaxBracket { lower_bound: dec!(48475), upper_bound: Some(dec!(103350)), base_amount: dec!(5578.50), rate: dec!(0.22) },
    TaxBracket { lower_bound: dec!(103350), upper_bound: Some(dec!(197300)), base_amount: dec!(17651.00), rate: dec!(0.24) },
    TaxBracket { lower_bound: dec!(197300), upper_bound: Some(dec!(250525)), base_amount: dec!(40199.00), rate: dec!(0.32) },
    TaxBracket { lower_bound: dec!(250525), upper_bound: Some(dec!(626350)), base_amount: dec!(57231.00), rate: dec!(0.35) },
    TaxBracket { lower_bound: dec!(626350), upper_bound: None, base_amount: dec!(188769.75), rate: dec!(0.37) },
];

/// California FTB schedule X.
#[rustfmt::skip]
pub static CA_FTB_SINGLE: &[TaxBracket] = &[
    TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(10756)), base_amount: dec!(0), rate: dec!(0.01) },
    TaxBracket { lower_bound: dec!(10756), upper_bound: Some(dec!(25499)), base_amount: dec!(107.56), rate: dec!(0.02) },
    TaxBracket { lower_bound: dec!(25499), upper_bound: Some(dec!(40245)), base_amount: dec!(402.42), rate: dec!(0.04) },
    TaxBracket { lower_bound: dec!(40245), upper_bound: Some(dec!(55866)), base_amount: dec!(992.26), rate: dec!(0.06) },
    TaxBracket { lower_bound: dec!(55866), upper_bound: Some(dec!(70606)), base_amount: dec!(1929.52), rate: dec!(0.08) },
    TaxBracket { lower_bound: dec!(70606), upper_bound: Some(dec!(360659)), base_amount: dec!(3108.72), rate: dec!(0.093) },
    TaxBracket { lower_bound: dec!(360659), upper_bound: Some(dec!(432787)), base_amount: dec!(30083.649), rate: dec!(0.103) },
    TaxBracket { lower_bound: dec!(432787), upper_bound: Some(dec!(721314)), base_amount: dec!(37512.833), rate: dec!(0.113) },
    TaxBracket { lower_bound: dec!(721314), upper_bound: None, base_amount: dec!(70116.384), rate: dec!(0.123) },
];
