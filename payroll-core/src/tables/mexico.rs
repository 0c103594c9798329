//! SAT tables for 2025 monthly withholding.
//!
//! Consecutive rows are separated by one cent (`746.04` then `746.05`), as
//! published. The gaps are part of the tables and must not be closed.

use rust_decimal_macros::dec;

use crate::models::{SubsidyRow, TaxBracket};

/// ISR Art. 96 LISR monthly table. `base_amount` is the cuota fija.
#[rustfmt::skip]
pub static SAT_ISR: &[TaxBracket] = &[
    TaxBracket { lower_bound: dec!(0), upper_bound: Some(dec!(746.04)), base_amount: dec!(0), rate: dec!(0.0192) },
    TaxBracket { lower_bound: dec!(746.05), upper_bound: Some(dec!(6332.05)), base_amount: dec!(14.32), rate: dec!(0.0640) },
    TaxBracket { lower_bound: dec!(6332.06), upper_bound: Some(dec!(11128.01)), base_amount: dec!(371.83), rate: dec!(0.1088) },
    TaxBracket { lower_bound: dec!(11128.02), upper_bound: Some(dec!(12935.82)), base_amount: dec!(893.63), rate: dec!(0.1600) },
    TaxBracket { lower_bound: dec!(12935.83), upper_bound: Some(dec!(15487.71)), base_amount: dec!(1182.88), rate: dec!(0.1792) },
    TaxBracket { lower_bound: dec!(15487.72), upper_bound: Some(dec!(31236.49)), base_amount: dec!(1640.18), rate: dec!(0.2136) },
    TaxBracket { lower_bound: dec!(31236.50), upper_bound: Some(dec!(49233.00)), base_amount: dec!(5004.12), rate: dec!(0.2352) },
    TaxBracket { lower_bound: dec!(49233.01), upper_bound: Some(dec!(93993.90)), base_amount: dec!(9236.89), rate: dec!(0.3000) },
    TaxBracket { lower_bound: dec!(93993.91), upper_bound: Some(dec!(125325.20)), base_amount: dec!(22665.17), rate: dec!(0.3200) },
    TaxBracket { lower_bound: dec!(125325.21), upper_bound: Some(dec!(375975.61)), base_amount: dec!(32691.18), rate: dec!(0.3400) },
    TaxBracket { lower_bound: dec!(375975.62), upper_bound: None, base_amount: dec!(117912.32), rate: dec!(0.3500) },
];

/// Subsidio al Empleo monthly credit table.
#[rustfmt::skip]
pub static SAT_EMPLOYMENT_SUBSIDY: &[SubsidyRow] = &[
    SubsidyRow { lower_bound: dec!(0), upper_bound: Some(dec!(1768.96)), amount: dec!(407.02) },
    SubsidyRow { lower_bound: dec!(1768.97), upper_bound: Some(dec!(2653.38)), amount: dec!(406.83) },
    SubsidyRow { lower_bound: dec!(2653.39), upper_bound: Some(dec!(3472.84)), amount: dec!(406.62) },
    SubsidyRow { lower_bound: dec!(3472.85), upper_bound: Some(dec!(3537.87)), amount: dec!(392.77) },
    SubsidyRow { lower_bound: dec!(3537.88), upper_bound: Some(dec!(4446.15)), amount: dec!(382.46) },
    SubsidyRow { lower_bound: dec!(4446.16), upper_bound: Some(dec!(4717.18)), amount: dec!(354.23) },
    SubsidyRow { lower_bound: dec!(4717.19), upper_bound: Some(dec!(5335.42)), amount: dec!(324.87) },
    SubsidyRow { lower_bound: dec!(5335.43), upper_bound: Some(dec!(6224.67)), amount: dec!(294.63) },
    SubsidyRow { lower_bound: dec!(6224.68), upper_bound: Some(dec!(7113.90)), amount: dec!(253.54) },
    SubsidyRow { lower_bound: dec!(7113.91), upper_bound: Some(dec!(7382.33)), amount: dec!(217.61) },
    SubsidyRow { lower_bound: dec!(7382.34), upper_bound: None, amount: dec!(0) },
];
