//! US payroll withholding for a single California filer: IRS federal income
//! tax, FICA (Social Security and Medicare), California FTB income tax and
//! California SDI.
//!
//! Brackets are annual, so the periodic salary is annualized, every component
//! is computed on the annual figure, then each is divided back by the number
//! of periods and rounded to whole dollars on its own. Rounding differences
//! are not redistributed between lines.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::PayPeriod;
//! use payroll_core::calculations::UsCalculator;
//!
//! let calculator = UsCalculator::irs_ca_2025();
//! let breakdown = calculator.calculate(dec!(9615.38), PayPeriod::Biweekly).unwrap();
//!
//! assert_eq!(breakdown.total_deductions, dec!(3435));
//! assert_eq!(breakdown.federal_rate_percent, Some(dec!(20.9)));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, percent_of, round_units};
use crate::calculations::progressive_tax;
use crate::error::{PayrollError, RegimeConfigError};
use crate::models::{Country, DeductionBreakdown, DeductionLine, PayPeriod, TaxBracket};
use crate::tables::{CA_FTB_SINGLE, IRS_FEDERAL_SINGLE, validate_table};

pub const FEDERAL_INCOME_TAX_LABEL: &str = "Federal Income Tax (IRS)";
pub const SOCIAL_SECURITY_LABEL: &str = "Social Security 6.2%";
pub const MEDICARE_LABEL: &str = "Medicare 1.45%";
pub const CA_STATE_TAX_LABEL: &str = "CA State Tax (FTB)";
pub const CA_SDI_LABEL: &str = "CA SDI 1.1%";

/// Statutory parameters for the IRS+CA regime. [`Default`] holds 2025 values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsConfig {
    pub federal_standard_deduction: Decimal,
    pub state_standard_deduction: Decimal,

    /// Annual wages above this are not subject to Social Security.
    pub social_security_wage_base: Decimal,
    pub social_security_rate: Decimal,

    pub medicare_rate: Decimal,

    /// Annual wages above this pay the additional Medicare surtax.
    pub additional_medicare_threshold: Decimal,
    pub additional_medicare_rate: Decimal,

    pub sdi_rate: Decimal,
}

impl Default for UsConfig {
    fn default() -> Self {
        Self {
            federal_standard_deduction: dec!(15000),
            state_standard_deduction: dec!(5363),
            social_security_wage_base: dec!(176100),
            social_security_rate: dec!(0.062),
            medicare_rate: dec!(0.0145),
            additional_medicare_threshold: dec!(200000),
            additional_medicare_rate: dec!(0.009),
            sdi_rate: dec!(0.011),
        }
    }
}

impl UsConfig {
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        for (name, value) in [
            ("federal_standard_deduction", self.federal_standard_deduction),
            ("state_standard_deduction", self.state_standard_deduction),
            ("additional_medicare_threshold", self.additional_medicare_threshold),
        ] {
            if value < Decimal::ZERO {
                return Err(RegimeConfigError::Negative { name, value });
            }
        }
        if self.social_security_wage_base <= Decimal::ZERO {
            return Err(RegimeConfigError::NonPositive {
                name: "social_security_wage_base",
                value: self.social_security_wage_base,
            });
        }
        for (name, value) in [
            ("social_security_rate", self.social_security_rate),
            ("medicare_rate", self.medicare_rate),
            ("additional_medicare_rate", self.additional_medicare_rate),
            ("sdi_rate", self.sdi_rate),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RegimeConfigError::RateOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Number of `period` occurrences in a year.
pub fn periods_per_year(period: PayPeriod) -> Decimal {
    match period {
        PayPeriod::Weekly => dec!(52),
        PayPeriod::Biweekly => dec!(26),
        PayPeriod::Monthly => dec!(12),
    }
}

/// Annual, unrounded amounts for each withholding component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AnnualComponents {
    federal_income_tax: Decimal,
    social_security: Decimal,
    medicare: Decimal,
    state_income_tax: Decimal,
    sdi: Decimal,
}

/// Calculator for the IRS+CA regime.
#[derive(Debug, Clone)]
pub struct UsCalculator<'a> {
    federal_table: &'a [TaxBracket],
    state_table: &'a [TaxBracket],
    config: UsConfig,
}

impl UsCalculator<'static> {
    /// Calculator over the built-in 2025 single-filer schedules.
    pub fn irs_ca_2025() -> Self {
        Self {
            federal_table: IRS_FEDERAL_SINGLE,
            state_table: CA_FTB_SINGLE,
            config: UsConfig::default(),
        }
    }
}

impl Default for UsCalculator<'static> {
    fn default() -> Self {
        Self::irs_ca_2025()
    }
}

impl<'a> UsCalculator<'a> {
    /// Creates a calculator over caller-supplied annual schedules. Rows must
    /// touch, starting at zero.
    pub fn new(
        federal_table: &'a [TaxBracket],
        state_table: &'a [TaxBracket],
        config: UsConfig,
    ) -> Result<Self, RegimeConfigError> {
        config.validate()?;
        validate_table(federal_table, Decimal::ZERO).map_err(|source| {
            RegimeConfigError::Table {
                name: "federal",
                source,
            }
        })?;
        validate_table(state_table, Decimal::ZERO)
            .map_err(|source| RegimeConfigError::Table { name: "state", source })?;
        Ok(Self {
            federal_table,
            state_table,
            config,
        })
    }

    pub fn config(&self) -> &UsConfig {
        &self.config
    }

    /// Computes the withholding for one pay period.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NonPositiveSalary`] when `salary <= 0` and
    /// [`PayrollError::SalaryOutOfRange`] when the annual income would not
    /// fit in a [`Decimal`].
    pub fn calculate(
        &self,
        salary: Decimal,
        pay_period: PayPeriod,
    ) -> Result<DeductionBreakdown, PayrollError> {
        if salary <= Decimal::ZERO {
            return Err(PayrollError::NonPositiveSalary(salary));
        }

        let periods = periods_per_year(pay_period);
        let annual_income = salary
            .checked_mul(periods)
            .ok_or(PayrollError::SalaryOutOfRange(salary))?;
        let annual = self.annual_components(annual_income);

        let per_period = |amount: Decimal| round_units(amount / periods);
        let deductions = vec![
            DeductionLine::new(FEDERAL_INCOME_TAX_LABEL, per_period(annual.federal_income_tax)),
            DeductionLine::new(SOCIAL_SECURITY_LABEL, per_period(annual.social_security)),
            DeductionLine::new(MEDICARE_LABEL, per_period(annual.medicare)),
            DeductionLine::new(CA_STATE_TAX_LABEL, per_period(annual.state_income_tax)),
            DeductionLine::new(CA_SDI_LABEL, per_period(annual.sdi)),
        ];

        let total_deductions: Decimal = deductions.iter().map(|line| line.amount).sum();
        let net_periodic = salary - total_deductions;

        debug!(
            salary = %salary,
            pay_period = %pay_period,
            annual_income = %annual_income,
            federal_income_tax = %annual.federal_income_tax,
            state_income_tax = %annual.state_income_tax,
            total_deductions = %total_deductions,
            "calculated IRS+CA withholding"
        );

        let profile = Country::UnitedStates.profile();
        Ok(DeductionBreakdown {
            country: profile.country,
            currency: profile.currency,
            regime_label: profile.regime_label.to_string(),
            gross_periodic: salary,
            deductions,
            total_deductions,
            net_periodic,
            effective_rate_percent: percent_of(total_deductions, salary),
            federal_rate_percent: Some(percent_of(annual.federal_income_tax, annual_income)),
            state_rate_percent: Some(percent_of(annual.state_income_tax, annual_income)),
        })
    }

    fn annual_components(
        &self,
        annual_income: Decimal,
    ) -> AnnualComponents {
        let federal_taxable =
            non_negative(annual_income - self.config.federal_standard_deduction);
        let state_taxable = non_negative(annual_income - self.config.state_standard_deduction);

        AnnualComponents {
            federal_income_tax: progressive_tax(federal_taxable, self.federal_table),
            social_security: self.social_security(annual_income),
            medicare: self.medicare(annual_income),
            state_income_tax: progressive_tax(state_taxable, self.state_table),
            sdi: annual_income * self.config.sdi_rate,
        }
    }

    fn social_security(
        &self,
        annual_income: Decimal,
    ) -> Decimal {
        annual_income.min(self.config.social_security_wage_base) * self.config.social_security_rate
    }

    fn medicare(
        &self,
        annual_income: Decimal,
    ) -> Decimal {
        let surtax_base = non_negative(annual_income - self.config.additional_medicare_threshold);
        annual_income * self.config.medicare_rate + surtax_base * self.config.additional_medicare_rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::TableError;

    fn calculator() -> UsCalculator<'static> {
        UsCalculator::irs_ca_2025()
    }

    // =========================================================================
    // UsConfig tests
    // =========================================================================

    #[test]
    fn default_config_is_valid() {
        assert_eq!(UsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_standard_deduction() {
        let config = UsConfig {
            state_standard_deduction: dec!(-1),
            ..UsConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(RegimeConfigError::Negative {
                name: "state_standard_deduction",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_zero_wage_base() {
        let config = UsConfig {
            social_security_wage_base: Decimal::ZERO,
            ..UsConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(RegimeConfigError::NonPositive {
                name: "social_security_wage_base",
                value: Decimal::ZERO,
            })
        );
    }

    #[test]
    fn validate_rejects_percentage_written_as_whole_number() {
        let config = UsConfig {
            sdi_rate: dec!(1.1),
            ..UsConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(RegimeConfigError::RateOutOfRange {
                name: "sdi_rate",
                value: dec!(1.1),
            })
        );
    }

    // =========================================================================
    // new tests
    // =========================================================================

    #[test]
    fn new_rejects_gapped_schedule() {
        let rows = [
            TaxBracket {
                lower_bound: dec!(0),
                upper_bound: Some(dec!(100)),
                base_amount: dec!(0),
                rate: dec!(0.10),
            },
            TaxBracket {
                lower_bound: dec!(100.01),
                upper_bound: None,
                base_amount: dec!(10),
                rate: dec!(0.20),
            },
        ];

        let result = UsCalculator::new(IRS_FEDERAL_SINGLE, &rows, UsConfig::default());

        assert_eq!(
            result.map(|_| ()),
            Err(RegimeConfigError::Table {
                name: "state",
                source: TableError::Discontinuous {
                    index: 1,
                    expected: dec!(100),
                    found: dec!(100.01),
                },
            })
        );
    }

    #[test]
    fn new_accepts_builtin_schedules() {
        assert!(UsCalculator::new(IRS_FEDERAL_SINGLE, CA_FTB_SINGLE, UsConfig::default()).is_ok());
    }

    // =========================================================================
    // component tests
    // =========================================================================

    #[test]
    fn periods_per_year_by_cadence() {
        assert_eq!(periods_per_year(PayPeriod::Weekly), dec!(52));
        assert_eq!(periods_per_year(PayPeriod::Biweekly), dec!(26));
        assert_eq!(periods_per_year(PayPeriod::Monthly), dec!(12));
    }

    #[test]
    fn social_security_stops_at_wage_base() {
        assert_eq!(calculator().social_security(dec!(100000)), dec!(6200));
        assert_eq!(calculator().social_security(dec!(600000)), dec!(10918.2));
    }

    #[test]
    fn medicare_surtax_applies_above_threshold_only() {
        assert_eq!(calculator().medicare(dec!(200000)), dec!(2900));
        assert_eq!(calculator().medicare(dec!(300000)), dec!(5250));
    }

    #[test]
    fn standard_deductions_shield_low_income() {
        let annual = calculator().annual_components(dec!(5200));

        assert_eq!(annual.federal_income_tax, Decimal::ZERO);
        assert_eq!(annual.state_income_tax, Decimal::ZERO);
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_rejects_negative_salary() {
        assert_eq!(
            calculator().calculate(dec!(-1), PayPeriod::Weekly),
            Err(PayrollError::NonPositiveSalary(dec!(-1)))
        );
    }

    #[test]
    fn calculate_biweekly_near_250k() {
        let breakdown = calculator().calculate(dec!(9615.38), PayPeriod::Biweekly).unwrap();

        assert_eq!(
            breakdown.deductions,
            vec![
                DeductionLine::new(FEDERAL_INCOME_TAX_LABEL, dec!(2010)),
                DeductionLine::new(SOCIAL_SECURITY_LABEL, dec!(420)),
                DeductionLine::new(MEDICARE_LABEL, dec!(157)),
                DeductionLine::new(CA_STATE_TAX_LABEL, dec!(742)),
                DeductionLine::new(CA_SDI_LABEL, dec!(106)),
            ]
        );
        assert_eq!(breakdown.total_deductions, dec!(3435));
        assert_eq!(breakdown.net_periodic, dec!(6180.38));
        assert_eq!(breakdown.gross_periodic, dec!(9615.38));
        assert_eq!(breakdown.effective_rate_percent, dec!(35.7));
        assert_eq!(breakdown.federal_rate_percent, Some(dec!(20.9)));
        assert_eq!(breakdown.state_rate_percent, Some(dec!(7.7)));
    }

    #[test]
    fn calculate_monthly_caps_social_security() {
        let high = calculator().calculate(dec!(50000), PayPeriod::Monthly).unwrap();
        let lower = calculator().calculate(dec!(20000), PayPeriod::Monthly).unwrap();

        assert_eq!(high.deduction(CA_SDI_LABEL), Some(dec!(550)));
        assert_eq!(high.deduction(SOCIAL_SECURITY_LABEL), Some(dec!(910)));
        assert_eq!(lower.deduction(SOCIAL_SECURITY_LABEL), Some(dec!(910)));
    }

    #[test]
    fn calculate_weekly_low_income() {
        let breakdown = calculator().calculate(dec!(100), PayPeriod::Weekly).unwrap();

        assert_eq!(breakdown.deduction(FEDERAL_INCOME_TAX_LABEL), Some(Decimal::ZERO));
        assert_eq!(breakdown.deduction(SOCIAL_SECURITY_LABEL), Some(dec!(6)));
        assert_eq!(breakdown.deduction(MEDICARE_LABEL), Some(dec!(1)));
        assert_eq!(breakdown.deduction(CA_SDI_LABEL), Some(dec!(1)));
        assert_eq!(breakdown.total_deductions, dec!(8));
        assert_eq!(breakdown.net_periodic, dec!(92));
        assert_eq!(breakdown.federal_rate_percent, Some(Decimal::ZERO));
        assert_eq!(breakdown.state_rate_percent, Some(Decimal::ZERO));
    }

    #[test]
    fn calculate_reports_usd_regime() {
        let breakdown = calculator().calculate(dec!(5000), PayPeriod::Monthly).unwrap();

        assert_eq!(breakdown.country, Country::UnitedStates);
        assert_eq!(breakdown.regime_label, "IRS+CA");
        assert!(breakdown.credits().next().is_none());
    }

    #[test]
    fn calculate_rejects_salary_too_large_to_annualize() {
        let salary = Decimal::MAX / dec!(10);

        assert_eq!(
            calculator().calculate(salary, PayPeriod::Weekly),
            Err(PayrollError::SalaryOutOfRange(salary))
        );
    }
}
