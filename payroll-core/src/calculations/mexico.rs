//! Mexican payroll withholding: IMSS employee quotas, ISR Art. 96 LISR and
//! the Subsidio al Empleo credit.
//!
//! All tax math runs on the salary as paid for the period, against the SAT
//! monthly tables. Each figure is then divided by the number of periods in a
//! month and rounded to whole pesos for the slip.
//!
//! | Step | Figure |
//! |------|--------|
//! | 1 | `base = round(salary / divisor)` (weekly 4.33, biweekly 2, monthly 1) |
//! | 2 | IMSS on `min(salary, UMA × 25 × 30)`, total rounded to cents |
//! | 3 | `taxable = salary - imss_total` |
//! | 4 | `gross_isr = round2(cuota fija + (taxable - lower) × rate)` |
//! | 5 | `net_isr = max(0, gross_isr - subsidy)` |
//! | 6 | Line items, each `round(x / divisor)`; subsidy reported negative |
//! | 7 | `total = round((imss_total + net_isr) / divisor)`, `net = base - total` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::PayPeriod;
//! use payroll_core::calculations::MexicoCalculator;
//!
//! let calculator = MexicoCalculator::sat_2025();
//! let breakdown = calculator.calculate(dec!(25000), PayPeriod::Biweekly).unwrap();
//!
//! assert_eq!(breakdown.gross_periodic, dec!(12500));
//! assert_eq!(breakdown.total_deductions, dec!(2069));
//! assert_eq!(breakdown.net_periodic, dec!(10431));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, percent_of, round_cents, round_units};
use crate::error::{PayrollError, RegimeConfigError};
use crate::models::{
    BracketRange, Country, DeductionBreakdown, DeductionLine, PayPeriod, SubsidyRow, TaxBracket,
};
use crate::tables::{MX_ROW_GAP, SAT_EMPLOYMENT_SUBSIDY, SAT_ISR, validate_table};

pub const ISR_LABEL: &str = "ISR Art. 96 LISR";
pub const IMSS_SICKNESS_MATERNITY_LABEL: &str = "IMSS Enf. y Maternidad";
pub const IMSS_DISABILITY_LIFE_LABEL: &str = "IMSS Invalidez y Vida";
pub const IMSS_UNEMPLOYMENT_OLD_AGE_LABEL: &str = "IMSS Cesantía y Vejez";
pub const EMPLOYMENT_SUBSIDY_LABEL: &str = "Subsidio al Empleo";

/// Statutory parameters for the Mexican regime.
///
/// [`Default`] carries the 2025 values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MexicoConfig {
    /// Weekly pay periods per month.
    pub weeks_per_month: Decimal,

    /// Daily value of the UMA (Unidad de Medida y Actualización).
    pub uma_daily: Decimal,

    /// Contribution base ceiling, in UMAs.
    pub contribution_ceiling_umas: Decimal,

    pub days_per_month: Decimal,

    /// Enfermedad y maternidad, gastos médicos para pensionados.
    pub medical_expenses_rate: Decimal,

    /// Enfermedad y maternidad, prestaciones en dinero.
    pub cash_benefits_rate: Decimal,

    pub disability_life_rate: Decimal,

    pub unemployment_old_age_rate: Decimal,
}

impl Default for MexicoConfig {
    fn default() -> Self {
        Self {
            weeks_per_month: dec!(4.33),
            uma_daily: dec!(113.14),
            contribution_ceiling_umas: dec!(25),
            days_per_month: dec!(30),
            medical_expenses_rate: dec!(0.00375),
            cash_benefits_rate: dec!(0.0025),
            disability_life_rate: dec!(0.00625),
            unemployment_old_age_rate: dec!(0.01125),
        }
    }
}

impl MexicoConfig {
    /// Validates that every rate is a fraction in `[0, 1]` and that the
    /// divisor and ceiling inputs are positive.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use payroll_core::RegimeConfigError;
    /// use payroll_core::calculations::MexicoConfig;
    ///
    /// let config = MexicoConfig {
    ///     disability_life_rate: dec!(0.00625),
    ///     ..MexicoConfig::default()
    /// };
    /// assert!(config.validate().is_ok());
    ///
    /// let config = MexicoConfig {
    ///     disability_life_rate: dec!(62.5),
    ///     ..MexicoConfig::default()
    /// };
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(RegimeConfigError::RateOutOfRange {
    ///         name: "disability_life_rate",
    ///         value: dec!(62.5),
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        for (name, value) in [
            ("weeks_per_month", self.weeks_per_month),
            ("uma_daily", self.uma_daily),
            ("contribution_ceiling_umas", self.contribution_ceiling_umas),
            ("days_per_month", self.days_per_month),
        ] {
            if value <= Decimal::ZERO {
                return Err(RegimeConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("medical_expenses_rate", self.medical_expenses_rate),
            ("cash_benefits_rate", self.cash_benefits_rate),
            ("disability_life_rate", self.disability_life_rate),
            ("unemployment_old_age_rate", self.unemployment_old_age_rate),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RegimeConfigError::RateOutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Monthly salary ceiling for IMSS contributions.
    pub fn contribution_ceiling(&self) -> Decimal {
        self.uma_daily * self.contribution_ceiling_umas * self.days_per_month
    }

    /// Number of `period` occurrences in a month.
    pub fn periods_per_month(
        &self,
        period: PayPeriod,
    ) -> Decimal {
        match period {
            PayPeriod::Weekly => self.weeks_per_month,
            PayPeriod::Biweekly => Decimal::TWO,
            PayPeriod::Monthly => Decimal::ONE,
        }
    }
}

/// IMSS employee quotas for one salary, before pro-rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ImssContributions {
    sickness_maternity: Decimal,
    disability_life: Decimal,
    unemployment_old_age: Decimal,
    /// Sum of the three, rounded to cents.
    total: Decimal,
}

/// Calculator for the SAT MX regime.
#[derive(Debug, Clone)]
pub struct MexicoCalculator<'a> {
    isr_table: &'a [TaxBracket],
    subsidy_table: &'a [SubsidyRow],
    config: MexicoConfig,
}

impl MexicoCalculator<'static> {
    /// Calculator over the built-in 2025 SAT tables and default parameters.
    pub fn sat_2025() -> Self {
        Self {
            isr_table: SAT_ISR,
            subsidy_table: SAT_EMPLOYMENT_SUBSIDY,
            config: MexicoConfig::default(),
        }
    }
}

impl Default for MexicoCalculator<'static> {
    fn default() -> Self {
        Self::sat_2025()
    }
}

impl<'a> MexicoCalculator<'a> {
    /// Creates a calculator over caller-supplied tables.
    ///
    /// Both tables must start at zero, keep the one-cent SAT row gap and end
    /// with an unbounded row.
    pub fn new(
        isr_table: &'a [TaxBracket],
        subsidy_table: &'a [SubsidyRow],
        config: MexicoConfig,
    ) -> Result<Self, RegimeConfigError> {
        config.validate()?;
        validate_table(isr_table, MX_ROW_GAP)
            .map_err(|source| RegimeConfigError::Table { name: "ISR", source })?;
        validate_table(subsidy_table, MX_ROW_GAP).map_err(|source| RegimeConfigError::Table {
            name: "employment subsidy",
            source,
        })?;
        Ok(Self {
            isr_table,
            subsidy_table,
            config,
        })
    }

    pub fn config(&self) -> &MexicoConfig {
        &self.config
    }

    /// Computes the withholding for one pay period.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NonPositiveSalary`] when `salary <= 0`.
    pub fn calculate(
        &self,
        salary: Decimal,
        pay_period: PayPeriod,
    ) -> Result<DeductionBreakdown, PayrollError> {
        if salary <= Decimal::ZERO {
            return Err(PayrollError::NonPositiveSalary(salary));
        }

        let divisor = self.config.periods_per_month(pay_period);
        let base = round_units(salary / divisor);

        let imss = self.imss_contributions(salary);
        let taxable_base = salary - imss.total;
        let gross_isr = self.gross_isr(taxable_base);
        let subsidy = self.employment_subsidy(taxable_base);
        let net_isr = non_negative(gross_isr - subsidy);

        let per_period = |amount: Decimal| round_units(amount / divisor);
        let deductions = vec![
            DeductionLine::new(ISR_LABEL, per_period(net_isr)),
            DeductionLine::new(IMSS_SICKNESS_MATERNITY_LABEL, per_period(imss.sickness_maternity)),
            DeductionLine::new(IMSS_DISABILITY_LIFE_LABEL, per_period(imss.disability_life)),
            DeductionLine::new(
                IMSS_UNEMPLOYMENT_OLD_AGE_LABEL,
                per_period(imss.unemployment_old_age),
            ),
            DeductionLine::new(EMPLOYMENT_SUBSIDY_LABEL, Decimal::ZERO - per_period(subsidy)),
        ];

        let total_deductions = per_period(imss.total + net_isr);
        let net_periodic = base - total_deductions;
        let effective_rate_percent = percent_of(total_deductions, base);

        debug!(
            salary = %salary,
            pay_period = %pay_period,
            imss_total = %imss.total,
            taxable_base = %taxable_base,
            gross_isr = %gross_isr,
            subsidy = %subsidy,
            total_deductions = %total_deductions,
            "calculated SAT MX withholding"
        );

        let profile = Country::Mexico.profile();
        Ok(DeductionBreakdown {
            country: profile.country,
            currency: profile.currency,
            regime_label: profile.regime_label.to_string(),
            gross_periodic: base,
            deductions,
            total_deductions,
            net_periodic,
            effective_rate_percent,
            federal_rate_percent: None,
            state_rate_percent: None,
        })
    }

    fn imss_contributions(
        &self,
        salary: Decimal,
    ) -> ImssContributions {
        let contribution_base = salary.min(self.config.contribution_ceiling());
        let sickness_maternity = contribution_base * self.config.medical_expenses_rate
            + contribution_base * self.config.cash_benefits_rate;
        let disability_life = contribution_base * self.config.disability_life_rate;
        let unemployment_old_age = contribution_base * self.config.unemployment_old_age_rate;

        ImssContributions {
            sickness_maternity,
            disability_life,
            unemployment_old_age,
            total: round_cents(sickness_maternity + disability_life + unemployment_old_age),
        }
    }

    /// ISR before the subsidy, rounded to cents.
    fn gross_isr(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        select_row("ISR", self.isr_table, taxable_base)
            .map_or(Decimal::ZERO, |row| round_cents(row.tax_at(taxable_base)))
    }

    fn employment_subsidy(
        &self,
        taxable_base: Decimal,
    ) -> Decimal {
        select_row("employment subsidy", self.subsidy_table, taxable_base)
            .map_or(Decimal::ZERO, |row| row.amount)
    }
}

/// Finds the row whose closed `[lower, upper]` range holds `base`.
///
/// A base that lands in the one-cent gap between two rows takes the
/// preceding row. A base below every row takes the last row.
fn select_row<'t, T: BracketRange>(
    table: &'static str,
    rows: &'t [T],
    base: Decimal,
) -> Option<&'t T> {
    let matched = rows.iter().find(|row| {
        base >= row.lower_bound() && row.upper_bound().is_none_or(|upper| base <= upper)
    });
    if let Some(row) = matched {
        debug!(table, base = %base, lower_bound = %row.lower_bound(), "selected table row");
        return Some(row);
    }

    if let Some(row) = rows.iter().rev().find(|row| row.lower_bound() <= base) {
        warn!(
            table,
            base = %base,
            lower_bound = %row.lower_bound(),
            "base falls between table rows; using preceding row"
        );
        return Some(row);
    }

    let last = rows.last();
    warn!(
        table,
        base = %base,
        lower_bound = ?last.map(|row| row.lower_bound()),
        "base is below every table row; using last row"
    );
    last
}
