//! Rendering of payroll runs for the command line, as plain text or JSON.

use std::fmt;

use payroll_core::calculations::{
    EmployeePayroll, LocationTotals, PayrollRun, PayrollSelection, PayrollTotals,
};
use payroll_core::{Country, Currency, PayPeriod, PayrollError};
use serde::Serialize;

/// Builds a run selection from optional command-line labels.
///
/// A pay-period label is checked against the selected country's labels, or
/// against every country's labels when no country is given, so `quincenal`
/// selects biweekly payrolls.
pub fn parse_selection(
    country: Option<&str>,
    pay_period: Option<&str>,
) -> Result<PayrollSelection, PayrollError> {
    let country = country.map(Country::parse).transpose()?;
    let pay_period = match (pay_period, country) {
        (None, _) => None,
        (Some(label), Some(country)) => Some(PayPeriod::parse_for(country, label)?),
        // Mexico's labels are a superset, so its error is the one reported.
        (Some(label), None) => Some(
            Country::all()
                .iter()
                .find_map(|country| PayPeriod::parse_for(*country, label).ok())
                .map_or_else(|| PayPeriod::parse_for(Country::Mexico, label), Ok)?,
        ),
    };

    Ok(PayrollSelection {
        country,
        pay_period,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryTotals {
    pub country: Country,
    pub currency: Currency,
    pub totals: PayrollTotals,
}

/// Serializable summary of a run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub selection: PayrollSelection,
    pub results: &'a [EmployeePayroll],
    pub totals: PayrollTotals,
    pub by_country: Vec<CountryTotals>,
    pub by_location: Vec<LocationTotals>,
}

impl<'a> RunReport<'a> {
    pub fn new(run: &'a PayrollRun) -> Self {
        let by_country = Country::all()
            .iter()
            .map(|country| CountryTotals {
                country: *country,
                currency: country.currency(),
                totals: run.totals_for(*country),
            })
            .filter(|c| c.totals.employee_count > 0)
            .collect();

        Self {
            selection: run.selection(),
            results: run.results(),
            totals: run.totals(),
            by_country,
            by_location: run.by_location(),
        }
    }
}

/// Human-readable rendering of a run: one block per employee, then totals.
pub struct TextReport<'a>(pub &'a RunReport<'a>);

impl fmt::Display for TextReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let report = self.0;

        if report.results.is_empty() {
            return writeln!(f, "No active employees match the selection.");
        }

        for result in report.results {
            let b = &result.breakdown;
            writeln!(
                f,
                "#{} {} [{}] {} {}",
                result.employee_id,
                result.name,
                result.location.as_deref().unwrap_or("-"),
                b.regime_label,
                b.currency
            )?;
            writeln!(f, "  {:<32} {:>12}", "Gross", b.gross_periodic)?;
            for line in &b.deductions {
                writeln!(f, "  {:<32} {:>12}", line.label, line.amount)?;
            }
            writeln!(f, "  {:<32} {:>12}", "Total deductions", b.total_deductions)?;
            writeln!(f, "  {:<32} {:>12}", "Net", b.net_periodic)?;
            write!(f, "  Effective rate {}%", b.effective_rate_percent)?;
            if let (Some(federal), Some(state)) = (b.federal_rate_percent, b.state_rate_percent) {
                write!(f, " (federal {}%, state {}%)", federal, state)?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }

        for country in &report.by_country {
            write_totals(f, &format!("{} ({})", country.country, country.currency), &country.totals)?;
        }
        for location in &report.by_location {
            let name = location.location.as_deref().unwrap_or("No location");
            write_totals(f, name, &location.totals)?;
        }
        write_totals(f, "All employees", &report.totals)
    }
}

fn write_totals(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    totals: &PayrollTotals,
) -> fmt::Result {
    writeln!(
        f,
        "{:<24} employees {:>4}  gross {:>12}  deductions {:>10}  net {:>12}",
        heading,
        totals.employee_count,
        totals.gross_total,
        totals.total_deductions,
        totals.net_total
    )
}
