//! Payroll runs: calculating every selected employee and aggregating the
//! results into the totals a payroll cut stores.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::PayrollEngine;
use crate::error::PayrollRunError;
use crate::models::{
    Country, CutScope, CutStatus, DeductionBreakdown, Employee, EmployeeIncomeInput,
    NewPayrollCut, PayPeriod,
};

/// Which active employees a run covers. `None` means every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollSelection {
    pub country: Option<Country>,
    pub pay_period: Option<PayPeriod>,
}

impl PayrollSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> CutScope {
        CutScope::from(self.country)
    }

    fn matches(
        &self,
        input: &EmployeeIncomeInput,
    ) -> bool {
        self.country.is_none_or(|country| country == input.country)
            && self.pay_period.is_none_or(|period| period == input.pay_period)
    }
}

/// One employee's result within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayroll {
    pub employee_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub breakdown: DeductionBreakdown,
}

/// Summed amounts over a set of results.
///
/// Amounts are added as plain numbers. A run spanning both countries mixes
/// MXN and USD in the same total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollTotals {
    pub employee_count: i64,
    pub gross_total: Decimal,
    pub total_deductions: Decimal,
    pub net_total: Decimal,
}

impl PayrollTotals {
    fn add(
        &mut self,
        breakdown: &DeductionBreakdown,
    ) {
        self.employee_count += 1;
        self.gross_total += breakdown.gross_periodic;
        self.total_deductions += breakdown.total_deductions;
        self.net_total += breakdown.net_periodic;
    }
}

impl<'r> FromIterator<&'r EmployeePayroll> for PayrollTotals {
    fn from_iter<I: IntoIterator<Item = &'r EmployeePayroll>>(iter: I) -> Self {
        let mut totals = Self::default();
        for result in iter {
            totals.add(&result.breakdown);
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTotals {
    /// `None` groups employees without a location.
    pub location: Option<String>,
    pub totals: PayrollTotals,
}

/// The calculated results of one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    selection: PayrollSelection,
    results: Vec<EmployeePayroll>,
}

impl PayrollRun {
    /// Calculates every active employee that matches `selection`.
    ///
    /// Every active employee's stored labels are validated, including those
    /// the selection leaves out.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollRunError::InvalidEmployee`] for the first active
    /// employee whose record cannot be calculated.
    pub fn compute(
        engine: &PayrollEngine<'_>,
        employees: &[Employee],
        selection: PayrollSelection,
    ) -> Result<Self, PayrollRunError> {
        let mut results = Vec::new();

        for employee in employees.iter().filter(|e| e.is_active()) {
            let invalid = |source| PayrollRunError::InvalidEmployee {
                employee_id: employee.id,
                source,
            };
            let input = employee.income_input().map_err(invalid)?;
            if !selection.matches(&input) {
                continue;
            }
            let breakdown = engine.calculate(&input).map_err(invalid)?;
            debug!(
                employee_id = employee.id,
                net = %breakdown.net_periodic,
                currency = %breakdown.currency,
                "calculated employee payroll"
            );
            results.push(EmployeePayroll {
                employee_id: employee.id,
                name: employee.name.clone(),
                location: employee.location.clone(),
                breakdown,
            });
        }

        info!(
            scope = %selection.scope(),
            employees = results.len(),
            "payroll run computed"
        );
        Ok(Self { selection, results })
    }

    pub fn selection(&self) -> PayrollSelection {
        self.selection
    }

    pub fn results(&self) -> &[EmployeePayroll] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn totals(&self) -> PayrollTotals {
        self.results.iter().collect()
    }

    pub fn totals_for(
        &self,
        country: Country,
    ) -> PayrollTotals {
        self.results
            .iter()
            .filter(|r| r.breakdown.country == country)
            .collect()
    }

    /// Totals grouped by location, ordered by location name with the
    /// unassigned group first.
    pub fn by_location(&self) -> Vec<LocationTotals> {
        let mut groups: BTreeMap<Option<&str>, PayrollTotals> = BTreeMap::new();
        for result in &self.results {
            groups
                .entry(result.location.as_deref())
                .or_default()
                .add(&result.breakdown);
        }
        groups
            .into_iter()
            .map(|(location, totals)| LocationTotals {
                location: location.map(str::to_string),
                totals,
            })
            .collect()
    }

    /// Builds the pending payroll cut recording this run's totals.
    pub fn to_new_cut(
        &self,
        period_label: &str,
        cut_date: NaiveDate,
        created_by: &str,
    ) -> NewPayrollCut {
        let totals = self.totals();
        NewPayrollCut {
            period_label: period_label.to_string(),
            pay_period: self.selection.pay_period,
            scope: self.selection.scope(),
            employee_count: totals.employee_count,
            gross_total: totals.gross_total,
            total_deductions: totals.total_deductions,
            net_total: totals.net_total,
            status: CutStatus::Pending,
            cut_date,
            created_by: created_by.to_string(),
        }
    }
}
