use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Country, PayPeriod};

/// Which employees a payroll cut covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutScope {
    Country(Country),
    All,
}

impl CutScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country(country) => country.as_str(),
            Self::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "all" => Some(Self::All),
            other => Country::parse(other).ok().map(Self::Country),
        }
    }
}

impl From<Option<Country>> for CutScope {
    fn from(country: Option<Country>) -> Self {
        country.map_or(Self::All, Self::Country)
    }
}

impl fmt::Display for CutScope {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CutStatus {
    #[default]
    Pending,
    Paid,
}

impl CutStatus {
    /// Storage label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Paid => "pagado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendiente" => Some(Self::Pending),
            "pagado" => Some(Self::Paid),
            _ => None,
        }
    }
}

/// Persisted aggregate of one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCut {
    pub id: i64,
    pub period_label: String,
    /// `None` when the run covered every pay period.
    pub pay_period: Option<PayPeriod>,
    pub scope: CutScope,
    pub employee_count: i64,
    pub gross_total: Decimal,
    pub total_deductions: Decimal,
    pub net_total: Decimal,
    pub status: CutStatus,
    pub cut_date: NaiveDate,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// For creating new payroll cuts (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayrollCut {
    pub period_label: String,
    pub pay_period: Option<PayPeriod>,
    pub scope: CutScope,
    pub employee_count: i64,
    pub gross_total: Decimal,
    pub total_deductions: Decimal,
    pub net_total: Decimal,
    pub status: CutStatus,
    pub cut_date: NaiveDate,
    pub created_by: String,
}
