use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Country, Currency};

/// A single itemized deduction. Negative amounts are credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub label: String,
    pub amount: Decimal,
}

impl DeductionLine {
    pub fn new(
        label: &str,
        amount: Decimal,
    ) -> Self {
        Self {
            label: label.to_string(),
            amount,
        }
    }

    pub fn is_credit(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Per-period result of a payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub country: Country,
    pub currency: Currency,
    pub regime_label: String,

    /// Gross pay reported for the period.
    pub gross_periodic: Decimal,

    /// Itemized deductions in display order.
    pub deductions: Vec<DeductionLine>,

    /// Amount withheld for the period, credits already netted.
    pub total_deductions: Decimal,

    /// `gross_periodic - total_deductions`.
    pub net_periodic: Decimal,

    pub effective_rate_percent: Decimal,

    /// Federal income tax as a share of annual income (US only).
    pub federal_rate_percent: Option<Decimal>,

    /// State income tax as a share of annual income (US only).
    pub state_rate_percent: Option<Decimal>,
}

impl DeductionBreakdown {
    /// Amount of the line with the given label, if present.
    pub fn deduction(
        &self,
        label: &str,
    ) -> Option<Decimal> {
        self.deductions
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.amount)
    }

    pub fn credits(&self) -> impl Iterator<Item = &DeductionLine> {
        self.deductions.iter().filter(|line| line.is_credit())
    }
}
