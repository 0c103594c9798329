use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive tax table.
///
/// `upper_bound` of `None` means the row is unbounded above. `rate` is a
/// fraction (`0.0192` for 1.92%) and `base_amount` is the cumulative tax owed
/// at `lower_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub base_amount: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Closed-interval membership: `lower_bound <= base <= upper_bound`.
    pub fn contains(
        &self,
        base: Decimal,
    ) -> bool {
        base >= self.lower_bound && self.upper_bound.is_none_or(|upper| base <= upper)
    }

    /// Tax owed at `base` using this row's fixed amount plus the marginal
    /// rate on the excess over `lower_bound`. Not rounded.
    pub fn tax_at(
        &self,
        base: Decimal,
    ) -> Decimal {
        self.base_amount + (base - self.lower_bound) * self.rate
    }
}

/// One row of the Mexican employment subsidy (Subsidio al Empleo) table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidyRow {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub amount: Decimal,
}

impl SubsidyRow {
    pub fn contains(
        &self,
        base: Decimal,
    ) -> bool {
        base >= self.lower_bound && self.upper_bound.is_none_or(|upper| base <= upper)
    }
}

/// Shared view over table rows so lookups and shape checks work on both
/// [`TaxBracket`] and [`SubsidyRow`] tables.
pub trait BracketRange {
    fn lower_bound(&self) -> Decimal;
    fn upper_bound(&self) -> Option<Decimal>;
}

impl BracketRange for TaxBracket {
    fn lower_bound(&self) -> Decimal {
        self.lower_bound
    }

    fn upper_bound(&self) -> Option<Decimal> {
        self.upper_bound
    }
}

impl BracketRange for SubsidyRow {
    fn lower_bound(&self) -> Decimal {
        self.lower_bound
    }

    fn upper_bound(&self) -> Option<Decimal> {
        self.upper_bound
    }
}
