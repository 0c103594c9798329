use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Country;

/// Errors raised while validating an employee's income input or running a
/// regime calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollError {
    /// Salary must be strictly positive.
    #[error("salary must be positive, got {0}")]
    NonPositiveSalary(Decimal),

    /// Salary is too large to annualize without overflowing.
    #[error("salary {0} is too large to calculate")]
    SalaryOutOfRange(Decimal),

    /// The stored country code does not name a supported regime.
    #[error("unknown country '{0}'; expected MX or US")]
    UnknownCountry(String),

    /// The pay-period label is not one the country's regime accepts.
    #[error("pay period '{period}' is not valid for {country}")]
    UnsupportedPayPeriod { country: Country, period: String },

    /// The calculator was configured with out-of-range parameters or
    /// malformed tables.
    #[error("invalid regime configuration: {0}")]
    InvalidConfig(#[from] RegimeConfigError),
}

/// Errors from validating a regime's statutory parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeConfigError {
    #[error("{name} must be between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: Decimal },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: Decimal },

    #[error("{name} table is malformed: {source}")]
    Table {
        name: &'static str,
        #[source]
        source: TableError,
    },
}

/// Shape violations found in a bracket table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("table has no rows")]
    Empty,

    #[error("row {index} starts at {found}, expected {expected}")]
    Discontinuous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("row {index} has upper bound {upper} below its lower bound {lower}")]
    Inverted {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("row {0} is unbounded but is not the last row")]
    UnboundedInterior(usize),

    #[error("last row must be unbounded")]
    BoundedTop,
}

/// Errors raised while computing a payroll run over stored employees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollRunError {
    /// An active employee's stored record could not be calculated.
    #[error("employee {employee_id} cannot be processed: {source}")]
    InvalidEmployee {
        employee_id: i64,
        #[source]
        source: PayrollError,
    },
}
