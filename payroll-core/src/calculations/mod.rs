//! Payroll withholding calculators.
//!
//! [`PayrollEngine`] dispatches to [`MexicoCalculator`] (SAT, IMSS and
//! Subsidio al Empleo) or [`UsCalculator`] (IRS, FICA, California FTB and
//! SDI). [`PayrollRun`] applies the engine over a roster and aggregates the
//! results for a payroll cut.

pub mod common;
pub mod engine;
pub mod mexico;
pub mod progressive;
pub mod run;
pub mod united_states;

pub use engine::{PayrollEngine, calculate_payroll};
pub use mexico::{MexicoCalculator, MexicoConfig};
pub use progressive::progressive_tax;
pub use run::{EmployeePayroll, LocationTotals, PayrollRun, PayrollSelection, PayrollTotals};
pub use united_states::{UsCalculator, UsConfig, periods_per_year};
