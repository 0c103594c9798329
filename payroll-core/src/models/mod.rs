mod deduction_breakdown;
mod employee;
mod payroll_cut;
mod regime;
mod tax_bracket;

pub use deduction_breakdown::{DeductionBreakdown, DeductionLine};
pub use employee::{Employee, EmployeeIncomeInput, EmployeeStatus, NewEmployee};
pub use payroll_cut::{CutScope, CutStatus, NewPayrollCut, PayrollCut};
pub use regime::{Country, Currency, PayPeriod, REGIMES, RegimeProfile};
pub use tax_bracket::{BracketRange, SubsidyRow, TaxBracket};
