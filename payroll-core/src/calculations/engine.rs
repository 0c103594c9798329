use crate::calculations::{MexicoCalculator, UsCalculator};
use crate::error::PayrollError;
use crate::models::{Country, DeductionBreakdown, Employee, EmployeeIncomeInput};

/// Routes an employee's income to the calculator for their country.
///
/// The engine is immutable after construction and holds only shared
/// references to its tables, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct PayrollEngine<'a> {
    mexico: MexicoCalculator<'a>,
    united_states: UsCalculator<'a>,
}

impl Default for PayrollEngine<'static> {
    /// Engine over the built-in 2025 tables and parameters.
    fn default() -> Self {
        Self {
            mexico: MexicoCalculator::sat_2025(),
            united_states: UsCalculator::irs_ca_2025(),
        }
    }
}

impl<'a> PayrollEngine<'a> {
    pub fn new(
        mexico: MexicoCalculator<'a>,
        united_states: UsCalculator<'a>,
    ) -> Self {
        Self {
            mexico,
            united_states,
        }
    }

    /// Calculates one pay period for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NonPositiveSalary`] if the input bypassed
    /// [`EmployeeIncomeInput::new`] with a salary of zero or less, and
    /// [`PayrollError::SalaryOutOfRange`] for a US salary too large to
    /// annualize.
    pub fn calculate(
        &self,
        input: &EmployeeIncomeInput,
    ) -> Result<DeductionBreakdown, PayrollError> {
        match input.country {
            Country::Mexico => self.mexico.calculate(input.salary, input.pay_period),
            Country::UnitedStates => self.united_states.calculate(input.salary, input.pay_period),
        }
    }

    /// Validates a stored employee's labels and calculates their pay period.
    pub fn calculate_employee(
        &self,
        employee: &Employee,
    ) -> Result<DeductionBreakdown, PayrollError> {
        self.calculate(&employee.income_input()?)
    }
}

/// Calculates one pay period with the default 2025 engine.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{Currency, EmployeeIncomeInput, calculate_payroll};
///
/// let input = EmployeeIncomeInput::from_labels(dec!(25000), "quincenal", "MX").unwrap();
/// let breakdown = calculate_payroll(&input).unwrap();
///
/// assert_eq!(breakdown.currency, Currency::Mxn);
/// assert_eq!(breakdown.net_periodic, dec!(10431));
/// ```
pub fn calculate_payroll(input: &EmployeeIncomeInput) -> Result<DeductionBreakdown, PayrollError> {
    PayrollEngine::default().calculate(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Currency, EmployeeStatus, PayPeriod};

    fn employee(
        salary: rust_decimal::Decimal,
        pay_period: &str,
        country: &str,
    ) -> Employee {
        Employee {
            id: 1,
            name: "Test".to_string(),
            role: "Engineer".to_string(),
            department: None,
            location: None,
            salary,
            pay_period: pay_period.to_string(),
            country: country.to_string(),
            status: EmployeeStatus::Active,
            hire_date: None,
        }
    }

    #[test]
    fn routes_mexico_to_sat_regime() {
        let input = EmployeeIncomeInput::new(dec!(25000), PayPeriod::Biweekly, Country::Mexico).unwrap();

        let breakdown = calculate_payroll(&input).unwrap();

        assert_eq!(breakdown.country, Country::Mexico);
        assert_eq!(breakdown.currency, Currency::Mxn);
        assert_eq!(breakdown.regime_label, "SAT MX");
    }

    #[test]
    fn routes_united_states_to_irs_ca_regime() {
        let input =
            EmployeeIncomeInput::new(dec!(9615.38), PayPeriod::Biweekly, Country::UnitedStates)
                .unwrap();

        let breakdown = calculate_payroll(&input).unwrap();

        assert_eq!(breakdown.country, Country::UnitedStates);
        assert_eq!(breakdown.currency, Currency::Usd);
        assert_eq!(breakdown.regime_label, "IRS+CA");
    }

    #[test]
    fn same_salary_and_cadence_differ_by_regime() {
        let engine = PayrollEngine::default();
        let mx = engine.calculate_employee(&employee(dec!(20000), "mensual", "MX")).unwrap();
        let us = engine.calculate_employee(&employee(dec!(20000), "monthly", "US")).unwrap();

        assert_eq!(mx.deductions.len(), 5);
        assert_eq!(us.deductions.len(), 5);
        assert!(mx.federal_rate_percent.is_none());
        assert!(us.federal_rate_percent.is_some());
    }

    #[test]
    fn calculate_employee_rejects_unknown_country() {
        let result = PayrollEngine::default().calculate_employee(&employee(dec!(100), "monthly", "CA"));

        assert_eq!(result, Err(PayrollError::UnknownCountry("CA".to_string())));
    }

    #[test]
    fn calculate_employee_rejects_non_positive_salary() {
        let result =
            PayrollEngine::default().calculate_employee(&employee(dec!(0), "quincenal", "MX"));

        assert_eq!(result, Err(PayrollError::NonPositiveSalary(dec!(0))));
    }

    #[test]
    fn calculate_rejects_input_built_without_validation() {
        let input = EmployeeIncomeInput {
            salary: dec!(-5),
            pay_period: PayPeriod::Monthly,
            country: Country::UnitedStates,
        };

        assert_eq!(
            PayrollEngine::default().calculate(&input),
            Err(PayrollError::NonPositiveSalary(dec!(-5)))
        );
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PayrollEngine<'static>>();
    }
}
