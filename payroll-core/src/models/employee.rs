use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::models::{Country, PayPeriod};

/// Validated input for a single payroll calculation.
///
/// `salary` is the gross amount paid per occurrence of `pay_period`, never an
/// annual figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeIncomeInput {
    pub salary: Decimal,
    pub pay_period: PayPeriod,
    pub country: Country,
}

impl EmployeeIncomeInput {
    /// Builds an input, rejecting zero or negative salaries.
    pub fn new(
        salary: Decimal,
        pay_period: PayPeriod,
        country: Country,
    ) -> Result<Self, PayrollError> {
        if salary <= Decimal::ZERO {
            return Err(PayrollError::NonPositiveSalary(salary));
        }
        Ok(Self {
            salary,
            pay_period,
            country,
        })
    }

    /// Builds an input from the raw labels kept in storage.
    pub fn from_labels(
        salary: Decimal,
        pay_period: &str,
        country: &str,
    ) -> Result<Self, PayrollError> {
        let country = Country::parse(country)?;
        let pay_period = PayPeriod::parse_for(country, pay_period)?;
        Self::new(salary, pay_period, country)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee as kept in storage. Pay period and country are raw labels and
/// are only validated when mapped into an [`EmployeeIncomeInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub salary: Decimal,
    pub pay_period: String,
    pub country: String,
    pub status: EmployeeStatus,
    pub hire_date: Option<NaiveDate>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Maps the stored record into validated engine input.
    ///
    /// ```
    /// use payroll_core::{Country, Employee, EmployeeStatus, PayPeriod};
    /// use rust_decimal_macros::dec;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     name: "Ana García".to_string(),
    ///     role: "Developer".to_string(),
    ///     department: None,
    ///     location: Some("CDMX HQ".to_string()),
    ///     salary: dec!(25000),
    ///     pay_period: "quincenal".to_string(),
    ///     country: "MX".to_string(),
    ///     status: EmployeeStatus::Active,
    ///     hire_date: None,
    /// };
    ///
    /// let input = employee.income_input().unwrap();
    /// assert_eq!(input.country, Country::Mexico);
    /// assert_eq!(input.pay_period, PayPeriod::Biweekly);
    /// ```
    pub fn income_input(&self) -> Result<EmployeeIncomeInput, PayrollError> {
        EmployeeIncomeInput::from_labels(self.salary, &self.pay_period, &self.country)
    }
}

/// For creating new employees (no id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub salary: Decimal,
    pub pay_period: String,
    pub country: String,
    pub status: EmployeeStatus,
    pub hire_date: Option<NaiveDate>,
}

impl NewEmployee {
    pub fn with_id(
        self,
        id: i64,
    ) -> Employee {
        Employee {
            id,
            name: self.name,
            role: self.role,
            department: self.department,
            location: self.location,
            salary: self.salary,
            pay_period: self.pay_period,
            country: self.country,
            status: self.status,
            hire_date: self.hire_date,
        }
    }
}
