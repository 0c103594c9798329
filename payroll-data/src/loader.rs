use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use payroll_core::{
    EmployeeIncomeInput, EmployeeStatus, NewEmployee, PayrollError, PayrollRepository,
    RepositoryError,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading an employee roster.
#[derive(Debug, Error, PartialEq)]
pub enum RosterLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Roster row {row} ({name}) is invalid: {source}")]
    InvalidRecord {
        row: usize,
        name: String,
        #[source]
        source: PayrollError,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for RosterLoaderError {
    fn from(err: csv::Error) -> Self {
        RosterLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the roster CSV file.
///
/// Columns:
/// - `name`, `role`: free text
/// - `department`, `location`: optional, empty for none
/// - `salary`: gross pay per period, never annual
/// - `payroll`: pay-period label as the employee's country names it
///   (`quincenal`, `biweekly`, ...)
/// - `country`: `MX` or `US`
/// - `status`: `active` or `inactive`, empty for active
/// - `hire_date`: optional, `YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RosterRecord {
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub salary: Decimal,
    pub payroll: String,
    pub country: String,
    pub status: Option<EmployeeStatus>,
    pub hire_date: Option<NaiveDate>,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Decimal::from_str(s.trim()).map_err(serde::de::Error::custom)
}

impl RosterRecord {
    /// Validates the row and converts it into a storable employee.
    ///
    /// The country code is stored in its canonical form and the pay-period
    /// label is kept as written, lowercased.
    pub fn to_new_employee(&self) -> Result<NewEmployee, PayrollError> {
        let input = EmployeeIncomeInput::from_labels(self.salary, &self.payroll, &self.country)?;

        Ok(NewEmployee {
            name: self.name.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            location: self.location.clone(),
            salary: self.salary,
            pay_period: self.payroll.trim().to_lowercase(),
            country: input.country.as_str().to_string(),
            status: self.status.unwrap_or_default(),
            hire_date: self.hire_date,
        })
    }
}

/// Loader for employee rosters kept as CSV.
///
/// Rows are inserted through the [`PayrollRepository`] trait, so any backend
/// works.
pub struct RosterLoader;

impl RosterLoader {
    /// Parse roster records from a CSV reader. Fields are trimmed.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RosterRecord>, RosterLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RosterRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Validates every record, then inserts them all.
    ///
    /// Nothing is written when any row is invalid. Returns the number of
    /// employees created.
    pub async fn load<R: PayrollRepository + ?Sized>(
        repo: &R,
        records: &[RosterRecord],
    ) -> Result<usize, RosterLoaderError> {
        let employees = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_new_employee()
                    .map_err(|source| RosterLoaderError::InvalidRecord {
                        row: index + 1,
                        name: record.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut inserted = 0;
        for employee in employees {
            let created = repo.create_employee(employee).await?;
            debug!(employee_id = created.id, name = %created.name, "loaded roster row");
            inserted += 1;
        }

        info!(count = inserted, "roster loaded");
        Ok(inserted)
    }
}
