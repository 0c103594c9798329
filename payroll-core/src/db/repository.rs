use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    CutStatus, Employee, EmployeeStatus, NewEmployee, NewPayrollCut, PayrollCut,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for one company's employees and payroll cuts.
///
/// Implementations are bound to a single company at construction; no method
/// can see or modify another company's rows.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    // Employees
    async fn list_employees(
        &self,
        status: Option<EmployeeStatus>,
    ) -> Result<Vec<Employee>, RepositoryError>;

    async fn get_employee(&self, id: i64) -> Result<Employee, RepositoryError>;

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, RepositoryError>;

    async fn update_employee(&self, employee: &Employee) -> Result<(), RepositoryError>;

    async fn delete_employee(&self, id: i64) -> Result<(), RepositoryError>;

    // Payroll cuts
    async fn create_payroll_cut(&self, cut: NewPayrollCut) -> Result<PayrollCut, RepositoryError>;

    async fn get_payroll_cut(&self, id: i64) -> Result<PayrollCut, RepositoryError>;

    /// Newest first.
    async fn list_payroll_cuts(
        &self,
        status: Option<CutStatus>,
    ) -> Result<Vec<PayrollCut>, RepositoryError>;

    async fn update_payroll_cut_status(
        &self,
        id: i64,
        status: CutStatus,
    ) -> Result<(), RepositoryError>;
}
