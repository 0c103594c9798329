use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use payroll_core::{
    CutScope, CutStatus, Employee, EmployeeStatus, NewEmployee, NewPayrollCut, PayPeriod,
    PayrollCut, PayrollRepository, RepositoryError,
};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use tracing::debug;

use crate::decimal::{decimal_to_text, get_decimal};

const EMPLOYEE_COLUMNS: &str = "id, name, role, department, location, salary, pay_period, \
                                country, status, hire_date";

const CUT_COLUMNS: &str = "id, period_label, pay_period, scope, employee_count, gross_total, \
                           total_deductions, net_total, status, cut_date, created_by, created_at";

/// SQLite-backed repository bound to one company.
pub struct SqliteRepository {
    pool: SqlitePool,
    company_id: String,
}

impl SqliteRepository {
    /// Connects to `database_url`, creating the database file if missing.
    ///
    /// Accepts a bare path (`payroll.db`), a sqlx URL (`sqlite://payroll.db`)
    /// or `:memory:`.
    pub async fn new(
        database_url: &str,
        company_id: &str,
    ) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Configuration(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.map_err(|e| {
            RepositoryError::Connection(format!(
                "Failed to connect to database {}: {}",
                database_url, e
            ))
        })?;
        Ok(Self {
            pool,
            company_id: company_id.to_string(),
        })
    }

    pub async fn new_with_pool(
        pool: SqlitePool,
        company_id: &str,
    ) -> Self {
        Self {
            pool,
            company_id: company_id.to_string(),
        }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to run migrations: {}", e)))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }
}

fn column<'r, T>(
    row: &'r SqliteRow,
    name: &str,
) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_employee(row: &SqliteRow) -> Result<Employee, RepositoryError> {
    let status: String = column(row, "status")?;
    Ok(Employee {
        id: column(row, "id")?,
        name: column(row, "name")?,
        role: column(row, "role")?,
        department: column(row, "department")?,
        location: column(row, "location")?,
        salary: get_decimal(row, "salary")?,
        pay_period: column(row, "pay_period")?,
        country: column(row, "country")?,
        status: EmployeeStatus::parse(&status).ok_or_else(|| {
            RepositoryError::Database(format!("Unknown employee status '{}'", status))
        })?,
        hire_date: column::<Option<NaiveDate>>(row, "hire_date")?,
    })
}

fn row_to_payroll_cut(row: &SqliteRow) -> Result<PayrollCut, RepositoryError> {
    let pay_period: Option<String> = column(row, "pay_period")?;
    let pay_period = pay_period
        .map(|label| {
            PayPeriod::parse(&label).ok_or_else(|| {
                RepositoryError::Database(format!("Unknown pay period '{}'", label))
            })
        })
        .transpose()?;
    let scope: String = column(row, "scope")?;
    let status: String = column(row, "status")?;

    Ok(PayrollCut {
        id: column(row, "id")?,
        period_label: column(row, "period_label")?,
        pay_period,
        scope: CutScope::parse(&scope)
            .ok_or_else(|| RepositoryError::Database(format!("Unknown cut scope '{}'", scope)))?,
        employee_count: column(row, "employee_count")?,
        gross_total: get_decimal(row, "gross_total")?,
        total_deductions: get_decimal(row, "total_deductions")?,
        net_total: get_decimal(row, "net_total")?,
        status: CutStatus::parse(&status)
            .ok_or_else(|| RepositoryError::Database(format!("Unknown cut status '{}'", status)))?,
        cut_date: column(row, "cut_date")?,
        created_by: column(row, "created_by")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
    })
}

#[async_trait]
impl PayrollRepository for SqliteRepository {
    async fn list_employees(
        &self,
        status: Option<EmployeeStatus>,
    ) -> Result<Vec<Employee>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {} FROM employees WHERE company_id = ? AND status = ? ORDER BY id",
                    EMPLOYEE_COLUMNS
                ))
                .bind(&self.company_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM employees WHERE company_id = ? ORDER BY id",
                    EMPLOYEE_COLUMNS
                ))
                .bind(&self.company_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_employee).collect()
    }

    async fn get_employee(
        &self,
        id: i64,
    ) -> Result<Employee, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM employees WHERE id = ? AND company_id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .bind(&self.company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_employee(&row)
    }

    async fn create_employee(
        &self,
        employee: NewEmployee,
    ) -> Result<Employee, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO employees (
                company_id, name, role, department, location, salary, pay_period,
                country, status, hire_date, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.company_id)
        .bind(&employee.name)
        .bind(&employee.role)
        .bind(&employee.department)
        .bind(&employee.location)
        .bind(decimal_to_text(employee.salary))
        .bind(&employee.pay_period)
        .bind(&employee.country)
        .bind(employee.status.as_str())
        .bind(employee.hire_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        debug!(company_id = %self.company_id, employee_id = id, "created employee");
        Ok(employee.with_id(id))
    }

    async fn update_employee(
        &self,
        employee: &Employee,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE employees SET
                name = ?, role = ?, department = ?, location = ?, salary = ?,
                pay_period = ?, country = ?, status = ?, hire_date = ?, updated_at = ?
             WHERE id = ? AND company_id = ?",
        )
        .bind(&employee.name)
        .bind(&employee.role)
        .bind(&employee.department)
        .bind(&employee.location)
        .bind(decimal_to_text(employee.salary))
        .bind(&employee.pay_period)
        .bind(&employee.country)
        .bind(employee.status.as_str())
        .bind(employee.hire_date)
        .bind(Utc::now())
        .bind(employee.id)
        .bind(&self.company_id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        debug!(company_id = %self.company_id, employee_id = employee.id, "updated employee");
        Ok(())
    }

    async fn delete_employee(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ? AND company_id = ?")
            .bind(id)
            .bind(&self.company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        debug!(company_id = %self.company_id, employee_id = id, "deleted employee");
        Ok(())
    }

    async fn create_payroll_cut(
        &self,
        cut: NewPayrollCut,
    ) -> Result<PayrollCut, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO payroll_cuts (
                company_id, period_label, pay_period, scope, employee_count,
                gross_total, total_deductions, net_total, status, cut_date,
                created_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.company_id)
        .bind(&cut.period_label)
        .bind(cut.pay_period.map(|p| p.as_str()))
        .bind(cut.scope.as_str())
        .bind(cut.employee_count)
        .bind(decimal_to_text(cut.gross_total))
        .bind(decimal_to_text(cut.total_deductions))
        .bind(decimal_to_text(cut.net_total))
        .bind(cut.status.as_str())
        .bind(cut.cut_date)
        .bind(&cut.created_by)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        debug!(
            company_id = %self.company_id,
            cut_id = id,
            scope = %cut.scope,
            employees = cut.employee_count,
            "created payroll cut"
        );
        self.get_payroll_cut(id).await
    }

    async fn get_payroll_cut(
        &self,
        id: i64,
    ) -> Result<PayrollCut, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM payroll_cuts WHERE id = ? AND company_id = ?",
            CUT_COLUMNS
        ))
        .bind(id)
        .bind(&self.company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_payroll_cut(&row)
    }

    async fn list_payroll_cuts(
        &self,
        status: Option<CutStatus>,
    ) -> Result<Vec<PayrollCut>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {} FROM payroll_cuts WHERE company_id = ? AND status = ?
                     ORDER BY created_at DESC, id DESC",
                    CUT_COLUMNS
                ))
                .bind(&self.company_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM payroll_cuts WHERE company_id = ?
                     ORDER BY created_at DESC, id DESC",
                    CUT_COLUMNS
                ))
                .bind(&self.company_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_payroll_cut).collect()
    }

    async fn update_payroll_cut_status(
        &self,
        id: i64,
        status: CutStatus,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE payroll_cuts SET status = ? WHERE id = ? AND company_id = ?")
                .bind(status.as_str())
                .bind(id)
                .bind(&self.company_id)
                .execute(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        debug!(company_id = %self.company_id, cut_id = id, status = status.as_str(), "updated payroll cut");
        Ok(())
    }
}
