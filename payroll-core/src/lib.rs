pub mod calculations;
pub mod db;
pub mod error;
pub mod models;
pub mod tables;

pub use calculations::{PayrollEngine, calculate_payroll};
pub use db::repository::{PayrollRepository, RepositoryError};
pub use error::{PayrollError, PayrollRunError, RegimeConfigError, TableError};
pub use models::*;
