//! Opening payroll storage by backend name.

use payroll_core::db::{DbConfig, RepositoryRegistry};
use payroll_core::{PayrollRepository, RepositoryError};
use payroll_db_sqlite::SqliteRepositoryFactory;
use tracing::info;

/// Registry with every backend this crate ships.
pub fn repository_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Opens the SQLite database at `database` for `company_id`.
///
/// The database is created if missing and migrated before it is returned.
///
/// # Errors
/// [`RepositoryError::Configuration`] for a blank company id or a malformed
/// path, and any connection or migration error from the backend.
pub async fn open_repository(
    database: &str,
    company_id: &str,
) -> Result<Box<dyn PayrollRepository>, RepositoryError> {
    let config = DbConfig::sqlite(database, company_id);
    let repo = repository_registry().create(&config).await?;
    info!(backend = %config.backend, company_id, "opened payroll database");
    Ok(repo)
}
