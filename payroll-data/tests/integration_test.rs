//! Integration tests for roster loading and payroll runs against SQLite.

use payroll_core::calculations::{PayrollRun, PayrollSelection};
use payroll_core::{
    Country, CutScope, CutStatus, EmployeeStatus, PayPeriod, PayrollEngine, PayrollError,
    PayrollRepository,
};
use payroll_data::{RosterLoader, RosterLoaderError, open_repository, parse_selection};
use payroll_db_sqlite::SqliteRepository;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

const ROSTER_CSV: &str = include_str!("../test-data/employees.csv");

async fn setup_test_db(company_id: &str) -> SqliteRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let repo = SqliteRepository::new_with_pool(pool, company_id).await;
    repo.run_migrations()
        .await
        .expect("Failed to run migrations");

    repo
}

async fn loaded_db() -> SqliteRepository {
    let repo = setup_test_db("acme").await;
    let records = RosterLoader::parse(ROSTER_CSV.as_bytes()).expect("Failed to parse CSV");
    RosterLoader::load(&repo, &records)
        .await
        .expect("Failed to load roster");
    repo
}

#[tokio::test]
async fn test_load_full_roster() {
    let repo = setup_test_db("acme").await;

    let records = RosterLoader::parse(ROSTER_CSV.as_bytes()).expect("Failed to parse CSV");
    let inserted = RosterLoader::load(&repo, &records)
        .await
        .expect("Failed to load roster");

    assert_eq!(inserted, 9);
    assert_eq!(repo.list_employees(None).await.unwrap().len(), 9);
    assert_eq!(
        repo.list_employees(Some(EmployeeStatus::Inactive))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_loaded_employee_round_trips() {
    let repo = loaded_db().await;

    let employees = repo.list_employees(None).await.unwrap();
    let ana = &employees[0];

    assert_eq!(ana.name, "Ana García");
    assert_eq!(ana.department.as_deref(), Some("Tecnología"));
    assert_eq!(ana.location.as_deref(), Some("CDMX HQ"));
    assert_eq!(ana.salary, dec!(25000));
    assert_eq!(ana.pay_period, "quincenal");
    assert_eq!(ana.country, "MX");
}

#[tokio::test]
async fn test_invalid_row_stores_nothing() {
    let repo = setup_test_db("acme").await;
    let csv = "name,role,department,location,salary,payroll,country,status,hire_date\n\
               Ana,Dev,,,25000,quincenal,MX,active,\n\
               James,Engineer,,,9615,quincenal,US,active,\n";

    let records = RosterLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");
    let result = RosterLoader::load(&repo, &records).await;

    assert_eq!(
        result,
        Err(RosterLoaderError::InvalidRecord {
            row: 2,
            name: "James".to_string(),
            source: PayrollError::UnsupportedPayPeriod {
                country: Country::UnitedStates,
                period: "quincenal".to_string(),
            },
        })
    );
    assert!(repo.list_employees(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_run_over_stored_roster_skips_inactive() {
    let repo = loaded_db().await;
    let employees = repo.list_employees(None).await.unwrap();

    let run = PayrollRun::compute(&PayrollEngine::default(), &employees, PayrollSelection::all())
        .expect("roster is valid");

    assert_eq!(run.results().len(), 8);
    assert!(run.results().iter().all(|r| r.name != "Roberto Martínez"));
    assert_eq!(run.totals_for(Country::Mexico).employee_count, 5);
    assert_eq!(run.totals_for(Country::UnitedStates).employee_count, 3);
}

#[tokio::test]
async fn test_biweekly_selection_spans_both_countries() {
    let repo = loaded_db().await;
    let employees = repo.list_employees(None).await.unwrap();
    let selection = parse_selection(None, Some("quincenal")).unwrap();

    let run = PayrollRun::compute(&PayrollEngine::default(), &employees, selection).unwrap();

    let names: Vec<&str> = run.results().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Ana García",
            "María Rodríguez",
            "Sofía Hernández",
            "James Wilson",
            "Sarah Chen",
            "Michael Torres",
        ]
    );
}

#[tokio::test]
async fn test_saved_cut_matches_run_totals() {
    let repo = loaded_db().await;
    let employees = repo.list_employees(None).await.unwrap();
    let selection = PayrollSelection {
        country: Some(Country::Mexico),
        pay_period: Some(PayPeriod::Biweekly),
    };
    let run = PayrollRun::compute(&PayrollEngine::default(), &employees, selection).unwrap();
    let totals = run.totals();

    let cut = repo
        .create_payroll_cut(run.to_new_cut(
            "2025-02-01 al 2025-02-15",
            chrono::NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
            "admin",
        ))
        .await
        .expect("Failed to save cut");

    assert_eq!(cut.scope, CutScope::Country(Country::Mexico));
    assert_eq!(cut.pay_period, Some(PayPeriod::Biweekly));
    assert_eq!(cut.status, CutStatus::Pending);
    assert_eq!(cut.employee_count, 3);
    assert_eq!(cut.gross_total, totals.gross_total);
    assert_eq!(cut.total_deductions, totals.total_deductions);
    assert_eq!(cut.net_total, totals.net_total);
    assert_eq!(cut.gross_total, dec!(32500));

    repo.update_payroll_cut_status(cut.id, CutStatus::Paid)
        .await
        .unwrap();
    assert_eq!(
        repo.list_payroll_cuts(Some(CutStatus::Paid)).await.unwrap()[0].id,
        cut.id
    );
}

#[tokio::test]
async fn test_roster_is_scoped_to_company() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    let acme = SqliteRepository::new_with_pool(pool.clone(), "acme").await;
    acme.run_migrations().await.unwrap();
    let globex = SqliteRepository::new_with_pool(pool, "globex").await;

    let records = RosterLoader::parse(ROSTER_CSV.as_bytes()).unwrap();
    RosterLoader::load(&acme, &records).await.unwrap();

    assert_eq!(acme.list_employees(None).await.unwrap().len(), 9);
    assert!(globex.list_employees(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_roster_round_trips_through_registry_repository() {
    let repo = open_repository(":memory:", "acme")
        .await
        .expect("Failed to open database through registry");

    let records = RosterLoader::parse(ROSTER_CSV.as_bytes()).expect("Failed to parse CSV");
    let inserted = RosterLoader::load(&*repo, &records)
        .await
        .expect("Failed to load roster");
    let employees = repo.list_employees(None).await.unwrap();
    let run = PayrollRun::compute(&PayrollEngine::default(), &employees, PayrollSelection::all())
        .unwrap();

    assert_eq!(inserted, 9);
    assert_eq!(employees.len(), 9);
    assert_eq!(run.results().len(), 8);
}
