use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use payroll_core::calculations::PayrollRun;
use payroll_core::{Employee, PayrollEngine};
use payroll_data::{
    RosterLoader, RosterRecord, RunReport, TextReport, open_repository, parse_selection,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Calculate payroll deductions for a roster of employees.
///
/// Employees come from a roster CSV (`--file`), from a SQLite database
/// (`--database`), or from the CSV after storing it in the database
/// (`--store-roster`). Only active employees are calculated.
#[derive(Parser, Debug)]
#[command(name = "payroll-run")]
#[command(version, about, long_about = None)]
struct Args {
    /// Roster CSV with columns
    /// name,role,department,location,salary,payroll,country,status,hire_date
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// SQLite database path or URL (e.g. payroll.db); created and migrated
    /// if needed
    #[arg(short, long)]
    database: Option<String>,

    /// Company whose employees and cuts are read and written
    #[arg(long, default_value = "default")]
    company_id: String,

    /// Insert the roster file's employees into the database first
    #[arg(long, default_value_t = false, requires_all = ["database", "file"])]
    store_roster: bool,

    /// Only calculate employees of this country (MX or US)
    #[arg(long)]
    country: Option<String>,

    /// Only calculate employees paid on this cadence (e.g. quincenal, monthly)
    #[arg(long)]
    pay_period: Option<String>,

    /// Label of the period a saved cut covers (e.g. "2025-02-01 al 2025-02-15")
    #[arg(long)]
    period_label: Option<String>,

    /// Save the run's totals as a pending payroll cut
    #[arg(long, default_value_t = false, requires_all = ["database", "period_label"])]
    save_cut: bool,

    /// Recorded as the author of a saved cut
    #[arg(long, default_value = "payroll-run")]
    created_by: String,

    /// Print the run as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn read_roster(path: &Path) -> Result<Vec<RosterRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let records = RosterLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "parsed roster");
    Ok(records)
}

/// Numbers roster rows from 1 so they can be calculated without storage.
fn roster_employees(records: &[RosterRecord]) -> Result<Vec<Employee>> {
    records
        .iter()
        .zip(1..)
        .map(|(record, id)| {
            record
                .to_new_employee()
                .map(|employee| employee.with_id(id))
                .with_context(|| format!("Roster row {} ({}) is invalid", id, record.name))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let selection = parse_selection(args.country.as_deref(), args.pay_period.as_deref())
        .context("Invalid selection")?;

    let records = args.file.as_deref().map(read_roster).transpose()?;

    let repo = match &args.database {
        Some(database) => Some(
            open_repository(database, &args.company_id)
                .await
                .with_context(|| format!("Failed to open database: {}", database))?,
        ),
        None => None,
    };

    let employees = match (&repo, &records) {
        (Some(repo), records) => {
            if let (true, Some(records)) = (args.store_roster, records) {
                let inserted = RosterLoader::load(&**repo, records)
                    .await
                    .context("Failed to store roster in database")?;
                info!(inserted, company_id = %args.company_id, "stored roster");
            }
            repo.list_employees(None)
                .await
                .context("Failed to read employees from database")?
        }
        (None, Some(records)) => roster_employees(records)?,
        (None, None) => bail!("Nothing to calculate: pass --file, --database or both"),
    };

    let engine = PayrollEngine::default();
    let run = PayrollRun::compute(&engine, &employees, selection)
        .context("Failed to calculate payroll")?;
    let report = RunReport::new(&run);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize run")?;
        println!("{json}");
    } else {
        print!("{}", TextReport(&report));
    }

    if args.save_cut {
        let (Some(repo), Some(period_label)) = (&repo, &args.period_label) else {
            bail!("--save-cut needs --database and --period-label");
        };
        if run.is_empty() {
            bail!("Refusing to save an empty payroll cut");
        }
        let cut_date = chrono::Local::now().date_naive();
        let cut = repo
            .create_payroll_cut(run.to_new_cut(period_label, cut_date, &args.created_by))
            .await
            .context("Failed to save payroll cut")?;
        info!(
            cut_id = cut.id,
            scope = %cut.scope,
            employees = cut.employee_count,
            "saved payroll cut"
        );
    }

    Ok(())
}
