//! Demo walk-through of the table facade against a live database.
//!
//! Connection parameters come from the `DATABASE_*` environment variables
//! (a `.env` file is honored). Run with `RUST_LOG=info` to see the guard
//! reports and per-operation timings.

use clap::Parser;
use colored::Colorize;

use pgfacade::config::DbConfig;
use pgfacade::query::Conditions;
use pgfacade::repo::{FacadeTable, OpStatus};
use pgfacade::types::{Dataset, Mode};

#[derive(Parser)]
#[command(name = "pgfacade-demo", about = "Exercises every facade operation on a sample table")]
struct Args {
    /// Table used for the demo run
    #[arg(long, default_value = "sample_table")]
    table: String,
}

fn report(operation: &str, status: OpStatus) {
    let line = format!("{operation}: {status:?}");
    if status.is_applied() {
        println!("{}", line.green());
    } else {
        println!("{}", line.yellow());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let config = DbConfig::from_env()?;
    let db = FacadeTable::connect(&config).await?;

    let data = Dataset::from_columns([
        ("column1", vec!["value1".into(), "value2".into(), "value3".into()]),
        ("column2", vec!["value1".into(), "value2".into(), "value3".into()]),
    ])?;

    report("create_table", db.create_table(&args.table, &data).await?);
    report("insert", db.insert(&args.table, &data, Mode::Replace).await?);

    if let Some(result) = db.read(&args.table).await? {
        println!("{}", format!("contents of `{}`:", args.table).bold());
        println!("{result}");
        println!("{}", serde_json::to_string_pretty(result.rows())?);
    }

    report("truncate", db.truncate(&args.table).await?);

    let rows = db
        .execute(&format!("SELECT * FROM \"{}\"", args.table))
        .await?;
    println!("raw query returned {} rows", rows.len());

    let status = db
        .delete(
            &args.table,
            &["column1"],
            &Conditions::new().with("column1", "value1"),
        )
        .await?;
    report("delete (one condition)", status);

    let status = db
        .delete(
            &args.table,
            &["column1", "column2"],
            &Conditions::new()
                .with("column1", "value1")
                .with("column2", "value2"),
        )
        .await?;
    report("delete (two conditions)", status);

    Ok(())
}
