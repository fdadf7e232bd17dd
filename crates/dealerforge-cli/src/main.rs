mod config;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use schemars::schema_for;
use thiserror::Error;

use dealerforge_core::{Record, RecordRow, SCHEMA_VERSION, TableSchema};
use dealerforge_generate::{GenerationEngine, GenerationError, GenerationResult};

use config::{default_config_toml, load_config};
use logging::init_logging;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("config encoding error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0} sink(s) failed; see log for details")]
    SinksFailed(usize),
}

#[derive(Parser, Debug)]
#[command(name = "dealerforge", version, about = "Synthetic truck sales dataset generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate records and write them to CSV and SQLite.
    Generate(GenerateArgs),
    /// Print the persisted table schema.
    Schema(SchemaArgs),
    /// Print the built-in catalog as an editable config file.
    Catalog,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of records to generate.
    #[arg(value_name = "RECORDS")]
    records: Option<usize>,
    /// RNG seed for a reproducible dataset.
    #[arg(long)]
    seed: Option<u64>,
    /// Date manufacture dates are measured back from (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    reference_date: Option<chrono::NaiveDate>,
    /// Output directory for the CSV file and the database.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// CSV file name inside the output directory.
    #[arg(long)]
    csv_name: Option<String>,
    /// SQLite file name inside the output directory.
    #[arg(long)]
    db_name: Option<String>,
    /// Skip the CSV sink.
    #[arg(long, default_value_t = false)]
    no_csv: bool,
    /// Skip the SQLite sink.
    #[arg(long, default_value_t = false)]
    no_db: bool,
    /// TOML config with optional [generate] and [catalog] tables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of records to print as a sample.
    #[arg(long, default_value_t = 5)]
    sample: usize,
    /// Write the run report as JSON to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    #[arg(long, value_enum, default_value_t = SchemaFormat::Sql)]
    format: SchemaFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaFormat {
    /// `CREATE TABLE` statement.
    Sql,
    /// Column list as JSON.
    Json,
    /// JSON Schema of one flat record.
    JsonSchema,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Schema(args) => run_schema(args),
        Command::Catalog => {
            print!("{}", default_config_toml()?);
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    init_logging(args.log_json, args.log_file.as_deref())?;

    let config = load_config(args.config.as_deref())?;
    let catalog = config.catalog();
    let mut options = config.generate;

    if let Some(records) = args.records {
        options.records = records;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.reference_date.is_some() {
        options.reference_date = args.reference_date;
    }
    if let Some(out_dir) = args.out_dir {
        options.out_dir = out_dir;
    }
    if let Some(csv_name) = args.csv_name {
        options.csv_name = csv_name;
    }
    if let Some(db_name) = args.db_name {
        options.db_name = db_name;
    }
    if args.no_csv {
        options.write_csv = false;
    }
    if args.no_db {
        options.write_db = false;
    }

    if options.csv_name.is_empty() || options.db_name.is_empty() {
        return Err(CliError::InvalidConfig(
            "output file names must not be empty".to_string(),
        ));
    }

    tracing::info!(event = "config_resolved", models = catalog.models.len(), config = ?args.config);

    let engine = GenerationEngine::new(catalog, options)?;
    let result = engine.run();

    if let Some(path) = &args.report {
        std::fs::write(path, serde_json::to_vec_pretty(&result.report)?)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    print_summary(&result, args.sample);

    let failures = result
        .report
        .sinks
        .iter()
        .filter(|outcome| outcome.error.is_some())
        .count();
    if failures > 0 {
        return Err(CliError::SinksFailed(failures));
    }

    Ok(())
}

fn print_summary(result: &GenerationResult, sample: usize) {
    for outcome in &result.report.sinks {
        match &outcome.error {
            None => println!(
                "Dataset has been saved to {:?}: {}",
                outcome.sink,
                outcome.path.display()
            ),
            Some(error) => println!("Failed to save dataset to {:?}: {error}", outcome.sink),
        }
    }

    for (idx, record) in result.records.iter().take(sample).enumerate() {
        println!("\nRecord {}:", idx + 1);
        print_record(record);
    }

    println!(
        "\nTotal records generated: {} (seed {})",
        result.records.len(),
        result.report.seed
    );
}

fn print_record(record: &Record) {
    let row = RecordRow::from(record);
    let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(&row) else {
        return;
    };
    for name in RecordRow::FIELD_NAMES {
        if let Some(value) = fields.get(name) {
            match value {
                serde_json::Value::String(text) => println!("  {name}: {text}"),
                other => println!("  {name}: {other}"),
            }
        }
    }
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let schema = TableSchema::ford_trucks();
    match args.format {
        SchemaFormat::Sql => println!("{};", schema.create_table_sql()),
        SchemaFormat::Json => {
            let value = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "table": schema,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        SchemaFormat::JsonSchema => {
            let generated = schema_for!(RecordRow);
            println!("{}", serde_json::to_string_pretty(&generated)?);
        }
    }
    Ok(())
}
