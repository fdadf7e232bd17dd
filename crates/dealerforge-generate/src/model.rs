use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Number of records to generate.
    pub records: usize,
    /// RNG seed; a fresh seed is drawn (and reported) when absent.
    pub seed: Option<u64>,
    /// Date the manufacture offsets are measured from; defaults to today.
    pub reference_date: Option<NaiveDate>,
    /// Directory where the CSV file and the database are written.
    pub out_dir: PathBuf,
    pub csv_name: String,
    pub db_name: String,
    pub write_csv: bool,
    pub write_db: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            records: 5000,
            seed: None,
            reference_date: None,
            out_dir: PathBuf::from("data"),
            csv_name: "ford_trucks_data.csv".to_string(),
            db_name: "ford_trucks_data.db".to_string(),
            write_csv: true,
            write_db: true,
        }
    }
}

impl GenerateOptions {
    pub fn csv_path(&self) -> PathBuf {
        self.out_dir.join(&self.csv_name)
    }

    pub fn db_path(&self) -> PathBuf {
        self.out_dir.join(&self.db_name)
    }
}

/// Persistence target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    Csv,
    Sqlite,
}

/// Successful write summary returned by a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkReport {
    pub sink: SinkKind,
    /// Absolute path of the file that was written.
    pub path: PathBuf,
    pub rows_written: u64,
    /// Bytes written; only tracked by the CSV sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<u64>,
}

/// Per-sink entry of a run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkOutcome {
    pub sink: SinkKind,
    pub path: PathBuf,
    pub rows_written: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub reference_date: NaiveDate,
    pub records_generated: u64,
    pub sinks: Vec<SinkOutcome>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            run_id,
            seed,
            reference_date,
            records_generated: 0,
            sinks: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_success(&mut self, report: &SinkReport) {
        self.sinks.push(SinkOutcome {
            sink: report.sink,
            path: report.path.clone(),
            rows_written: report.rows_written,
            bytes_written: report.bytes_written,
            error: None,
        });
    }

    pub fn record_failure(&mut self, sink: SinkKind, path: PathBuf, error: String) {
        self.sinks.push(SinkOutcome {
            sink,
            path,
            rows_written: 0,
            bytes_written: None,
            error: Some(error),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.sinks.iter().any(|outcome| outcome.error.is_some())
    }
}
