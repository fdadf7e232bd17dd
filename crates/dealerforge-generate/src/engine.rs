use std::time::Instant;

use chrono::{Local, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use dealerforge_core::{Catalog, Record};

use crate::errors::{GenerationError, SinkError};
use crate::generators::RecordGenerator;
use crate::model::{GenerateOptions, GenerationReport, SinkKind, SinkReport};
use crate::output::{write_records_csv, write_records_sqlite};

/// Result of a generation run.
///
/// Sink results keep their original error; `None` means the sink was disabled.
#[derive(Debug)]
pub struct GenerationResult {
    pub records: Vec<Record>,
    pub report: GenerationReport,
    pub csv: Option<Result<SinkReport, SinkError>>,
    pub sqlite: Option<Result<SinkReport, SinkError>>,
}

/// Entry point: generate the full record set, then hand it to each sink.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    generator: RecordGenerator,
}

impl GenerationEngine {
    /// Fails with [`GenerationError::Catalog`] when the catalog is not valid.
    pub fn new(catalog: Catalog, options: GenerateOptions) -> Result<Self, GenerationError> {
        let reference_date = options
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let generator = RecordGenerator::new(catalog, reference_date)?;
        Ok(Self { options, generator })
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn generator(&self) -> &RecordGenerator {
        &self.generator
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.generator.reference_date()
    }

    pub fn run(&self) -> GenerationResult {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self
            .options
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());
        let mut report = GenerationReport::new(run_id.clone(), seed, self.reference_date());

        info!(
            run_id = %run_id,
            records = self.options.records,
            seed,
            reference_date = %self.reference_date(),
            "generation started"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let records = self.generator.generate(self.options.records, &mut rng);
        report.records_generated = records.len() as u64;

        info!(run_id = %run_id, records = records.len(), "records generated");

        let csv = self.options.write_csv.then(|| {
            let path = self.options.csv_path();
            let result = write_records_csv(&path, &records);
            track(&mut report, SinkKind::Csv, &path, &result);
            result
        });

        let sqlite = self.options.write_db.then(|| {
            let path = self.options.db_path();
            let result = write_records_sqlite(&path, &records);
            track(&mut report, SinkKind::Sqlite, &path, &result);
            result
        });

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            duration_ms = report.duration_ms,
            failed = report.has_failures(),
            "generation completed"
        );

        GenerationResult {
            records,
            report,
            csv,
            sqlite,
        }
    }
}

fn track(
    report: &mut GenerationReport,
    sink: SinkKind,
    path: &std::path::Path,
    result: &Result<SinkReport, SinkError>,
) {
    match result {
        Ok(sink_report) => report.record_success(sink_report),
        Err(err) => {
            warn!(sink = ?sink, path = %path.display(), error = %err, "sink write failed");
            report.record_failure(sink, path.to_path_buf(), err.to_string());
        }
    }
}
