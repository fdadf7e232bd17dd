use thiserror::Error;

/// Errors emitted while building the generator or running the pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid catalog: {0}")]
    Catalog(#[from] dealerforge_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors emitted by a persistence sink. Each sink fails independently.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("no records to write: the tabular header is derived from the first record")]
    EmptyInput,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid record: {0}")]
    Record(#[from] dealerforge_core::Error),
}
