use thiserror::Error;

/// Core error type shared across dealerforge crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The catalog declares an inverted, non-finite or empty range/pool.
    #[error("range violation: {0}")]
    RangeViolation(String),
    /// A model name that is not part of the taxonomy.
    #[error("unknown model: {0}")]
    UnknownModel(String),
    /// A fuel type label that does not name a known fuel type.
    #[error("unknown fuel type: {0}")]
    UnknownFuelType(String),
    /// A transmission label that does not name a known transmission.
    #[error("unknown transmission: {0}")]
    UnknownTransmission(String),
    /// The model exists but does not permit the requested fuel type.
    #[error("fuel type {fuel_type} is not permitted for model {model}")]
    FuelNotPermitted { model: String, fuel_type: String },
    /// A flat row violates the record invariants.
    #[error("inconsistent record: {0}")]
    InconsistentRecord(String),
}

/// Convenience alias for results returned by dealerforge crates.
pub type Result<T> = std::result::Result<T, Error>;
