//! Record generation and persistence for dealerforge.
//!
//! This crate turns a validated [`dealerforge_core::Catalog`] into a seeded,
//! reproducible sequence of sale records and writes it to a CSV file and an
//! append-only SQLite table.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::{GenerationError, SinkError};
pub use generators::RecordGenerator;
pub use model::{GenerateOptions, GenerationReport, SinkKind, SinkOutcome, SinkReport};
