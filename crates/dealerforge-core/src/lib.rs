//! Core domain contracts for dealerforge.
//!
//! This crate defines the vehicle catalog (category taxonomy and value pools),
//! the generated record types, and the fixed relational schema shared by the
//! generator, the sinks, and downstream SQL consumers.

pub mod catalog;
pub mod error;
pub mod record;
pub mod schema;
pub mod types;

pub use catalog::{
    BodyRanges, Catalog, CategoryDefinition, DatePolicy, ElectricRanges, EngineRanges,
    SeatingRule,
};
pub use error::{Error, Result};
pub use record::{PowerSource, Record, RecordRow};
pub use schema::{ColumnSpec, SqlType, TABLE_NAME, TableSchema};
pub use types::{FuelType, Transmission, ValueRange};

/// Current contract version for the persisted table and CSV layout.
pub const SCHEMA_VERSION: &str = "1.0";
