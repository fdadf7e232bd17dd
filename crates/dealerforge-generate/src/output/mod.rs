//! Persistence sinks. Each sink owns its file or connection for one call.

pub mod csv;
pub mod sqlite;

pub use self::csv::{read_records_csv, write_records_csv};
pub use self::sqlite::{count_rows, stored_columns, table_definitions, write_records_sqlite};
