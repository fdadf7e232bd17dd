use std::fs;
use std::path::Path;

use rusqlite::{Connection, params};
use tracing::info;

use dealerforge_core::{Record, TableSchema};

use crate::errors::SinkError;
use crate::model::{SinkKind, SinkReport};

/// Append records to the `ford_trucks` table of the SQLite database at `path`.
///
/// The table is created when missing and never dropped or altered, so repeated
/// calls accumulate rows. All inserts share one transaction; the connection is
/// closed before returning.
pub fn write_records_sqlite(path: &Path, records: &[Record]) -> Result<SinkReport, SinkError> {
    let path = std::path::absolute(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let schema = TableSchema::ford_trucks();
    let mut conn = Connection::open(&path)?;
    ensure_table(&conn, &schema)?;

    let tx = conn.transaction()?;
    {
        let mut insert = tx.prepare(&schema.insert_sql())?;
        for record in records {
            insert.execute(params![
                record.model,
                record.variant,
                record.color,
                record.fuel_type.as_str(),
                record.transmission.as_str(),
                record.price,
                record.manufacture_date.to_string(),
                record.sale_date.to_string(),
                record.state,
                record.mileage,
                record.power.engine_capacity(),
                record.power.battery_capacity(),
                record.power.charging_time(),
                record.seating_capacity,
                record.ground_clearance,
                record.bed_length,
                record.towing_capacity,
            ])?;
        }
    }
    tx.commit()?;
    conn.close().map_err(|(_, err)| err)?;

    info!(
        path = %path.display(),
        table = %schema.name,
        rows = records.len(),
        "sqlite rows appended"
    );

    Ok(SinkReport {
        sink: SinkKind::Sqlite,
        path,
        rows_written: records.len() as u64,
        bytes_written: None,
    })
}

/// Create the table if it does not exist yet.
pub fn ensure_table(conn: &Connection, schema: &TableSchema) -> Result<(), SinkError> {
    conn.execute_batch(&schema.create_table_sql())?;
    Ok(())
}

/// Number of rows currently stored in the table.
pub fn count_rows(path: &Path) -> Result<u64, SinkError> {
    let conn = Connection::open(path)?;
    let sql = format!("SELECT COUNT(*) FROM {}", TableSchema::ford_trucks().name);
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(u64::try_from(count).unwrap_or_default())
}

/// Number of table definitions named like the records table in the catalog.
pub fn table_definitions(path: &Path) -> Result<u64, SinkError> {
    let conn = Connection::open(path)?;
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [TableSchema::ford_trucks().name],
        |row| row.get(0),
    )?;
    Ok(u64::try_from(count).unwrap_or_default())
}

/// Column names of the stored table in declaration order.
pub fn stored_columns(path: &Path) -> Result<Vec<String>, SinkError> {
    let conn = Connection::open(path)?;
    let sql = format!("PRAGMA table_info({})", TableSchema::ford_trucks().name);
    let mut stmt = conn.prepare(&sql)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
