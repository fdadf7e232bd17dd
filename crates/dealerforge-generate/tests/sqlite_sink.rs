use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rusqlite::Connection;

use dealerforge_core::{Catalog, FuelType, Record, TableSchema};
use dealerforge_generate::output::{
    count_rows, stored_columns, table_definitions, write_records_sqlite,
};
use dealerforge_generate::{RecordGenerator, SinkKind};

fn records(count: usize, seed: u64) -> Vec<Record> {
    let reference = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default();
    let generator = RecordGenerator::new(Catalog::ford_trucks(), reference).expect("valid catalog");
    generator.generate(count, &mut ChaCha8Rng::seed_from_u64(seed))
}

#[test]
fn table_creation_is_idempotent() {
    let dir = temp_out_dir("idempotent");
    let path = dir.join("trucks.db");

    write_records_sqlite(&path, &[]).expect("first call");
    write_records_sqlite(&path, &[]).expect("second call");

    assert_eq!(table_definitions(&path).expect("definitions"), 1);
    assert_eq!(count_rows(&path).expect("count"), 0);

    let mut expected = vec!["id".to_string()];
    expected.extend(
        TableSchema::ford_trucks()
            .column_names()
            .into_iter()
            .map(str::to_string),
    );
    assert_eq!(stored_columns(&path).expect("columns"), expected);
}

#[test]
fn repeated_writes_accumulate_rows() {
    let dir = temp_out_dir("accumulate");
    let path = dir.join("trucks.db");

    let first = write_records_sqlite(&path, &records(30, 1)).expect("first batch");
    let second = write_records_sqlite(&path, &records(12, 2)).expect("second batch");

    assert_eq!(first.sink, SinkKind::Sqlite);
    assert_eq!(first.rows_written, 30);
    assert_eq!(second.rows_written, 12);
    assert!(second.path.is_absolute());
    assert_eq!(count_rows(&path).expect("count"), 42);
    assert_eq!(table_definitions(&path).expect("definitions"), 1);
}

#[test]
fn rows_are_stored_in_schema_column_order() {
    let dir = temp_out_dir("columns");
    let path = dir.join("trucks.db");
    let written = records(40, 9);
    write_records_sqlite(&path, &written).expect("write");

    let conn = Connection::open(&path).expect("open db");
    let mut stmt = conn
        .prepare(
            "SELECT id, model, fuel_type, transmission, price, manufacture_date, sale_date, \
             engine_capacity, battery_capacity, charging_time, seating_capacity, towing_capacity \
             FROM ford_trucks ORDER BY id",
        )
        .expect("prepare select");
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, f64>(8)?,
                row.get::<_, f64>(9)?,
                row.get::<_, i64>(10)?,
                row.get::<_, i64>(11)?,
            ))
        })
        .expect("query")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows");

    assert_eq!(rows.len(), written.len());
    for (idx, (row, record)) in rows.iter().zip(&written).enumerate() {
        assert_eq!(row.0, idx as i64 + 1);
        assert_eq!(row.1, record.model);
        assert_eq!(row.2, record.fuel_type.as_str());
        assert_eq!(row.3, record.transmission.as_str());
        assert_eq!(row.4, record.price);
        assert_eq!(row.5, record.manufacture_date.format("%Y-%m-%d").to_string());
        assert_eq!(row.6, record.sale_date.format("%Y-%m-%d").to_string());
        assert_eq!(row.7, record.power.engine_capacity());
        assert_eq!(row.8, record.power.battery_capacity());
        assert_eq!(row.9, record.power.charging_time());
        assert_eq!(row.10, i64::from(record.seating_capacity));
        assert_eq!(row.11, i64::from(record.towing_capacity));
    }
}

#[test]
fn electric_rows_have_zero_engine_capacity() {
    let dir = temp_out_dir("electric");
    let path = dir.join("trucks.db");
    let written = records(300, 21);
    let electric = written
        .iter()
        .filter(|record| record.fuel_type == FuelType::Electric)
        .count() as i64;
    write_records_sqlite(&path, &written).expect("write");

    let conn = Connection::open(&path).expect("open db");
    let stored: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM ford_trucks \
             WHERE fuel_type = 'Electric' AND engine_capacity = 0 AND battery_capacity > 0",
            [],
            |row| row.get(0),
        )
        .expect("count electric");
    assert!(electric > 0);
    assert_eq!(stored, electric);
}

#[test]
fn existing_table_is_never_replaced() {
    let dir = temp_out_dir("existing");
    let path = dir.join("trucks.db");
    {
        let conn = Connection::open(&path).expect("open db");
        conn.execute_batch(&TableSchema::ford_trucks().create_table_sql())
            .expect("create table");
        conn.execute(
            "INSERT INTO ford_trucks (model, fuel_type) VALUES ('legacy', 'Diesel')",
            [],
        )
        .expect("insert legacy row");
    }

    write_records_sqlite(&path, &records(4, 3)).expect("append");

    let conn = Connection::open(&path).expect("reopen db");
    let legacy: String = conn
        .query_row("SELECT model FROM ford_trucks WHERE id = 1", [], |row| {
            row.get(0)
        })
        .expect("legacy row");
    assert_eq!(legacy, "legacy");
    assert_eq!(count_rows(&path).expect("count"), 5);
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "dealerforge_sqlite_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}
