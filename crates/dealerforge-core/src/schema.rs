use serde::{Deserialize, Serialize};

use crate::record::RecordRow;

/// Name of the relational table holding generated records.
pub const TABLE_NAME: &str = "ford_trucks";

/// SQLite storage class used for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    Integer,
    Real,
    Text,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
        }
    }
}

/// Column metadata for the persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub ordinal_position: i16,
    pub name: String,
    pub sql_type: SqlType,
}

/// Fixed schema of the relational sink: an identity column followed by one
/// column per [`RecordRow`] field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    /// Auto-incrementing surrogate key, not part of the record.
    pub identity_column: String,
    pub columns: Vec<ColumnSpec>,
}

const COLUMN_TYPES: [SqlType; 17] = [
    SqlType::Text,
    SqlType::Text,
    SqlType::Text,
    SqlType::Text,
    SqlType::Text,
    SqlType::Real,
    SqlType::Text,
    SqlType::Text,
    SqlType::Text,
    SqlType::Real,
    SqlType::Real,
    SqlType::Real,
    SqlType::Real,
    SqlType::Integer,
    SqlType::Real,
    SqlType::Real,
    SqlType::Integer,
];

impl TableSchema {
    /// Schema of the `ford_trucks` table.
    pub fn ford_trucks() -> Self {
        let columns = RecordRow::FIELD_NAMES
            .iter()
            .zip(COLUMN_TYPES)
            .enumerate()
            .map(|(idx, (name, sql_type))| ColumnSpec {
                ordinal_position: idx as i16 + 2,
                name: (*name).to_string(),
                sql_type,
            })
            .collect();

        Self {
            name: TABLE_NAME.to_string(),
            identity_column: "id".to_string(),
            columns,
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// `CREATE TABLE IF NOT EXISTS` statement; never drops or alters.
    pub fn create_table_sql(&self) -> String {
        let mut lines = vec![format!(
            "    {} INTEGER PRIMARY KEY AUTOINCREMENT",
            self.identity_column
        )];
        lines.extend(
            self.columns
                .iter()
                .map(|col| format!("    {} {}", col.name, col.sql_type.as_sql())),
        );
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            self.name,
            lines.join(",\n")
        )
    }

    /// Parameterised insert listing every non-identity column in schema order.
    pub fn insert_sql(&self) -> String {
        let placeholders: Vec<String> = (1..=self.columns.len())
            .map(|idx| format!("?{idx}"))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            self.column_names().join(", "),
            placeholders.join(", ")
        )
    }
}
