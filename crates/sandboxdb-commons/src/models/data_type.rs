//! Logical column data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known logical column types.
///
/// Documents may carry arbitrary declared type strings (the engine is the
/// authority on what they mean); this enum covers the set the schema builder
/// offers and the compiler special-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Text,
    Integer,
    Real,
    Boolean,
    Date,
    Blob,
}

impl DataType {
    /// SQL type name as emitted in DDL.
    pub fn sql_name(&self) -> &'static str {
        match self {
            DataType::Text => "TEXT",
            DataType::Integer => "INTEGER",
            DataType::Real => "REAL",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Blob => "BLOB",
        }
    }

    /// Parses a declared type string, tolerating case and common aliases.
    pub fn from_declared(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TEXT" | "VARCHAR" | "CHAR" | "STRING" => Some(DataType::Text),
            "INTEGER" | "INT" | "BIGINT" | "SMALLINT" => Some(DataType::Integer),
            "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" | "DECIMAL" => Some(DataType::Real),
            "BOOLEAN" | "BOOL" => Some(DataType::Boolean),
            "DATE" | "DATETIME" | "TIMESTAMP" => Some(DataType::Date),
            "BLOB" | "BYTEA" | "BINARY" => Some(DataType::Blob),
            _ => None,
        }
    }

    /// Whether a declared type string names an integer type.
    pub fn is_integer_like(raw: &str) -> bool {
        matches!(Self::from_declared(raw), Some(DataType::Integer))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}
