//! Column definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One column of an abstract table definition.
///
/// `data_type` is the declared type string as supplied by the caller; the
/// compiler uppercases it and falls back to TEXT when absent. Constraint
/// flags mirror what the schema builder exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub column_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default)]
    pub primary_key: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub not_null: bool,

    /// Scalar default, or `Value::Null` / absent for none.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub default_value: Value,

    #[serde(default)]
    pub auto_increment: bool,
}

impl ColumnDef {
    /// Plain column with a declared type and no constraints.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: name.into(),
            data_type: Some(data_type.into()),
            primary_key: false,
            unique: false,
            not_null: false,
            default_value: Value::Null,
            auto_increment: false,
        }
    }

    /// Whether the engine supplies a value for this column when a row omits
    /// one (explicit default or auto-increment).
    pub fn has_generated_value(&self) -> bool {
        self.auto_increment || !self.default_value.is_null()
    }
}
