//! Table definitions.

use super::ColumnDef;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of sample data: an ordered sequence of scalar values aligned 1:1
/// with the owning table's columns at the time the row was created. Rows are
/// not re-validated when columns change afterwards.
pub type Row = Vec<Value>;

/// Abstract definition of one table inside a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDef {
    pub table_name: String,

    #[serde(default)]
    pub columns: Vec<ColumnDef>,

    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table_name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Flags the column at `index` as the primary key, clearing the flag on
    /// every other column. Last write wins; the flag is never additive.
    pub fn set_primary_key(&mut self, index: usize) {
        for (i, col) in self.columns.iter_mut().enumerate() {
            col.primary_key = i == index;
        }
    }

    /// Re-establishes the model invariants on a definition that arrived from
    /// outside (deserialized request bodies bypass the setters):
    /// at most one primary-key column (the first flagged one wins here - the
    /// compiler applies the same rule) and auto-increment forcing INTEGER.
    pub fn normalize(&mut self) {
        let mut pk_seen = false;
        for col in &mut self.columns {
            if col.primary_key {
                if pk_seen {
                    col.primary_key = false;
                } else {
                    pk_seen = true;
                }
            }
            if col.auto_increment {
                col.data_type = Some("INTEGER".to_string());
            }
        }
    }

    /// Looks up a column position by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.column_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_columns(names: &[&str]) -> TableDef {
        let mut t = TableDef::new("t");
        t.columns = names
            .iter()
            .map(|n| ColumnDef::new(*n, "TEXT"))
            .collect();
        t
    }

    #[test]
    fn test_primary_key_last_write_wins() {
        let mut t = table_with_columns(&["a", "b", "c"]);
        t.set_primary_key(0);
        t.set_primary_key(2);

        let flagged: Vec<&str> = t
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.column_name.as_str())
            .collect();
        assert_eq!(flagged, vec!["c"]);
    }

    #[test]
    fn test_normalize_clears_duplicate_primary_keys() {
        let mut t = table_with_columns(&["a", "b"]);
        t.columns[0].primary_key = true;
        t.columns[1].primary_key = true;
        t.normalize();
        assert!(t.columns[0].primary_key);
        assert!(!t.columns[1].primary_key);
    }

    #[test]
    fn test_normalize_forces_integer_for_auto_increment() {
        let mut t = table_with_columns(&["a"]);
        t.columns[0].auto_increment = true;
        t.normalize();
        assert_eq!(t.columns[0].data_type.as_deref(), Some("INTEGER"));
    }

    #[test]
    fn test_column_index() {
        let t = table_with_columns(&["x", "y"]);
        assert_eq!(t.column_index("y"), Some(1));
        assert_eq!(t.column_index("z"), None);
    }
}
