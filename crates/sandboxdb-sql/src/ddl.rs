//! DDL/DML compiler: abstract table definitions → engine statements.
//!
//! The compiler is best-effort: anything representable is emitted, and the
//! engine gets the final word on validity. The only hard failure is a table
//! with no columns, which cannot produce a legal CREATE TABLE at all.

use crate::quote::{quote_ident, quote_literal};
use sandboxdb_commons::{ColumnDef, DataType, TableDef};
use serde_json::Value;
use thiserror::Error;

/// Compiler failure.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("table {0:?} has no columns")]
    MissingColumns(String),
}

/// One parameterized row insert. `params` bind positionally to the `?N`
/// placeholders; they are never interpolated into the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledInsert {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Compiled form of one table: schema creation plus per-row inserts.
#[derive(Debug, Clone)]
pub struct CompiledTable {
    pub create: String,
    pub inserts: Vec<CompiledInsert>,
}

/// Declared type for a column: uppercased, defaulting to TEXT.
fn sql_type(col: &ColumnDef) -> String {
    col.data_type
        .as_deref()
        .map(|t| t.trim().to_ascii_uppercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "TEXT".to_string())
}

/// Whether this column compiles to the engine's auto-incrementing integer
/// form. The inline form absorbs the primary-key clause, so the table-level
/// constraint is suppressed when such a column exists.
fn is_rowid_column(col: &ColumnDef) -> bool {
    col.auto_increment && DataType::is_integer_like(&sql_type(col))
}

/// Renders one column definition. Constraints are appended in a fixed order:
/// NOT NULL, UNIQUE, DEFAULT.
fn column_def(col: &ColumnDef) -> String {
    let mut def = if is_rowid_column(col) {
        format!(
            "{} INTEGER PRIMARY KEY AUTOINCREMENT",
            quote_ident(&col.column_name)
        )
    } else {
        format!("{} {}", quote_ident(&col.column_name), sql_type(col))
    };

    if col.not_null {
        def.push_str(" NOT NULL");
    }
    if col.unique {
        def.push_str(" UNIQUE");
    }
    if !col.default_value.is_null() {
        def.push_str(" DEFAULT ");
        def.push_str(&quote_literal(&col.default_value));
    }
    def
}

/// Compiles a table definition into an idempotent CREATE TABLE and
/// conflict-tolerant row inserts.
pub fn compile_table(table: &TableDef) -> Result<CompiledTable, CompileError> {
    if table.columns.is_empty() {
        return Err(CompileError::MissingColumns(table.table_name.clone()));
    }

    let mut parts: Vec<String> = table.columns.iter().map(column_def).collect();

    // Single table-level primary key: first flagged column wins, extras are
    // ignored rather than rejected. An auto-increment column already carries
    // the inline primary-key form, which cannot coexist with this clause.
    let has_rowid_col = table.columns.iter().any(is_rowid_column);
    if !has_rowid_col {
        if let Some(pk) = table.columns.iter().find(|c| c.primary_key) {
            parts.push(format!("PRIMARY KEY ({})", quote_ident(&pk.column_name)));
        }
    }

    let create = format!(
        "CREATE TABLE IF NOT EXISTS {} ({});",
        quote_ident(&table.table_name),
        parts.join(", ")
    );

    let inserts = table
        .rows
        .iter()
        .map(|row| compile_insert(table, row))
        .collect();

    Ok(CompiledTable { create, inserts })
}

/// Builds one insert for one row. A position whose value is null and whose
/// column carries a default or auto-increment is omitted from the column
/// list so the engine supplies the value; every other value becomes a bound
/// parameter.
fn compile_insert(table: &TableDef, row: &[Value]) -> CompiledInsert {
    let mut names: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    for (i, col) in table.columns.iter().enumerate() {
        let value = row.get(i).cloned().unwrap_or(Value::Null);
        if value.is_null() && col.has_generated_value() {
            continue;
        }
        names.push(quote_ident(&col.column_name));
        params.push(value);
    }

    let sql = if names.is_empty() {
        format!(
            "INSERT OR IGNORE INTO {} DEFAULT VALUES;",
            quote_ident(&table.table_name)
        )
    } else {
        let placeholders: Vec<String> = (1..=params.len()).map(|n| format!("?{}", n)).collect();
        format!(
            "INSERT OR IGNORE INTO {} ({}) VALUES ({});",
            quote_ident(&table.table_name),
            names.join(", "),
            placeholders.join(", ")
        )
    };

    CompiledInsert { sql, params }
}

/// Additive column for save-merge. The engine rejects UNIQUE / PRIMARY KEY
/// on added columns, and NOT NULL only with a default, so only the
/// representable subset is emitted.
pub fn compile_add_column(table_name: &str, col: &ColumnDef) -> String {
    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote_ident(table_name),
        quote_ident(&col.column_name),
        sql_type(col)
    );
    if !col.default_value.is_null() {
        if col.not_null {
            sql.push_str(" NOT NULL");
        }
        sql.push_str(" DEFAULT ");
        sql.push_str(&quote_literal(&col.default_value));
    }
    sql.push(';');
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column(name: &str, ty: &str) -> ColumnDef {
        ColumnDef::new(name, ty)
    }

    fn table(name: &str, columns: Vec<ColumnDef>, rows: Vec<Vec<Value>>) -> TableDef {
        let mut t = TableDef::new(name);
        t.columns = columns;
        t.rows = rows;
        t
    }

    #[test]
    fn test_missing_columns_is_an_error() {
        let t = table("empty", vec![], vec![]);
        assert!(matches!(
            compile_table(&t),
            Err(CompileError::MissingColumns(_))
        ));
    }

    #[test]
    fn test_create_is_idempotent_and_quoted() {
        let t = table("users", vec![column("id", "integer"), column("name", "text")], vec![]);
        let compiled = compile_table(&t).unwrap();
        assert_eq!(
            compiled.create,
            "CREATE TABLE IF NOT EXISTS \"users\" (\"id\" INTEGER, \"name\" TEXT);"
        );
    }

    #[test]
    fn test_unspecified_type_defaults_to_text() {
        let mut c = column("note", "");
        c.data_type = None;
        let t = table("t", vec![c], vec![]);
        assert!(compile_table(&t).unwrap().create.contains("\"note\" TEXT"));
    }

    #[test]
    fn test_constraint_order_not_null_unique_default() {
        let mut c = column("email", "TEXT");
        c.not_null = true;
        c.unique = true;
        c.default_value = json!("none@example.com");
        let t = table("t", vec![c], vec![]);
        assert!(compile_table(&t)
            .unwrap()
            .create
            .contains("\"email\" TEXT NOT NULL UNIQUE DEFAULT 'none@example.com'"));
    }

    #[test]
    fn test_default_literal_escaping() {
        let mut c = column("quote", "TEXT");
        c.default_value = json!("it's");
        let t = table("t", vec![c], vec![]);
        assert!(compile_table(&t).unwrap().create.contains("DEFAULT 'it''s'"));
    }

    #[test]
    fn test_primary_key_is_single_table_level_constraint() {
        let mut a = column("a", "TEXT");
        a.primary_key = true;
        // Defensive: a second flagged column is ignored, not an error.
        let mut b = column("b", "TEXT");
        b.primary_key = true;
        let t = table("t", vec![a, b], vec![]);
        let create = compile_table(&t).unwrap().create;
        assert!(create.contains("PRIMARY KEY (\"a\")"));
        assert!(!create.contains("PRIMARY KEY (\"b\")"));
    }

    #[test]
    fn test_auto_increment_takes_rowid_form() {
        let mut id = column("id", "INTEGER");
        id.primary_key = true;
        id.auto_increment = true;
        let t = table("t", vec![id, column("v", "TEXT")], vec![]);
        let create = compile_table(&t).unwrap().create;
        assert!(create.contains("\"id\" INTEGER PRIMARY KEY AUTOINCREMENT"));
        // The inline form absorbs the table-level clause.
        assert!(!create.contains("PRIMARY KEY (\"id\")"));
    }

    #[test]
    fn test_auto_increment_on_non_integer_type_stays_plain() {
        let mut c = column("id", "TEXT");
        c.auto_increment = true;
        let t = table("t", vec![c], vec![]);
        assert!(compile_table(&t).unwrap().create.contains("\"id\" TEXT"));
    }

    #[test]
    fn test_insert_binds_values_positionally() {
        let t = table(
            "users",
            vec![column("id", "INTEGER"), column("name", "TEXT")],
            vec![vec![json!(1), json!("Alice")]],
        );
        let compiled = compile_table(&t).unwrap();
        assert_eq!(compiled.inserts.len(), 1);
        assert_eq!(
            compiled.inserts[0].sql,
            "INSERT OR IGNORE INTO \"users\" (\"id\", \"name\") VALUES (?1, ?2);"
        );
        assert_eq!(compiled.inserts[0].params, vec![json!(1), json!("Alice")]);
    }

    #[test]
    fn test_insert_omits_generated_columns_when_value_is_null() {
        let mut id = column("id", "INTEGER");
        id.primary_key = true;
        id.auto_increment = true;
        let mut status = column("status", "TEXT");
        status.default_value = json!("new");
        let t = table(
            "jobs",
            vec![id, status, column("payload", "TEXT")],
            vec![vec![Value::Null, Value::Null, json!("p")]],
        );
        let ins = &compile_table(&t).unwrap().inserts[0];
        assert_eq!(
            ins.sql,
            "INSERT OR IGNORE INTO \"jobs\" (\"payload\") VALUES (?1);"
        );
        assert_eq!(ins.params, vec![json!("p")]);
    }

    #[test]
    fn test_insert_keeps_explicit_null_for_plain_columns() {
        let t = table(
            "t",
            vec![column("a", "TEXT"), column("b", "TEXT")],
            vec![vec![Value::Null, json!("x")]],
        );
        let ins = &compile_table(&t).unwrap().inserts[0];
        assert_eq!(ins.sql, "INSERT OR IGNORE INTO \"t\" (\"a\", \"b\") VALUES (?1, ?2);");
        assert_eq!(ins.params, vec![Value::Null, json!("x")]);
    }

    #[test]
    fn test_insert_all_generated_falls_back_to_default_values() {
        let mut id = column("id", "INTEGER");
        id.auto_increment = true;
        id.primary_key = true;
        let t = table("seq", vec![id], vec![vec![Value::Null]]);
        let ins = &compile_table(&t).unwrap().inserts[0];
        assert_eq!(ins.sql, "INSERT OR IGNORE INTO \"seq\" DEFAULT VALUES;");
        assert!(ins.params.is_empty());
    }

    #[test]
    fn test_short_row_treated_as_trailing_nulls() {
        let t = table(
            "t",
            vec![column("a", "TEXT"), column("b", "TEXT")],
            vec![vec![json!("only-a")]],
        );
        let ins = &compile_table(&t).unwrap().inserts[0];
        assert_eq!(ins.params, vec![json!("only-a"), Value::Null]);
    }

    #[test]
    fn test_add_column_plain_and_with_default() {
        let c = column("age", "INTEGER");
        assert_eq!(
            compile_add_column("users", &c),
            "ALTER TABLE \"users\" ADD COLUMN \"age\" INTEGER;"
        );

        let mut d = column("status", "TEXT");
        d.not_null = true;
        d.default_value = json!("new");
        assert_eq!(
            compile_add_column("users", &d),
            "ALTER TABLE \"users\" ADD COLUMN \"status\" TEXT NOT NULL DEFAULT 'new';"
        );
    }
}
