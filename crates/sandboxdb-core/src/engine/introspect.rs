//! Schema introspection: live namespace → abstract definitions.
//!
//! Read-only. Tables come back in engine order (not guaranteed stable);
//! columns come back in physical ordinal position, which is preserved. Any
//! per-table failure aborts the whole introspection - callers never see a
//! partial result.

use crate::engine::values::sql_to_json;
use crate::error::CoreError;
use rusqlite::Connection;
use sandboxdb_commons::{ColumnDef, DataType, Row, TableDef};
use sandboxdb_sql::quote_ident;
use serde_json::Value;

/// Base tables of the namespace, excluding engine internals.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>, CoreError> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'")
        .map_err(CoreError::introspection)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(CoreError::introspection)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(CoreError::introspection)?;
    Ok(names)
}

/// Column names of one live table, in ordinal order.
pub fn live_column_names(conn: &Connection, table: &str) -> Result<Vec<String>, CoreError> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(CoreError::introspection)?;
    let names = stmt
        .query_map([table], |row| row.get::<_, String>(0))
        .map_err(CoreError::introspection)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(CoreError::introspection)?;
    Ok(names)
}

/// Reads the whole namespace back into the abstract representation.
pub fn introspect(conn: &Connection) -> Result<Vec<TableDef>, CoreError> {
    list_tables(conn)?
        .into_iter()
        .map(|name| introspect_table(conn, &name))
        .collect()
}

fn introspect_table(conn: &Connection, name: &str) -> Result<TableDef, CoreError> {
    let mut table = TableDef::new(name);
    table.columns = introspect_columns(conn, name)?;

    for unique_col in single_column_unique_indexes(conn, name)? {
        if let Some(i) = table.column_index(&unique_col) {
            table.columns[i].unique = true;
        }
    }

    // AUTOINCREMENT only ever attaches to the integer primary key, so the
    // stored DDL identifies the column unambiguously.
    if stored_ddl_has_autoincrement(conn, name)? {
        if let Some(col) = table.columns.iter_mut().find(|c| c.primary_key) {
            col.auto_increment = true;
        }
    }

    table.rows = read_rows(conn, name)?;
    Ok(table)
}

fn introspect_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnDef>, CoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT name, type, \"notnull\", dflt_value, pk \
             FROM pragma_table_info(?1) ORDER BY cid",
        )
        .map_err(CoreError::introspection)?;

    let columns = stmt
        .query_map([table], |row| {
            let name: String = row.get(0)?;
            let declared: String = row.get(1)?;
            let not_null: i64 = row.get(2)?;
            let dflt: Option<String> = row.get(3)?;
            let pk: i64 = row.get(4)?;

            let mut col = ColumnDef::new(name, normalize_declared_type(&declared));
            col.not_null = not_null != 0;
            // pk is the 1-based ordinal within the key; the model carries at
            // most one primary-key column, so only the first qualifies.
            col.primary_key = pk == 1;
            col.default_value = parse_default_literal(dflt);
            Ok(col)
        })
        .map_err(CoreError::introspection)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(CoreError::introspection)?;

    Ok(columns)
}

fn read_rows(conn: &Connection, table: &str) -> Result<Vec<Row>, CoreError> {
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {}", quote_ident(table)))
        .map_err(CoreError::introspection)?;
    let width = stmt.column_count();

    let mut rows = stmt.query([]).map_err(CoreError::introspection)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(CoreError::introspection)? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            let value_ref = row.get_ref(i).map_err(CoreError::introspection)?;
            values.push(sql_to_json(value_ref));
        }
        out.push(values);
    }
    Ok(out)
}

/// Names of columns covered by a single-column unique index the user
/// declared (origin `u`); primary-key indexes are reported separately.
fn single_column_unique_indexes(
    conn: &Connection,
    table: &str,
) -> Result<Vec<String>, CoreError> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_index_list(?1) WHERE \"unique\" = 1 AND origin = 'u'")
        .map_err(CoreError::introspection)?;
    let indexes = stmt
        .query_map([table], |row| row.get::<_, String>(0))
        .map_err(CoreError::introspection)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(CoreError::introspection)?;

    let mut columns = Vec::new();
    for index in indexes {
        let mut info = conn
            .prepare("SELECT name FROM pragma_index_info(?1)")
            .map_err(CoreError::introspection)?;
        let cols = info
            .query_map([&index], |row| row.get::<_, String>(0))
            .map_err(CoreError::introspection)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(CoreError::introspection)?;
        if let [only] = cols.as_slice() {
            columns.push(only.clone());
        }
    }
    Ok(columns)
}

fn stored_ddl_has_autoincrement(conn: &Connection, table: &str) -> Result<bool, CoreError> {
    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .map_err(CoreError::introspection)?;
    Ok(sql
        .map(|s| s.to_ascii_uppercase().contains("AUTOINCREMENT"))
        .unwrap_or(false))
}

/// Declared types come back exactly as written in the DDL; normalize the
/// spelling the same way the compiler does so a round trip is stable.
fn normalize_declared_type(declared: &str) -> String {
    if declared.trim().is_empty() {
        return "TEXT".to_string();
    }
    match DataType::from_declared(declared) {
        Some(dt) => dt.sql_name().to_string(),
        None => declared.trim().to_ascii_uppercase(),
    }
}

/// Best-effort reverse of the compiler's DEFAULT literal quoting.
fn parse_default_literal(raw: Option<String>) -> Value {
    let raw = match raw {
        Some(r) => r,
        None => return Value::Null,
    };
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        return Value::String(trimmed[1..trimmed.len() - 1].replace("''", "'"));
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    // Expressions such as CURRENT_TIMESTAMP stay as raw text.
    Value::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_lists_base_tables_without_internals() {
        let c = conn();
        c.execute_batch(
            "CREATE TABLE a (id INTEGER PRIMARY KEY AUTOINCREMENT); \
             CREATE TABLE b (x TEXT); \
             INSERT INTO a DEFAULT VALUES;",
        )
        .unwrap();
        let mut tables = list_tables(&c).unwrap();
        tables.sort();
        // sqlite_sequence exists because of AUTOINCREMENT but is filtered.
        assert_eq!(tables, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_columns_preserve_ordinal_position_and_flags() {
        let c = conn();
        c.execute_batch(
            "CREATE TABLE t (\
               id INTEGER PRIMARY KEY AUTOINCREMENT, \
               email TEXT NOT NULL UNIQUE, \
               status TEXT DEFAULT 'new', \
               score REAL)",
        )
        .unwrap();

        let tables = introspect(&c).unwrap();
        assert_eq!(tables.len(), 1);
        let t = &tables[0];
        let names: Vec<&str> = t.columns.iter().map(|c| c.column_name.as_str()).collect();
        assert_eq!(names, vec!["id", "email", "status", "score"]);

        assert!(t.columns[0].primary_key);
        assert!(t.columns[0].auto_increment);
        assert!(t.columns[1].not_null);
        assert!(t.columns[1].unique);
        assert_eq!(t.columns[2].default_value, Value::String("new".into()));
        assert_eq!(t.columns[3].data_type.as_deref(), Some("REAL"));
    }

    #[test]
    fn test_rows_project_positionally() {
        let c = conn();
        c.execute_batch(
            "CREATE TABLE t (a TEXT, b INTEGER); \
             INSERT INTO t VALUES ('x', 1), (NULL, 2);",
        )
        .unwrap();
        let t = &introspect(&c).unwrap()[0];
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[0], vec![Value::String("x".into()), Value::from(1)]);
        assert_eq!(t.rows[1], vec![Value::Null, Value::from(2)]);
    }

    #[test]
    fn test_introspection_does_not_mutate() {
        let c = conn();
        c.execute_batch("CREATE TABLE t (a TEXT); INSERT INTO t VALUES ('x');")
            .unwrap();
        let before = introspect(&c).unwrap();
        let after = introspect(&c).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_default_literal_parsing() {
        assert_eq!(parse_default_literal(None), Value::Null);
        assert_eq!(parse_default_literal(Some("NULL".into())), Value::Null);
        assert_eq!(parse_default_literal(Some("42".into())), Value::from(42));
        assert_eq!(
            parse_default_literal(Some("'it''s'".into())),
            Value::String("it's".into())
        );
        assert_eq!(
            parse_default_literal(Some("CURRENT_TIMESTAMP".into())),
            Value::String("CURRENT_TIMESTAMP".into())
        );
    }
}
