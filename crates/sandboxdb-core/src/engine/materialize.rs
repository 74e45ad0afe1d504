//! Materialization: abstract definitions → live schema and data.
//!
//! Every entry point here runs its whole statement sequence inside one
//! transaction: either everything commits or the namespace is untouched.
//! Partial schema construction is never observable.

use crate::engine::introspect::{list_tables, live_column_names};
use crate::engine::values::json_to_sql;
use crate::error::CoreError;
use rusqlite::Connection;
use sandboxdb_commons::TableDef;
use sandboxdb_sql::{compile_add_column, compile_table, quote_ident};

/// Creates the given tables (idempotently) and inserts their sample rows.
pub fn materialize_tables(conn: &mut Connection, tables: &[TableDef]) -> Result<(), CoreError> {
    let tx = conn
        .transaction()
        .map_err(|e| CoreError::execution_from(&e))?;
    materialize_into(&tx, tables)?;
    tx.commit().map_err(|e| CoreError::execution_from(&e))
}

/// Destructively rebuilds the namespace from the definition: every base
/// table is dropped, then the definition is materialized, all in one
/// transaction. Live-only state is discarded by design of the load
/// operation.
pub fn rebuild_namespace(conn: &mut Connection, tables: &[TableDef]) -> Result<(), CoreError> {
    let tx = conn
        .transaction()
        .map_err(|e| CoreError::execution_from(&e))?;

    for table in list_tables(&tx)? {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {};", quote_ident(&table)))
            .map_err(|e| CoreError::execution_from(&e))?;
    }
    materialize_into(&tx, tables)?;

    tx.commit().map_err(|e| CoreError::execution_from(&e))
}

/// Save-side update of the live namespace: each incoming table is
/// materialized `IF NOT EXISTS`, and columns the live table is missing are
/// added additively. Existing live columns are never dropped or retyped.
pub fn apply_incoming_tables(
    conn: &mut Connection,
    incoming: &[TableDef],
) -> Result<(), CoreError> {
    let tx = conn
        .transaction()
        .map_err(|e| CoreError::execution_from(&e))?;

    for table in incoming {
        let compiled = compile_table(table)?;
        tx.execute_batch(&compiled.create)
            .map_err(|e| CoreError::execution_from(&e))?;

        let live = live_column_names(&tx, &table.table_name)?;
        for col in &table.columns {
            if !live.iter().any(|name| name == &col.column_name) {
                tx.execute_batch(&compile_add_column(&table.table_name, col))
                    .map_err(|e| CoreError::execution_from(&e))?;
            }
        }

        insert_rows(&tx, &compiled.inserts)?;
    }

    tx.commit().map_err(|e| CoreError::execution_from(&e))
}

fn materialize_into(conn: &Connection, tables: &[TableDef]) -> Result<(), CoreError> {
    for table in tables {
        let compiled = compile_table(table)?;
        conn.execute_batch(&compiled.create)
            .map_err(|e| CoreError::execution_from(&e))?;
        insert_rows(conn, &compiled.inserts)?;
    }
    Ok(())
}

fn insert_rows(
    conn: &Connection,
    inserts: &[sandboxdb_sql::CompiledInsert],
) -> Result<(), CoreError> {
    for insert in inserts {
        let params = rusqlite::params_from_iter(insert.params.iter().map(json_to_sql));
        conn.execute(&insert.sql, params)
            .map_err(|e| CoreError::execution_from(&e))?;
    }
    Ok(())
}
