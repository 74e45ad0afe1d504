//! The execution pipeline: validate, dry-run, run, classify.
//!
//! Caller SQL is executed twice. The first pass runs inside a transaction
//! that is always rolled back, so syntax and semantic errors surface without
//! any effect leaking. The second pass runs for real and is timed. The cost
//! is double execution and an assumption that the statement is deterministic
//! across the two runs; that trade-off is part of the operation's contract.

use crate::engine::session::Session;
use crate::error::CoreError;
use rusqlite::Connection;
use sandboxdb_sql::StatementKind;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

/// Name and declared type of one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub data_type: Option<String>,
}

/// Result of one successful statement run.
#[derive(Debug, Clone)]
pub struct StatementOutput {
    pub rows: Vec<Map<String, Value>>,
    pub row_count: usize,
    pub columns: Vec<ColumnMeta>,
    pub duration_ms: u64,
    pub kind: StatementKind,
}

/// Runs one statement through the full pipeline on an already checked-out
/// session. The statement timeout is installed before any caller SQL touches
/// the connection and cleared before the session goes back to its pool.
pub fn run_statement(
    session: &mut Session,
    sql: &str,
    timeout: Duration,
) -> Result<StatementOutput, CoreError> {
    let kind = StatementKind::classify(sql);

    session.install_statement_timeout(timeout);
    let outcome = run_both_phases(session.conn(), sql);
    session.clear_statement_timeout();

    let (rows, columns, row_count, duration_ms) = outcome?;
    Ok(StatementOutput {
        rows,
        row_count,
        columns,
        duration_ms,
        kind,
    })
}

type RunResult = (Vec<Map<String, Value>>, Vec<ColumnMeta>, usize, u64);

fn run_both_phases(conn: &mut Connection, sql: &str) -> Result<RunResult, CoreError> {
    // Phase 1: disposable transaction, never committed. A failure here means
    // the statement never ran for effect.
    if let Err(e) = dry_run(conn, sql) {
        return Err(CoreError::syntax_from(&e));
    }

    // Phase 2: the same statement, for real, timed.
    let started = Instant::now();
    let (rows, columns, row_count) =
        execute_for_effect(conn, sql).map_err(|e| CoreError::execution_from(&e))?;
    let duration_ms = started.elapsed().as_millis() as u64;
    Ok((rows, columns, row_count, duration_ms))
}

/// Executes the statement inside a transaction that is rolled back on every
/// path. A rollback failure is logged but must not mask the original error.
fn dry_run(conn: &mut Connection, sql: &str) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    let result = tx.execute_batch(sql);
    if let Err(rollback_err) = tx.rollback() {
        log::warn!("dry-run rollback failed: {}", rollback_err);
    }
    result
}

type EffectResult = rusqlite::Result<(Vec<Map<String, Value>>, Vec<ColumnMeta>, usize)>;

fn execute_for_effect(conn: &Connection, sql: &str) -> EffectResult {
    let mut stmt = conn.prepare(sql)?;

    if stmt.column_count() > 0 {
        let columns: Vec<ColumnMeta> = stmt
            .columns()
            .iter()
            .map(|c| ColumnMeta {
                name: c.name().to_string(),
                data_type: c.decl_type().map(str::to_string),
            })
            .collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut object = Map::new();
            for (i, col) in columns.iter().enumerate() {
                object.insert(
                    col.name.clone(),
                    crate::engine::values::sql_to_json(row.get_ref(i)?),
                );
            }
            out.push(object);
        }
        let row_count = out.len();
        return Ok((out, columns, row_count));
    }

    drop(stmt);
    match conn.execute(sql, []) {
        Ok(affected) => Ok((Vec::new(), Vec::new(), affected)),
        // Batches fall back to whole-text execution; the affected count then
        // reflects the last statement, which is what the engine reports.
        Err(rusqlite::Error::MultipleStatement) => {
            conn.execute_batch(sql)?;
            Ok((Vec::new(), Vec::new(), conn.changes() as usize))
        }
        Err(e) => Err(e),
    }
}
