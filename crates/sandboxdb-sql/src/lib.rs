//! # sandboxdb-sql
//!
//! SQL generation and classification for SandboxDB.
//!
//! Two concerns live here:
//! - the DDL/DML compiler, which turns an abstract [`TableDef`] into
//!   engine-ready `CREATE TABLE` / parameterized `INSERT` statements, and
//! - the statement classifier, which decides from the leading keyword
//!   whether caller SQL can have mutated the namespace.
//!
//! Syntax checking is NOT done here - the engine is the authority on what
//! parses. The classifier is deliberately lexical (see [`classifier`]).
//!
//! [`TableDef`]: sandboxdb_commons::TableDef

pub mod classifier;
pub mod ddl;
pub mod quote;

pub use classifier::StatementKind;
pub use ddl::{compile_add_column, compile_table, CompileError, CompiledInsert, CompiledTable};
pub use quote::{quote_ident, quote_literal};
