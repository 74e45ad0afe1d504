//! Abstract workspace data model.
//!
//! A workspace document holds an ordered list of table definitions; each
//! table holds ordered columns and positionally-aligned rows. The document is
//! read and written as a whole - there is no field-level concurrency control.

mod column;
mod data_type;
mod table;
mod workspace;

pub use column::ColumnDef;
pub use data_type::DataType;
pub use table::{Row, TableDef};
pub use workspace::WorkspaceDoc;
