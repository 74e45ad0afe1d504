//! Reconciliation of persisted and incoming table sets.
//!
//! Two policies exist. Replace-on-mutation lives in the service (the
//! persisted `tables` is wholly replaced by a fresh introspection after a
//! mutating execution). Merge-on-save lives here: incoming tables win by
//! name, persisted tables absent from the incoming set are preserved. A save
//! never removes a table.

use sandboxdb_commons::TableDef;

/// Overlays `incoming` onto `existing` by table name. Existing order is
/// preserved; new tables append in incoming order.
pub fn merge_tables(existing: &[TableDef], incoming: &[TableDef]) -> Vec<TableDef> {
    let mut merged: Vec<TableDef> = existing.to_vec();
    for table in incoming {
        match merged
            .iter_mut()
            .find(|m| m.table_name == table.table_name)
        {
            Some(slot) => *slot = table.clone(),
            None => merged.push(table.clone()),
        }
    }
    merged
}
