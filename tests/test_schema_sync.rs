//! Integration tests for schema synchronization: materialize, introspect,
//! merge-on-save, and destructive load.

mod common;

use common::{fixtures, TestContext};
use sandboxdb_core::engine::introspect::introspect;
use serde_json::Value;

#[test]
fn test_schema_round_trips_names_and_types() {
    let ctx = TestContext::new();
    ctx.service
        .create_workspace("rt", None, vec![fixtures::users_table()])
        .unwrap();

    let observer = ctx.observer();
    let mut session = observer.checkout(&ctx.namespace("rt")).unwrap();
    let live = introspect(session.conn()).unwrap();

    assert_eq!(live.len(), 1);
    let users = &live[0];
    assert_eq!(users.table_name, "users");

    let names: Vec<&str> = users.columns.iter().map(|c| c.column_name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "email"]);
    let types: Vec<&str> = users
        .columns
        .iter()
        .map(|c| c.data_type.as_deref().unwrap())
        .collect();
    assert_eq!(types, vec!["INTEGER", "TEXT", "TEXT"]);

    // Constraint flags survive the round trip too.
    assert!(users.columns[0].primary_key);
    assert!(users.columns[0].auto_increment);
    assert!(users.columns[1].not_null);
    assert!(users.columns[2].unique);
}

#[test]
fn test_rows_round_trip_as_multiset() {
    let ctx = TestContext::new();
    ctx.service
        .create_workspace("rows", None, vec![fixtures::tags_table()])
        .unwrap();

    let observer = ctx.observer();
    let mut session = observer.checkout(&ctx.namespace("rows")).unwrap();
    let live = introspect(session.conn()).unwrap();

    let mut values: Vec<String> = live[0]
        .rows
        .iter()
        .map(|row| row[0].to_string())
        .collect();
    values.sort();
    // The null position fell back to the column default at insert time.
    assert_eq!(values, vec!["\"rust\"".to_string(), "\"untagged\"".to_string()]);
}

#[test]
fn test_save_merge_preserves_and_overlays() {
    let ctx = TestContext::new();
    ctx.service
        .create_workspace(
            "merge",
            None,
            vec![
                fixtures::simple_table("a", &["x"]),
                fixtures::simple_table("b", &["y"]),
            ],
        )
        .unwrap();

    // Incoming {b', c}: b gains a column, c is new, a is untouched.
    let b_modified = fixtures::simple_table("b", &["y", "z"]);
    let c = fixtures::simple_table("c", &["w"]);
    let doc = ctx
        .service
        .save_workspace("merge", None, vec![b_modified, c])
        .unwrap();

    let names: Vec<&str> = doc.tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(doc.tables[1].columns.len(), 2);

    // The live namespace gained b.z additively and never lost a.
    let observer = ctx.observer();
    let mut session = observer.checkout(&ctx.namespace("merge")).unwrap();
    let live = introspect(session.conn()).unwrap();
    let live_b = live.iter().find(|t| t.table_name == "b").unwrap();
    let cols: Vec<&str> = live_b.columns.iter().map(|c| c.column_name.as_str()).collect();
    assert_eq!(cols, vec!["y", "z"]);
    assert!(live.iter().any(|t| t.table_name == "a"));
}

#[test]
fn test_load_is_destructive_to_live_only_state() {
    let ctx = TestContext::new();
    ctx.service
        .create_workspace("load", None, vec![fixtures::users_table()])
        .unwrap();

    // Tamper with the namespace outside the documented API.
    {
        let raw =
            rusqlite::Connection::open(ctx.dir.path().join("workspace_load.db")).unwrap();
        raw.execute_batch(
            "CREATE TABLE stray (junk TEXT); DELETE FROM users;",
        )
        .unwrap();
    }

    ctx.service.load_workspace("load").unwrap();

    let observer = ctx.observer();
    let mut session = observer.checkout(&ctx.namespace("load")).unwrap();
    let live = introspect(session.conn()).unwrap();

    let names: Vec<&str> = live.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["users"]);
    // Rows were rebuilt from the persisted definition.
    assert_eq!(live[0].rows.len(), 2);
    assert!(live[0]
        .rows
        .iter()
        .any(|row| row.contains(&Value::String("Alice".into()))));
}

#[test]
fn test_load_missing_workspace_is_not_found() {
    let ctx = TestContext::new();
    assert!(matches!(
        ctx.service.load_workspace("ghost"),
        Err(sandboxdb_core::CoreError::NotFound(_))
    ));
}
