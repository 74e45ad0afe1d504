//! Identifier and literal quoting.
//!
//! Every identifier that reaches generated SQL goes through [`quote_ident`],
//! so embedded quote characters are doubled rather than stripped and the
//! name can never be read as SQL syntax.

use serde_json::Value;

/// Wraps an identifier in double quotes, doubling embedded double quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Renders a JSON scalar as a SQL literal for use in a DEFAULT clause.
///
/// Numbers and booleans pass through bare; everything else becomes a
/// single-quoted string literal with embedded single quotes doubled.
pub fn quote_literal(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}
