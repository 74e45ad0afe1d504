//! Lexical statement classification.
//!
//! Classification is a prefix check on the first whitespace-delimited
//! keyword, not a parse: a batch, a comment-prefixed statement, or a CTE is
//! classified by its literal first word. That is the documented contract;
//! the engine, not this module, decides what the text actually does.

/// Coarse statement kind derived from the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Create,
    Alter,
    Drop,
    Insert,
    Update,
    Delete,
    Select,
    Other,
}

impl StatementKind {
    /// Classifies SQL text by its first keyword, case-insensitively and
    /// ignoring leading whitespace.
    pub fn classify(sql: &str) -> Self {
        let first = sql
            .split_whitespace()
            .next()
            .map(str::to_ascii_uppercase)
            .unwrap_or_default();

        match first.as_str() {
            "CREATE" => StatementKind::Create,
            "ALTER" => StatementKind::Alter,
            "DROP" => StatementKind::Drop,
            "INSERT" => StatementKind::Insert,
            "UPDATE" => StatementKind::Update,
            "DELETE" => StatementKind::Delete,
            "SELECT" => StatementKind::Select,
            _ => StatementKind::Other,
        }
    }

    /// Whether a successful execution of this kind may have changed the
    /// namespace's schema or data, and therefore requires a resync of the
    /// persisted definition.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            StatementKind::Create
                | StatementKind::Alter
                | StatementKind::Drop
                | StatementKind::Insert
                | StatementKind::Update
                | StatementKind::Delete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_mutating_keywords() {
        for sql in [
            "CREATE TABLE t (a TEXT)",
            "alter table t add column b TEXT",
            "DROP TABLE t",
            "insert into t values (1)",
            "Update t set a = 1",
            "DELETE FROM t",
        ] {
            assert!(StatementKind::classify(sql).is_mutating(), "{}", sql);
        }
    }

    #[test]
    fn test_leading_whitespace_and_case_are_ignored() {
        assert_eq!(
            StatementKind::classify("   \n\t iNsErT INTO t VALUES (1)"),
            StatementKind::Insert
        );
    }

    #[test]
    fn test_select_and_unknown_are_not_mutating() {
        assert!(!StatementKind::classify("SELECT * FROM t").is_mutating());
        assert!(!StatementKind::classify("PRAGMA table_info(t)").is_mutating());
        assert!(!StatementKind::classify("").is_mutating());
    }

    #[test]
    fn test_prefix_check_is_lexical_not_a_parse() {
        // A CTE that ends in an insert still reads as a plain WITH statement.
        let cte = "WITH x AS (SELECT 1) INSERT INTO t SELECT * FROM x";
        assert_eq!(StatementKind::classify(cte), StatementKind::Other);
        // A comment before the keyword hides it. Known, documented limitation.
        let commented = "/* setup */ INSERT INTO t VALUES (1)";
        assert_eq!(StatementKind::classify(commented), StatementKind::Other);
    }
}
