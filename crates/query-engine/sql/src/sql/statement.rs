//! Compiled statements and the batches that group them.

use super::string::Sql;

/// Name of an addressed database. Maps to a `<name>.db` SQLite file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseName(pub String);

impl std::fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let DatabaseName(name) = self;
        write!(f, "{name}")
    }
}

/// A single parameter-bound statement together with its fetch annotations.
///
/// The fetch flags say what to read back after the statement runs: the last
/// inserted row id (`fetch_oid`), the affected-row count (`fetch_count`), a
/// single row (`fetch_one`) or every row (`fetch_all`). `fetch_one` and
/// `fetch_all` are mutually exclusive; the compiler maintains that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: Sql,
    pub fetch_one: bool,
    pub fetch_all: bool,
    pub fetch_oid: bool,
    pub fetch_count: bool,
}

impl Statement {
    /// A statement with no fetch annotations.
    pub fn new(sql: Sql) -> Statement {
        Statement {
            sql,
            fetch_one: false,
            fetch_all: false,
            fetch_oid: false,
            fetch_count: false,
        }
    }

    /// Turn off every fetch flag.
    pub fn clear_fetch(&mut self) {
        self.fetch_one = false;
        self.fetch_all = false;
        self.fetch_oid = false;
        self.fetch_count = false;
    }

    /// Whether the statement asks for row output at all.
    pub fn fetches_rows(&self) -> bool {
        self.fetch_one || self.fetch_all
    }
}

/// The ordered statements compiled from one template, executed as a single
/// transaction against one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub database: DatabaseName,
    pub statements: Vec<Statement>,
}

impl Batch {
    /// A multi-statement batch never produces row, oid or count output.
    pub fn is_multi(&self) -> bool {
        self.statements.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_statement_batch_is_not_multi() {
        let batch = Batch {
            database: DatabaseName("test".to_string()),
            statements: vec![Statement::new(Sql::new())],
        };
        assert!(!batch.is_multi());
    }

    #[test]
    fn two_statement_batch_is_multi() {
        let batch = Batch {
            database: DatabaseName("test".to_string()),
            statements: vec![Statement::new(Sql::new()), Statement::new(Sql::new())],
        };
        assert!(batch.is_multi());
    }
}
