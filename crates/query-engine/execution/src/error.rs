//! Errors for batch execution.

use thiserror::Error;

/// A type for execution errors.
///
/// All of these are terminal for the current batch: any of them aborts the
/// remaining statements and rolls the transaction back.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing database name")]
    MissingDatabaseName,
    #[error("database unavailable: {0}")]
    Unavailable(sqlx::Error),
    #[error("{0}")]
    Execute(sqlx::Error),
    #[error("row not found")]
    RowNotFound,
    #[error("query failed")]
    QueryFailed,
}
