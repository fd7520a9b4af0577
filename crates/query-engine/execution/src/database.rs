//! Opening connections to the named database files.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;

use query_engine_sql::sql::statement::DatabaseName;

use crate::error::Error;

/// Opens connections to named SQLite databases below a configured directory.
///
/// Every batch acquires its own connection; nothing is pooled or shared
/// across operations.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    directory: PathBuf,
    create_if_missing: bool,
}

impl ConnectionFactory {
    pub fn new(directory: impl AsRef<Path>, create_if_missing: bool) -> Self {
        Self {
            directory: directory.as_ref().to_owned(),
            create_if_missing,
        }
    }

    /// The file backing a named database.
    pub fn database_path(&self, name: &DatabaseName) -> PathBuf {
        self.directory.join(format!("{name}.db"))
    }

    /// Open a connection to the named database.
    pub async fn open(&self, name: &DatabaseName) -> Result<SqliteConnection, Error> {
        if name.0.is_empty() {
            return Err(Error::MissingDatabaseName);
        }

        let options = SqliteConnectOptions::new()
            .filename(self.database_path(name))
            .create_if_missing(self.create_if_missing);

        SqliteConnection::connect_with(&options)
            .await
            .map_err(Error::Unavailable)
    }
}
