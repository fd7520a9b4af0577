//! Database connection settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the named SQLite database files live and how they are opened.
///
/// An operation addressing database `name` opens `<directory>/<name>.db`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnectionSettings {
    /// Directory containing the database files.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Create a missing database file on first use instead of failing.
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

impl Default for DatabaseConnectionSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            create_if_missing: default_create_if_missing(),
        }
    }
}

// for serde default //
fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_create_if_missing() -> bool {
    true
}
