//! Common functions used across test cases.

use std::collections::BTreeMap;
use std::path::Path;

use litegate::state::{create_state, ServerState};
use litegate_configuration as configuration;
use query_engine_execution::response::QueryResponse;

/// The query library the test deployments start from.
pub fn test_queries() -> configuration::QueryLibrary {
    let entries: &[(&str, &str)] = &[
        ("drop.table", "DROP TABLE IF EXISTS test"),
        (
            "create.table",
            "CREATE TABLE test ( oid INTEGER PRIMARY KEY, key TEXT NOT NULL, value TEXT )",
        ),
        (
            "insert",
            "INSERT INTO test ( key, value ) VALUES ( %key%, %value% )",
        ),
        ("select.one", "SELECT * FROM test WHERE oid = %oid% | one"),
        ("select.all", "SELECT * FROM test"),
        ("count", "SELECT COUNT(*) AS nb FROM test WHERE key = %key% | one"),
        ("update", "UPDATE test SET value = %value% WHERE key = %key%"),
        ("delete", "DELETE FROM test WHERE oid = %oid%"),
        ("delete.all", "DELETE FROM test"),
        (
            "replace",
            "DELETE FROM test WHERE key=%key%; \
             INSERT INTO test (key,value) VALUES(%key%,%value%)",
        ),
        (
            "truncate.bad",
            "DELETE FROM test; INSERT INTO missing (key) VALUES (%key%)",
        ),
        ("purge.one", "DELETE FROM test | one"),
    ];

    let mut library = configuration::QueryLibrary::empty();
    library.0.insert(
        "test".to_string(),
        entries
            .iter()
            .map(|(id, template)| ((*id).to_string(), (*template).to_string()))
            .collect(),
    );
    library
}

/// A server state over a scratch directory; database files are created on
/// demand below it.
pub fn create_test_state(directory: &Path) -> ServerState {
    create_test_state_with(directory, true)
}

pub fn create_test_state_with(directory: &Path, create_if_missing: bool) -> ServerState {
    let configuration = configuration::Configuration {
        queries: test_queries(),
        connection: configuration::DatabaseConnectionSettings {
            directory: directory.to_owned(),
            create_if_missing,
        },
        on_missing_parameter: configuration::MissingParameterPolicy::BindNull,
    };
    create_state(configuration).expect("create_state")
}

/// Run one operation through the connector, as the HTTP layer would.
pub async fn run_query(state: &ServerState, pairs: &[(&str, &str)]) -> QueryResponse {
    let parameters: BTreeMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    litegate::query::query(state, &parameters).await
}

/// Drop and recreate the `test` table.
pub async fn setup_table(state: &ServerState) {
    for query_id in ["drop.table", "create.table"] {
        let response = run_query(state, &[("db", "test"), ("tb", "test"), ("qr", query_id)]).await;
        assert!(response.success, "setup failed: {:?}", response.error);
    }
}
