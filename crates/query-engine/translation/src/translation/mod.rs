//! Translate the incoming request to a Batch (bound SQL statements) to be run
//! against the database.

pub mod error;
pub mod template;

pub use error::Error;
pub use template::compile;

use std::collections::BTreeMap;

/// Request parameter addressing the database.
pub const DATABASE_PARAMETER: &str = "db";
/// Request parameter addressing the entity. Also the library scope.
pub const ENTITY_PARAMETER: &str = "tb";
/// Request parameter addressing the query to run.
pub const QUERY_PARAMETER: &str = "qr";

/// Resolves a named request parameter to its value.
///
/// `None` means the parameter was not supplied with the operation. Whether
/// that is an error is decided by the compiler: addressing parameters are
/// mandatory, everything else follows the configured missing-parameter
/// policy.
pub trait ParameterResolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

/// The flat request map is the canonical resolver.
impl ParameterResolver for BTreeMap<String, String> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
