//! The query library: named SQL templates grouped by scope.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Scope used to look up templates when an operation does not address an
/// entity.
pub const DEFAULT_SCOPE: &str = "default";

/// Named SQL templates, grouped by scope.
///
/// A scope is the addressed entity name, or [`DEFAULT_SCOPE`] when the
/// operation names none. Templates are raw SQL with `%name%` placeholders and
/// an optional trailing fetch directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct QueryLibrary(pub BTreeMap<String, BTreeMap<String, String>>);

impl QueryLibrary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up the template registered for a query id within a scope.
    pub fn lookup(&self, scope: &str, query_id: &str) -> Result<&str, LookupError> {
        let section = self
            .0
            .get(scope)
            .ok_or_else(|| LookupError::SectionNotFound(scope.to_string()))?;
        section
            .get(query_id)
            .map(String::as_str)
            .ok_or_else(|| LookupError::QueryNotFound {
                scope: scope.to_string(),
                query_id: query_id.to_string(),
            })
    }
}

/// No template exists for a scope/query-id pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("missing section {0}")]
    SectionNotFound(String),
    #[error("missing option {query_id} in section {scope}")]
    QueryNotFound { scope: String, query_id: String },
}
