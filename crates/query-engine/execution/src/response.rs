//! The flat result document assembled while a batch executes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

/// One result row: column name to value. Columns whose value is NULL are
/// omitted from the document rather than carried as an explicit null.
pub type RowDocument = Map<String, Value>;

/// The outcome of one batch, handed to the serialization layer verbatim.
///
/// `success` is always present. A failed batch carries `error` and nothing
/// else; a successful batch carries whichever of the other fields its
/// statements asked for. A later statement's write to a field replaces an
/// earlier statement's value; there is no merging.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    pub error: Option<String>,
    pub oid: Option<i64>,
    pub nb: Option<u64>,
    pub row: Option<RowDocument>,
    pub rows: Option<Vec<RowDocument>>,
}

impl QueryResponse {
    /// The uniform failure shape: `success = false` plus a message.
    pub fn failure(message: impl Into<String>) -> Self {
        QueryResponse {
            success: false,
            error: Some(message.into()),
            ..QueryResponse::default()
        }
    }
}
