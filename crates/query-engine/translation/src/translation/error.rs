//! Errors for template compilation.

use litegate_configuration::LookupError;
use thiserror::Error;

/// A type for compilation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("missing parameter {0}")]
    MissingParameter(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
