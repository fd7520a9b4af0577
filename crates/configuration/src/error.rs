//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;
use thiserror::Error;

/// The configuration file could not be read or understood.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}, line {line}, column {column}: {message}", .file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("{0}")]
    IoError(String),
}

/// The configuration could not be written back to disk.
#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A parsed configuration could not be interpreted as runtime configuration.
#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid configuration version, expected {expected}, got {got}")]
    UnknownVersion { expected: u32, got: u32 },
}
