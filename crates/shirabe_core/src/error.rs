//! Engine error types.

use thiserror::Error;

/// Errors that can occur while constructing or driving the linter.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }
}

/// Errors raised by the position index on malformed coordinates.
///
/// These never escape the engine: the normalizer catches them and
/// degrades to "fix discarded" while keeping the finding.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PositionError {
    /// Offset is beyond the end of the document.
    #[error("offset {offset} is out of range for a document of length {len}")]
    OutOfRange {
        /// The rejected offset.
        offset: u32,
        /// Document length in bytes.
        len: u32,
    },

    /// Line/column pair names a place the document does not have.
    #[error("position {line}:{column} does not exist in the document")]
    InvalidPosition {
        /// The rejected line (0-indexed).
        line: u32,
        /// The rejected column (0-indexed).
        column: u32,
    },
}

/// A rule capability failed mid-scan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct RuleError(String);

impl RuleError {
    /// Creates a new rule error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
