//! Error types for tab-delimited records, tables and indices

use thiserror::Error;

/// Result type alias for `tab-util` operations
pub type Result<T> = std::result::Result<T, TabError>;

/// Failures surfaced by record, table and index operations
#[derive(Debug, Error)]
pub enum TabError {
    /// A construction argument was malformed (e.g. a negative line number)
    #[error("validation error: {0}")]
    Validation(String),

    /// A data line had fewer fields than the declared header
    #[error("parse error at line {line}: expected at least {expected} fields, got {actual}")]
    Parse {
        /// 1-based physical line number of the offending line
        line: usize,
        /// Number of columns in the header
        expected: usize,
        /// Number of fields found on the line
        actual: usize,
    },

    /// A key, position or line number did not resolve
    #[error("not found: {0}")]
    NotFound(String),

    /// A source line could not be read (e.g. invalid UTF-8)
    #[error("read error at line {line}: {source}")]
    Read {
        /// 1-based physical line number
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TabError {
    pub(crate) fn not_found(what: impl std::fmt::Display) -> Self {
        TabError::NotFound(what.to_string())
    }
}
