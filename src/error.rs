//! Error types for the spyrit pipeline.

use std::fmt;

/// Result type alias for spyrit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for spyrit operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Trigger pattern failed to compile.
    Pattern { pattern: String, message: String },
    /// Malformed format description or action definition.
    InvalidFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::Pattern { pattern, message } => {
                write!(f, "pattern {pattern:?} failed to compile: {message}")
            }
            Self::InvalidFormat(s) => write!(f, "invalid format description: {s}"),
        }
    }
}

impl std::error::Error for Error {}
