//! Error types for the cuetext-editor crate
//!
//! One structured `SubtitleError` enum covers the whole engine:
//! format dispatch, parsing, timeline arithmetic, pattern compilation
//! and file IO. Search and replace never report match absence through
//! this type; a miss is a `success = false` outcome value.

use thiserror::Error;

/// Main error type for subtitle engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubtitleError {
    /// No format implementation registered for the given tag
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Structurally invalid source document. The load fails as a whole;
    /// callers never receive a partial document.
    #[error("Malformed document at line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// Timeline operation requested on a document with no cues
    #[error("Document has no cues")]
    EmptyDocument,

    /// A shift would move a time point below midnight
    #[error("Time out of range: {nanos} ns")]
    TimeOutOfRange { nanos: i64 },

    /// User-supplied search pattern failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// File IO failure during session load or save
    #[error("IO error: {0}")]
    Io(String),
}

impl SubtitleError {
    /// Create a `Malformed` error with a 1-indexed source line number
    pub fn malformed<T: core::fmt::Display>(line: usize, message: T) -> Self {
        Self::Malformed {
            line,
            message: message.to_string(),
        }
    }

    /// Create an `InvalidPattern` error from a failed regex compilation
    pub fn pattern(pattern: &str, error: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: error.to_string(),
        }
    }

    /// Create an IO error
    pub fn io<T: core::fmt::Display>(message: T) -> Self {
        Self::Io(message.to_string())
    }
}

/// Result type alias for engine operations
pub type Result<T> = core::result::Result<T, SubtitleError>;
