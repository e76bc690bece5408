//! Error types for jsonl2csv.
//!
//! There are two layers of failure, and they never mix:
//!
//! - [`LineError`] is a per-line diagnostic. The transformer records one for
//!   every line it could not turn into a row and keeps going. It is data,
//!   returned inside a [`Conversion`](crate::core::Conversion), never an `Err`.
//! - [`ConvertError`] covers everything around the transformer: reading the
//!   input, writing an export, picking an unknown format. Library users get
//!   typed variants they can match on.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized [`Result`] type for jsonl2csv I/O and export operations.
///
/// # Example
///
/// ```rust
/// use jsonl2csv::error::Result;
///
/// fn load() -> Result<String> {
///     Ok(String::new())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvertError>;

/// The error type for operations around the transformer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error while writing JSON or JSONL output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested output format or file extension is not usable.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What was being selected (e.g., "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The CSV delimiter is not a single ASCII character.
    #[error("Invalid delimiter '{input}'. Expected a single ASCII character (or \\t)")]
    InvalidDelimiter {
        /// The delimiter string that was provided
        input: String,
    },

    /// UTF-8 encoding error.
    ///
    /// Occurs when input bytes or a rendered export are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ConvertError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ConvertError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ConvertError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ConvertError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid delimiter error.
    pub fn invalid_delimiter(input: impl Into<String>) -> Self {
        ConvertError::InvalidDelimiter {
            input: input.into(),
        }
    }

    /// Creates a UTF-8 error with a description of where it happened.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ConvertError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ConvertError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ConvertError::InvalidFormat { .. })
    }

    /// Returns `true` if this is an invalid delimiter error.
    pub fn is_invalid_delimiter(&self) -> bool {
        matches!(self, ConvertError::InvalidDelimiter { .. })
    }
}

// ============================================================================
// Per-line diagnostics
// ============================================================================

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineErrorKind {
    /// The line is not valid JSON (syntax error or truncated document).
    MalformedJson,
    /// The line is valid JSON but not a record: not an object, or a field
    /// with the wrong type (`messages` not an array, `prompt` a number, ...).
    UnexpectedShape,
}

impl LineErrorKind {
    /// Classifies a `serde_json` failure.
    pub fn from_json(err: &serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => LineErrorKind::UnexpectedShape,
            Category::Syntax | Category::Eof | Category::Io => LineErrorKind::MalformedJson,
        }
    }
}

impl fmt::Display for LineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineErrorKind::MalformedJson => write!(f, "malformed JSON"),
            LineErrorKind::UnexpectedShape => write!(f, "unexpected record shape"),
        }
    }
}

/// A line that produced no row.
///
/// Carries the 1-based line number within the input (blank lines count) and
/// the offending raw text so callers can show it back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("line {line_number}: {reason}")]
pub struct LineError {
    /// 1-based position of the line in the input text.
    pub line_number: usize,
    /// The raw line, without its line terminator.
    pub line: String,
    /// Classification of the failure.
    pub kind: LineErrorKind,
    /// Parser message describing the failure.
    pub reason: String,
}

impl LineError {
    /// Creates a line error from its parts.
    pub fn new(
        line_number: usize,
        line: impl Into<String>,
        kind: LineErrorKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            line: line.into(),
            kind,
            reason: reason.into(),
        }
    }

    /// Creates a line error from a `serde_json` failure on `line`.
    pub fn from_json(line_number: usize, line: &str, err: &serde_json::Error) -> Self {
        Self::new(line_number, line, LineErrorKind::from_json(err), err.to_string())
    }

    /// Returns `true` if the line was not valid JSON at all.
    pub fn is_malformed_json(&self) -> bool {
        self.kind == LineErrorKind::MalformedJson
    }
}

// ============================================================================
// Tests
// ============================================================================
