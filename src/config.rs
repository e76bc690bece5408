//! Conversion settings for library usage.
//!
//! [`ConvertConfig`] carries everything the exporters need besides the rows:
//! the output [`Mode`] and the CSV delimiter. It has no CLI framework
//! dependencies and can be stored as JSON.
//!
//! # Example
//!
//! ```rust
//! use jsonl2csv::config::ConvertConfig;
//! use jsonl2csv::core::Mode;
//!
//! let config = ConvertConfig::new()
//!     .with_mode(Mode::ThreeColumn)
//!     .with_delimiter(b';');
//!
//! assert_eq!(config.mode, Mode::ThreeColumn);
//! assert_eq!(config.delimiter, b';');
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Mode;
use crate::error::{ConvertError, Result};

/// Settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Output shape (default: two-column)
    pub mode: Mode,

    /// Field delimiter for CSV output (default: `,`)
    pub delimiter: u8,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            mode: Mode::TwoColumn,
            delimiter: b',',
        }
    }
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tab-separated configuration.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }

    /// Sets the output mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the CSV delimiter.
    ///
    /// The byte is not checked here. `"`, `\n`, `\r` and non-ASCII bytes
    /// are rejected by [`validate`](Self::validate), which the CSV writer
    /// calls before writing anything.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Checks that the delimiter can produce readable CSV.
    ///
    /// ```rust
    /// use jsonl2csv::config::ConvertConfig;
    ///
    /// assert!(ConvertConfig::tsv().validate().is_ok());
    /// assert!(ConvertConfig::new().with_delimiter(b'"').validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if is_valid_delimiter(self.delimiter) {
            Ok(())
        } else {
            Err(ConvertError::invalid_delimiter(
                char::from(self.delimiter).escape_default().to_string(),
            ))
        }
    }
}

fn is_valid_delimiter(byte: u8) -> bool {
    byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r')
}

/// Parses a delimiter argument.
///
/// Accepts one ASCII character, or the escapes `\t` and `tab` for a tab.
///
/// ```rust
/// use jsonl2csv::config::parse_delimiter;
///
/// assert_eq!(parse_delimiter(";").unwrap(), b';');
/// assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
/// assert!(parse_delimiter("ab").is_err());
/// ```
pub fn parse_delimiter(input: &str) -> Result<u8> {
    if matches!(input, "\\t" | "tab") {
        return Ok(b'\t');
    }

    match input.as_bytes() {
        [byte] if is_valid_delimiter(*byte) => Ok(*byte),
        _ => Err(ConvertError::invalid_delimiter(input)),
    }
}
