//! Output format types for the jsonl2csv library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks, plus dispatch functions that route rows to the right writer.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> jsonl2csv::Result<()> {
//! use jsonl2csv::config::ConvertConfig;
//! use jsonl2csv::core::{Mode, transform};
//! use jsonl2csv::format::{OutputFormat, write_to_format};
//!
//! let conversion = transform(r#"{"prompt": "P", "completion": "C"}"#, Mode::TwoColumn);
//!
//! // Write using format enum
//! write_to_format(&conversion.rows, "output.csv", OutputFormat::Csv, &ConvertConfig::new())?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("output.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConvertConfig;
use crate::core::Row;
use crate::error::ConvertError;

/// Output format for converted datasets.
///
/// Different formats serve different purposes:
/// - [`Csv`](OutputFormat::Csv) - Spreadsheets and dataset review tools
/// - [`Json`](OutputFormat::Json) - Structured array, good for APIs
/// - [`Jsonl`](OutputFormat::Jsonl) - One normalized row per line, ideal for training pipelines
///
/// # Example
///
/// ```rust
/// use jsonl2csv::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with a header row (default)
    ///
    /// Comma-delimited unless the config says otherwise, with standard
    /// quoting.
    #[default]
    Csv,

    /// JSON array of rows
    ///
    /// Standard JSON format, suitable for APIs and structured processing.
    Json,

    /// JSON Lines - one JSON object per line
    ///
    /// Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonl2csv::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// assert_eq!(OutputFormat::Json.extension(), "json");
    /// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Returns the MIME type for this format.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonl2csv::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Json.mime_type(), "application/json");
    /// ```
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonl2csv::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("output.jsonl").unwrap();
    /// assert_eq!(format, OutputFormat::Jsonl);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ConvertError::invalid_format(
                "output",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: csv, json, jsonl",
                    ext
                ),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes rows to a file in the specified format.
///
/// This is a convenience function that selects the appropriate writer
/// based on the format enum. `config` is only read by the CSV writer.
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(all(feature = "csv-output", feature = "json-output"))]
/// # fn example() -> jsonl2csv::Result<()> {
/// use jsonl2csv::config::ConvertConfig;
/// use jsonl2csv::core::Row;
/// use jsonl2csv::format::{OutputFormat, write_to_format};
///
/// let rows = vec![Row::TwoColumn { prompt: "User: Hi".into(), completion: "Hello".into() }];
/// let config = ConvertConfig::new();
///
/// write_to_format(&rows, "output.csv", OutputFormat::Csv, &config)?;
/// write_to_format(&rows, "output.json", OutputFormat::Json, &config)?;
/// write_to_format(&rows, "output.jsonl", OutputFormat::Jsonl, &config)?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    rows: &[Row],
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &ConvertConfig,
) -> Result<(), ConvertError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(rows, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(rows, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(rows, path),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts rows to a string in the specified format.
///
/// Useful when the output goes to stdout, an HTTP response or a download
/// link rather than a file.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "csv-output", feature = "json-output"))]
/// # fn example() -> jsonl2csv::Result<()> {
/// use jsonl2csv::config::ConvertConfig;
/// use jsonl2csv::core::Row;
/// use jsonl2csv::format::{OutputFormat, to_format_string};
///
/// let rows = vec![Row::TwoColumn { prompt: "User: Hi".into(), completion: "Hello".into() }];
/// let csv = to_format_string(&rows, OutputFormat::Csv, &ConvertConfig::new())?;
/// assert_eq!(csv, "prompt,completion\nUser: Hi,Hello\n");
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_string(
    rows: &[Row],
    format: OutputFormat,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(rows, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(rows),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(rows),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[allow(dead_code)]
fn missing_feature(format: OutputFormat) -> ConvertError {
    ConvertError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            match format {
                OutputFormat::Csv => "csv-output",
                OutputFormat::Json | OutputFormat::Jsonl => "json-output",
            }
        ),
    )
}
