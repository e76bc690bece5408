//! The record transformer: JSONL text in, rows and per-line errors out.
//!
//! [`transform`] is a pure function. It never fails as a whole: a line that
//! cannot be read becomes a [`LineError`] and the next line is processed.
//!
//! ```rust
//! use jsonl2csv::core::{Mode, Row, transform};
//!
//! let input = concat!(
//!     r#"{"messages": [{"role": "system", "content": "You are helpful."}, {"role": "user", "content": "Hello!"}, {"role": "assistant", "content": "Hi!"}]}"#,
//!     "\n\n",
//!     "not json\n",
//! );
//!
//! let conversion = transform(input, Mode::TwoColumn);
//! assert_eq!(conversion.rows, vec![Row::TwoColumn {
//!     prompt: "System: You are helpful.\n\nUser: Hello!".into(),
//!     completion: "Hi!".into(),
//! }]);
//! assert_eq!(conversion.errors.len(), 1);
//! assert_eq!(conversion.errors[0].line_number, 3);
//! ```

use serde::{Deserialize, Serialize, de};
use serde_json::Value;
use tracing::debug;

use super::models::{Mode, RoleContents, Row};
use super::stats::DatasetStats;
use crate::error::LineError;
use crate::message::Record;

const BOM: char = '\u{feff}';

/// Result of one [`transform`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Mode the rows were built for.
    pub mode: Mode,
    /// One row per readable non-blank line, in input order.
    pub rows: Vec<Row>,
    /// One entry per unreadable line, in input order.
    pub errors: Vec<LineError>,
    /// Number of lines in the input, blank ones included.
    pub lines_read: usize,
    /// Number of whitespace-only lines that were skipped.
    pub blank_lines: usize,
    /// Number of rows read from a record with non-empty system content.
    pub system_rows: usize,
}

impl Conversion {
    /// Returns `true` if every non-blank line produced a row.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of rows produced.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of lines skipped because they could not be read.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Computes dataset statistics for this conversion.
    pub fn stats(&self) -> DatasetStats {
        DatasetStats::from_conversion(self)
    }
}

/// Parses one line into a [`Record`].
///
/// The line is read as a JSON object first, so a repeated key keeps its
/// last value.
pub fn parse_record(line: &str) -> Result<Record, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;
    if !value.is_object() {
        return Err(de::Error::custom(format!(
            "expected a JSON object, found {}",
            json_type(&value)
        )));
    }
    Record::deserialize(value)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Transforms a single line into a row.
///
/// ```rust
/// use jsonl2csv::core::{Mode, Row, transform_line};
///
/// let row = transform_line(r#"{"prompt": "P", "completion": "C"}"#, Mode::ThreeColumn)?;
/// assert_eq!(row.values(), vec!["", "P", "C"]);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn transform_line(line: &str, mode: Mode) -> Result<Row, serde_json::Error> {
    let contents = read_contents(line)?;
    Ok(Row::build(&contents, mode))
}

fn read_contents(line: &str) -> Result<RoleContents, serde_json::Error> {
    parse_record(line).map(|record| RoleContents::from_record(&record))
}

/// Transforms JSONL text into rows.
///
/// Lines are split on `\n` (a trailing `\r` is dropped) and numbered from 1.
/// Whitespace-only lines are skipped without a row or an error. A leading
/// UTF-8 byte order mark is ignored.
pub fn transform(raw_text: &str, mode: Mode) -> Conversion {
    let text = raw_text.strip_prefix(BOM).unwrap_or(raw_text);
    let mut conversion = Conversion {
        mode,
        ..Conversion::default()
    };

    for (index, line) in text.lines().enumerate() {
        conversion.lines_read += 1;

        if line.trim().is_empty() {
            conversion.blank_lines += 1;
            continue;
        }

        match read_contents(line) {
            Ok(contents) => {
                if contents.has_system() {
                    conversion.system_rows += 1;
                }
                conversion.rows.push(Row::build(&contents, mode));
            }
            Err(e) => {
                let error = LineError::from_json(index + 1, line, &e);
                debug!(line = error.line_number, kind = %error.kind, "skipping line: {}", error.reason);
                conversion.errors.push(error);
            }
        }
    }

    debug!(
        %mode,
        lines = conversion.lines_read,
        rows = conversion.rows.len(),
        errors = conversion.errors.len(),
        "transform finished"
    );

    conversion
}
