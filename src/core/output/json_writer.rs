//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::Row;
use crate::error::Result;

/// Writes rows to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"prompt": "User: Hello", "completion": "Hi"},
///   {"prompt": "User: Bye", "completion": "See you"}
/// ]
/// ```
pub fn write_json(rows: &[Row], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(rows)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts rows to a pretty-printed JSON array.
///
/// Same format as [`write_json`], but returns a `String` instead of writing
/// to a file.
pub fn to_json(rows: &[Row]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
