//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::ConvertConfig;
use crate::core::models::Row;
use crate::error::{ConvertError, Result};

/// Writes rows to a CSV file.
///
/// # Format
/// - Delimiter: `config.delimiter` (default `,`)
/// - Header: `config.mode.headers()`
///   - Two-column: `prompt`, `completion`
///   - Three-column: `system`, `user`, `assistant`
/// - Quoting: only fields containing the delimiter, `"`, CR or LF are
///   quoted; embedded quotes are doubled
/// - Encoding: UTF-8
///
/// Fails before the file is created if the delimiter is invalid or a row
/// was built for a different mode than `config.mode`.
pub fn write_csv(rows: &[Row], output_path: impl AsRef<Path>, config: &ConvertConfig) -> Result<()> {
    check_rows(rows, config)?;
    let file = File::create(output_path)?;
    write_records(rows, file, config)
}

/// Converts rows to a CSV string.
///
/// Same format as [`write_csv`], but returns a `String` instead of writing
/// to a file.
pub fn to_csv(rows: &[Row], config: &ConvertConfig) -> Result<String> {
    check_rows(rows, config)?;
    let mut buffer = Vec::new();
    write_records(rows, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn check_rows(rows: &[Row], config: &ConvertConfig) -> Result<()> {
    config.validate()?;

    match rows.iter().position(|row| row.mode() != config.mode) {
        Some(index) => Err(ConvertError::invalid_format(
            "CSV",
            format!(
                "row {} is {} but the output mode is {}",
                index + 1,
                rows[index].mode(),
                config.mode
            ),
        )),
        None => Ok(()),
    }
}

fn write_records<W: Write>(rows: &[Row], sink: W, config: &ConvertConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(sink);

    writer.write_record(config.mode.headers())?;

    for row in rows {
        writer.write_record(row.values())?;
    }

    writer.flush().map_err(ConvertError::from)
}
