//! JSON Lines (JSONL) output writer.
//!
//! Writing JSONL back out is useful for:
//! - Re-importing normalized rows into another fine-tuning pipeline
//! - Diffing datasets line by line
//! - Streaming consumers that read one record at a time

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::models::Row;
use crate::error::Result;

/// Writes rows to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"prompt":"User: Hello","completion":"Hi"}
/// {"prompt":"User: Bye","completion":"See you"}
/// ```
pub fn write_jsonl(rows: &[Row], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(rows, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts rows to a JSONL string.
///
/// Same format as [`write_jsonl`], but returns a `String` instead of writing
/// to a file. Every line, including the last, ends with `\n`.
pub fn to_jsonl(rows: &[Row]) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(rows: &[Row], writer: &mut W) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *writer, row)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_jsonl_basic() {
        let rows = vec![
            Row::ThreeColumn {
                system: String::new(),
                user: "U".into(),
                assistant: "A".into(),
            },
            Row::ThreeColumn {
                system: "S".into(),
                user: "line\nbreak".into(),
                assistant: "A2".into(),
            },
        ];

        let jsonl = to_jsonl(&rows).unwrap();
        assert_eq!(
            jsonl,
            "{\"system\":\"\",\"user\":\"U\",\"assistant\":\"A\"}\n\
             {\"system\":\"S\",\"user\":\"line\\nbreak\",\"assistant\":\"A2\"}\n"
        );
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert_eq!(to_jsonl(&[]).unwrap(), "");
    }

    #[test]
    fn test_write_jsonl_one_object_per_line() {
        let rows = vec![
            Row::TwoColumn {
                prompt: "p1".into(),
                completion: "c1".into(),
            },
            Row::TwoColumn {
                prompt: "p2".into(),
                completion: "c2".into(),
            },
        ];

        let temp_file = NamedTempFile::new().unwrap();
        write_jsonl(&rows, temp_file.path()).unwrap();

        let file = std::fs::File::open(temp_file.path()).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["prompt"], "p1");
        assert_eq!(first["completion"], "c1");
    }
}
