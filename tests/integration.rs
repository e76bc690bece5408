//! Integration tests for the transformer and exporters with real files

use jsonl2csv::core::DatasetStats;
use jsonl2csv::error::LineErrorKind;
use jsonl2csv::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

fn fixtures_dir() -> &'static str {
    "tests/fixtures"
}

fn ensure_fixtures() {
    INIT.call_once(|| {
        let dir = fixtures_dir();
        if !Path::new(dir).exists() {
            fs::create_dir_all(dir).unwrap();
        }

        // Chat shape: system prompt on every record
        let chat_simple = concat!(
            r#"{"messages": [{"role": "system", "content": "You are helpful."}, {"role": "user", "content": "Hello!"}, {"role": "assistant", "content": "Hi there!"}]}"#,
            "\n",
            r#"{"messages": [{"role": "system", "content": "You are terse."}, {"role": "user", "content": "Capital of France?"}, {"role": "assistant", "content": "Paris."}]}"#,
            "\n",
            r#"{"messages": [{"role": "system", "content": "You are a poet."}, {"role": "user", "content": "Write a line"}, {"role": "assistant", "content": "Waves fold on the shore,\nsalt wind carries gull voices."}]}"#,
            "\n",
        );
        fs::write(format!("{dir}/chat_simple.jsonl"), chat_simple).unwrap();

        // Flat prompt/completion shape
        let flat = concat!(
            r#"{"prompt": "Translate: hola", "completion": "hello"}"#,
            "\n",
            r#"{"prompt": "  2 + 2 = ?  ", "completion": " 4 "}"#,
            "\n",
            r#"{"prompt": "No answer yet"}"#,
            "\n",
        );
        fs::write(format!("{dir}/flat.jsonl"), flat).unwrap();

        // Mixed: both shapes, blank lines, broken lines, multi-turn records
        let mixed = concat!(
            r#"{"messages": [{"role": "user", "content": "first"}, {"role": "assistant", "content": "one"}, {"role": "user", "content": "second"}, {"role": "assistant", "content": "two"}]}"#,
            "\n",
            "\n",
            r#"{"prompt": "P", "completion": "C"}"#,
            "\n",
            "not json\n",
            "   \n",
            r#"{"messages": [{"role": "tool", "content": "ignored"}, {"role": "user", "content": "Hi"}]}"#,
            "\n",
            r#"{"messages": "nope"}"#,
            "\n",
            r#"{"messages": [{"role": "system", "content": "S"}, {"role": "user", "content": "U"}, {"role": "assistant", "content": "A"}]}"#,
            "\n",
        );
        fs::write(format!("{dir}/mixed.jsonl"), mixed).unwrap();
    });
}

fn read_fixture(name: &str) -> String {
    ensure_fixtures();
    fs::read_to_string(format!("{}/{}", fixtures_dir(), name)).unwrap()
}

// ============================================================================
// Chat shape
// ============================================================================

#[test]
fn test_chat_two_column() {
    let conversion = transform(&read_fixture("chat_simple.jsonl"), Mode::TwoColumn);

    assert!(conversion.is_clean());
    assert_eq!(conversion.row_count(), 3);
    assert_eq!(
        conversion.rows[0],
        Row::TwoColumn {
            prompt: "System: You are helpful.\n\nUser: Hello!".into(),
            completion: "Hi there!".into(),
        }
    );
    assert_eq!(
        conversion.rows[2].completion(),
        "Waves fold on the shore,\nsalt wind carries gull voices."
    );
}

#[test]
fn test_chat_three_column() {
    let conversion = transform(&read_fixture("chat_simple.jsonl"), Mode::ThreeColumn);

    assert_eq!(conversion.row_count(), 3);
    assert_eq!(
        conversion.rows[1].values(),
        vec!["You are terse.", "Capital of France?", "Paris."]
    );
    assert!(conversion.rows.iter().all(|row| row.mode() == Mode::ThreeColumn));
}

// ============================================================================
// Flat shape
// ============================================================================

#[test]
fn test_flat_two_column_passthrough() {
    let conversion = transform(&read_fixture("flat.jsonl"), Mode::TwoColumn);

    assert!(conversion.is_clean());
    assert_eq!(
        conversion.rows,
        vec![
            Row::TwoColumn {
                prompt: "Translate: hola".into(),
                completion: "hello".into(),
            },
            Row::TwoColumn {
                prompt: "2 + 2 = ?".into(),
                completion: "4".into(),
            },
            Row::TwoColumn {
                prompt: "No answer yet".into(),
                completion: String::new(),
            },
        ]
    );
}

#[test]
fn test_flat_three_column() {
    let conversion = transform(&read_fixture("flat.jsonl"), Mode::ThreeColumn);

    assert_eq!(conversion.rows[0].values(), vec!["", "Translate: hola", "hello"]);
    assert_eq!(conversion.rows[1].values(), vec!["", "2 + 2 = ?", "4"]);
    assert_eq!(conversion.rows[2].values(), vec!["", "No answer yet", ""]);
}

// ============================================================================
// Mixed input
// ============================================================================

#[test]
fn test_mixed_rows_and_errors() {
    let conversion = transform(&read_fixture("mixed.jsonl"), Mode::ThreeColumn);

    assert_eq!(conversion.lines_read, 8);
    assert_eq!(conversion.blank_lines, 2);
    assert_eq!(conversion.row_count(), 4);
    assert_eq!(conversion.error_count(), 2);

    // Last message per role wins
    assert_eq!(conversion.rows[0].values(), vec!["", "second", "two"]);
    assert_eq!(conversion.rows[1].values(), vec!["", "P", "C"]);
    // Unknown roles are ignored
    assert_eq!(conversion.rows[2].values(), vec!["", "Hi", ""]);
    assert_eq!(conversion.rows[3].values(), vec!["S", "U", "A"]);

    let malformed = &conversion.errors[0];
    assert_eq!(malformed.line_number, 4);
    assert_eq!(malformed.line, "not json");
    assert_eq!(malformed.kind, LineErrorKind::MalformedJson);

    let shape = &conversion.errors[1];
    assert_eq!(shape.line_number, 7);
    assert_eq!(shape.line, r#"{"messages": "nope"}"#);
    assert_eq!(shape.kind, LineErrorKind::UnexpectedShape);
}

#[test]
fn test_mixed_stats() {
    let conversion = transform(&read_fixture("mixed.jsonl"), Mode::TwoColumn);
    let stats: DatasetStats = conversion.stats();

    assert_eq!(stats.total_lines, 8);
    assert_eq!(stats.blank_lines, 2);
    assert_eq!(stats.rows, 4);
    assert_eq!(stats.errors, 2);
    assert_eq!(stats.with_system, 1);
    assert_eq!(stats.empty_completions, 1);
    assert!((stats.success_rate() - 4.0 / 6.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_idempotent() {
    let input = read_fixture("mixed.jsonl");
    for mode in [Mode::TwoColumn, Mode::ThreeColumn] {
        assert_eq!(transform(&input, mode), transform(&input, mode));
    }
}

#[test]
fn test_empty_input() {
    for input in ["", "\n", "   \n\n\t"] {
        let conversion = transform(input, Mode::TwoColumn);
        assert_eq!(conversion.row_count(), 0);
        assert!(conversion.is_clean());
    }
}

// ============================================================================
// End-to-end: file in, file out
// ============================================================================

#[test]
fn test_file_to_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chat.csv");

    let conversion = transform(&read_fixture("chat_simple.jsonl"), Mode::TwoColumn);
    write_to_format(&conversion.rows, &out, OutputFormat::Csv, &ConvertConfig::new()).unwrap();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), vec!["prompt", "completion"]);

    let records: Vec<csv::StringRecord> = reader.records().map(std::result::Result::unwrap).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][0], "System: You are helpful.\n\nUser: Hello!");
    assert_eq!(&records[2][1], "Waves fold on the shore,\nsalt wind carries gull voices.");
}

#[test]
fn test_file_to_all_formats() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConvertConfig::new().with_mode(Mode::ThreeColumn);
    let conversion = transform(&read_fixture("mixed.jsonl"), config.mode);

    for format in OutputFormat::all() {
        let out = dir.path().join(format!("mixed.{}", format.extension()));
        write_to_format(&conversion.rows, &out, *format, &config).unwrap();
        assert!(out.exists(), "{format} output missing");

        let written = fs::read_to_string(&out).unwrap();
        let rendered = to_format_string(&conversion.rows, *format, &config).unwrap();
        assert_eq!(written, rendered, "{format} file and string output differ");
    }
}

#[test]
fn test_jsonl_output_reparses_as_rows() {
    let conversion = transform(&read_fixture("flat.jsonl"), Mode::TwoColumn);
    let jsonl = to_jsonl(&conversion.rows).unwrap();

    let rows: Vec<Row> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows, conversion.rows);
}

#[test]
fn test_line_errors_export() {
    let conversion = transform(&read_fixture("mixed.jsonl"), Mode::TwoColumn);
    let json = serde_json::to_value(&conversion.errors).unwrap();

    assert_eq!(json[0]["line_number"], 4);
    assert_eq!(json[0]["kind"], "malformed_json");
    assert_eq!(json[1]["kind"], "unexpected_shape");
}
