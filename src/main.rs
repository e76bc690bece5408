//! # jsonl2csv CLI
//!
//! Command-line interface for the jsonl2csv library.

use std::fs;
use std::io::{self, Read, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use jsonl2csv::cli::{Args, STDIO};
use jsonl2csv::config::{ConvertConfig, parse_delimiter};
use jsonl2csv::core::{Conversion, Mode, transform};
use jsonl2csv::format::{OutputFormat, to_format_string, write_to_format};
use jsonl2csv::{ConvertError, LineError};

/// Longest raw-line excerpt shown next to a line error.
const EXCERPT_CHARS: usize = 80;

fn main() {
    init_tracing();

    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<i32, ConvertError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let mode: Mode = args.mode.into();
    let format: OutputFormat = args.format.into();
    let config = ConvertConfig::new()
        .with_mode(mode)
        .with_delimiter(parse_delimiter(&args.delimiter)?);

    let to_stdout = args.writes_to_stdout();
    let output_path = args.output_path();
    // Stdout carries the export itself, so the banner and summary stay off it.
    let verbose = !args.quiet && !to_stdout;

    if verbose {
        println!("📦 jsonl2csv v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:   {}", display_input(&args.input));
        println!("💾 Output:  {}", output_path);
        println!("📄 Format:  {}", format);
        println!("🧩 Mode:    {} ({})", mode, mode.headers().join(", "));
        println!();
    }

    // Step 1: Read
    info!(input = %args.input, "reading input");
    let read_start = Instant::now();
    let raw = read_input(&args.input)?;
    debug!(bytes = raw.len(), elapsed = ?read_start.elapsed(), "input read");

    // Step 2: Transform
    if verbose {
        println!("⏳ Converting records...");
    }
    let convert_start = Instant::now();
    let conversion = transform(&raw, mode);
    if verbose {
        println!(
            "   {} rows from {} lines ({:.2}s)",
            conversion.row_count(),
            conversion.lines_read,
            convert_start.elapsed().as_secs_f64()
        );
    }

    report_line_errors(&conversion.errors);

    // Step 3: Write
    if to_stdout {
        let rendered = to_format_string(&conversion.rows, format, &config)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    } else {
        if verbose {
            println!("💾 Writing {}...", format);
        }
        let write_start = Instant::now();
        write_to_format(&conversion.rows, &output_path, format, &config)?;
        if verbose {
            println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());
        }
    }

    if verbose {
        println!();
        println!("✅ Done! Output saved to {}", output_path);
        print_summary(&conversion, total_start);
    }

    if args.strict && !conversion.is_clean() {
        eprintln!(
            "❌ {} line(s) could not be converted (--strict)",
            conversion.error_count()
        );
        return Ok(1);
    }

    Ok(0)
}

/// Reads the whole input, from stdin when `input` is `-`.
fn read_input(input: &str) -> Result<String, ConvertError> {
    let bytes = if input == STDIO {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        buffer
    } else {
        fs::read(input)?
    };

    String::from_utf8(bytes)
        .map_err(|e| ConvertError::utf8(format!("input {}", display_input(input)), e))
}

fn report_line_errors(errors: &[LineError]) {
    if errors.is_empty() {
        return;
    }

    eprintln!("⚠️  Skipped {} line(s):", errors.len());
    for error in errors {
        eprintln!("   {}", error);
        eprintln!("      > {}", excerpt(&error.line, EXCERPT_CHARS));
    }
}

fn print_summary(conversion: &Conversion, total_start: Instant) {
    let stats = conversion.stats();

    println!();
    println!("📊 Summary:");
    println!("   Lines:        {}", stats.total_lines);
    println!("   Blank:        {}", stats.blank_lines);
    println!("   Rows:         {}", stats.rows);
    println!("   Skipped:      {}", stats.errors);
    println!("   Success rate: {:.1}%", stats.success_rate());
    println!();
    println!("📈 Dataset:");
    println!("   With system prompt:  {}", stats.with_system);
    println!("   Empty completions:   {}", stats.empty_completions);
    println!("   Avg prompt chars:    {:.1}", stats.avg_prompt_chars);
    println!("   Avg completion chars: {:.1}", stats.avg_completion_chars);

    let total_time = total_start.elapsed().as_secs_f64();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time);
    if total_time > 0.0 {
        println!(
            "   Throughput:  {:.0} lines/sec",
            stats.total_lines as f64 / total_time
        );
    }
}

fn display_input(input: &str) -> &str {
    if input == STDIO { "<stdin>" } else { input }
}

/// Cuts `line` to at most `max_chars` characters, marking the cut with `…`.
fn excerpt(line: &str, max_chars: usize) -> String {
    match line.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}…", &line[..byte_index]),
        None => line.to_string(),
    }
}
