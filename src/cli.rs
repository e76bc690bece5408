//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`ModeArg`] - Output shape selector
//! - [`OutputFormat`] - Output format options
//! - [`default_output_path`] - Output path derived from the input path
//!
//! # Using ModeArg and OutputFormat in Libraries
//!
//! Both convert into their library counterparts:
//!
//! ```rust
//! use jsonl2csv::cli::{ModeArg, OutputFormat};
//! use jsonl2csv::core::Mode;
//!
//! let mode: Mode = ModeArg::ThreeColumn.into();
//! assert_eq!(mode, Mode::ThreeColumn);
//!
//! let format: jsonl2csv::format::OutputFormat = OutputFormat::Jsonl.into();
//! assert_eq!(format.extension(), "jsonl");
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Marker for standard input / standard output in path arguments.
pub const STDIO: &str = "-";

/// Convert chat fine-tuning JSONL (OpenAI `messages` or `prompt`/`completion`)
/// into CSV, JSON or JSONL tables.
#[derive(Parser, Debug, Clone)]
#[command(name = "jsonl2csv")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    jsonl2csv train.jsonl
    jsonl2csv train.jsonl -o train.csv --mode three-column
    jsonl2csv train.jsonl -f jsonl -o normalized.jsonl
    jsonl2csv train.jsonl -d ';' --strict
    cat train.jsonl | jsonl2csv - -o - > train.csv")]
pub struct Args {
    /// Path to input JSONL file (`-` for stdin)
    pub input: String,

    /// Path to output file (`-` for stdout) [default: input name with the format's extension]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output shape
    #[arg(short, long, value_enum, default_value = "two-column")]
    pub mode: ModeArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// CSV field delimiter (single ASCII character, `\t` for tab)
    #[arg(short, long, default_value = ",")]
    pub delimiter: String,

    /// Exit with status 1 if any line could not be converted
    #[arg(long)]
    pub strict: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Resolves the output path, falling back to [`default_output_path`].
    pub fn output_path(&self) -> String {
        match &self.output {
            Some(output) => output.clone(),
            None => default_output_path(&self.input, self.format.into())
                .to_string_lossy()
                .into_owned(),
        }
    }

    /// Returns `true` if the export goes to standard output.
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_deref() == Some(STDIO)
    }
}

/// Output shape as a CLI value.
///
/// # Example
///
/// ```rust
/// use jsonl2csv::cli::ModeArg;
/// use std::str::FromStr;
///
/// assert_eq!(ModeArg::from_str("roles").unwrap(), ModeArg::ThreeColumn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeArg {
    /// `prompt`, `completion` (system and user merged into the prompt)
    #[default]
    #[value(aliases = ["two", "prompt-completion"])]
    TwoColumn,

    /// `system`, `user`, `assistant`
    #[value(aliases = ["three", "roles"])]
    ThreeColumn,
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::core::Mode::from(*self))
    }
}

impl std::str::FromStr for ModeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<crate::core::Mode>().map(Into::into)
    }
}

impl From<ModeArg> for crate::core::Mode {
    fn from(mode: ModeArg) -> crate::core::Mode {
        match mode {
            ModeArg::TwoColumn => crate::core::Mode::TwoColumn,
            ModeArg::ThreeColumn => crate::core::Mode::ThreeColumn,
        }
    }
}

impl From<crate::core::Mode> for ModeArg {
    fn from(mode: crate::core::Mode) -> ModeArg {
        match mode {
            crate::core::Mode::TwoColumn => ModeArg::TwoColumn,
            crate::core::Mode::ThreeColumn => ModeArg::ThreeColumn,
        }
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - Table with a header row
/// - [`Json`](OutputFormat::Json) - Array of row objects
/// - [`Jsonl`](OutputFormat::Jsonl) - One row object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with a header row (default)
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines - one row object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<crate::format::OutputFormat>()? {
            crate::format::OutputFormat::Csv => Ok(OutputFormat::Csv),
            crate::format::OutputFormat::Json => Ok(OutputFormat::Json),
            crate::format::OutputFormat::Jsonl => Ok(OutputFormat::Jsonl),
        }
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

/// Derives an output path from the input path.
///
/// The input's extension is replaced by the format's (`train.jsonl` →
/// `train.csv`) in the same directory. If that would overwrite the input,
/// `_converted` is appended to the stem. Stdin input writes to
/// `out.<ext>`.
///
/// ```rust
/// use jsonl2csv::cli::default_output_path;
/// use jsonl2csv::format::OutputFormat;
/// use std::path::PathBuf;
///
/// assert_eq!(default_output_path("data/train.jsonl", OutputFormat::Csv), PathBuf::from("data/train.csv"));
/// assert_eq!(default_output_path("train.jsonl", OutputFormat::Jsonl), PathBuf::from("train_converted.jsonl"));
/// assert_eq!(default_output_path("-", OutputFormat::Json), PathBuf::from("out.json"));
/// ```
pub fn default_output_path(input: &str, format: crate::format::OutputFormat) -> PathBuf {
    let extension = format.extension();

    if input == STDIO {
        return PathBuf::from(format!("out.{extension}"));
    }

    let input_path = Path::new(input);
    let candidate = input_path.with_extension(extension);
    if candidate != input_path {
        return candidate;
    }

    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    input_path.with_file_name(format!("{stem}_converted.{extension}"))
}
