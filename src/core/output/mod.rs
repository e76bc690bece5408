//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with a header row - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of rows - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one row per line - requires `json-output` feature
//!
//! Every writer keeps row order. JSON and JSONL objects use the mode's column
//! names as keys.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> jsonl2csv::Result<()> {
//! use jsonl2csv::config::ConvertConfig;
//! use jsonl2csv::core::output::{to_csv, write_csv, write_jsonl};
//! use jsonl2csv::core::{Mode, transform};
//!
//! let input = std::fs::read_to_string("train.jsonl")?;
//! let conversion = transform(&input, Mode::ThreeColumn);
//! let config = ConvertConfig::new().with_mode(Mode::ThreeColumn);
//!
//! write_csv(&conversion.rows, "train.csv", &config)?;
//! write_jsonl(&conversion.rows, "train.normalized.jsonl")?;
//!
//! // Or get as a string
//! let csv_string = to_csv(&conversion.rows, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
