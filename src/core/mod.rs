//! Core conversion logic for jsonl2csv.
//!
//! This module contains:
//! - [`models`] - Output shapes ([`Mode`], [`Row`]) and the per-record [`RoleContents`]
//! - [`transform`](mod@transform) - The record transformer
//! - [`stats`] - Dataset statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> jsonl2csv::Result<()> {
//! use jsonl2csv::config::ConvertConfig;
//! use jsonl2csv::core::{Mode, transform, to_csv};
//!
//! let conversion = transform(r#"{"prompt": "P", "completion": "C"}"#, Mode::TwoColumn);
//! let csv = to_csv(&conversion.rows, &ConvertConfig::new())?;
//! assert_eq!(csv, "prompt,completion\nP,C\n");
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod output;
pub mod stats;
pub mod transform;

// Re-export main types for convenience
pub use models::{Mode, RoleContents, Row};
pub use stats::DatasetStats;
pub use transform::{Conversion, parse_record, transform, transform_line};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
