//! # jsonl2csv
//!
//! A Rust library for turning chat fine-tuning datasets stored as JSON Lines
//! into flat tables.
//!
//! ## Overview
//!
//! Each input line is one training example in either shape:
//! - **Chat** - `{"messages": [{"role": "system", "content": ...}, {"role": "user", ...}, {"role": "assistant", ...}]}`
//! - **Flat** - `{"prompt": ..., "completion": ...}`
//!
//! Every readable line becomes exactly one row:
//! - **Two-column** - `prompt` (system and user merged with labels), `completion`
//! - **Three-column** - `system`, `user`, `assistant`
//!
//! When a role appears several times in one record, the last message wins.
//! Lines that are not valid records are skipped and reported, never fatal.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> jsonl2csv::Result<()> {
//! use jsonl2csv::prelude::*;
//!
//! let input = r#"{"messages": [{"role": "system", "content": "You are helpful."}, {"role": "user", "content": "Hello!"}, {"role": "assistant", "content": "Hi!"}]}
//! not json"#;
//!
//! let conversion = transform(input, Mode::TwoColumn);
//! assert_eq!(conversion.row_count(), 1);
//! assert_eq!(conversion.errors[0].line_number, 2);
//!
//! let csv = to_csv(&conversion.rows, &ConvertConfig::new())?;
//! assert_eq!(csv, "prompt,completion\n\"System: You are helpful.\n\nUser: Hello!\",Hi!\n");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - Transformation and export
//!   - [`core::transform`](mod@core::transform) - [`transform`](core::transform()), [`Conversion`](core::Conversion)
//!   - [`core::models`] - [`Mode`](core::Mode), [`Row`](core::Row), [`RoleContents`](core::RoleContents)
//!   - [`core::stats`] - [`DatasetStats`](core::DatasetStats)
//!   - [`core::output`] - `write_csv`, `write_json`, `write_jsonl` and their `to_*` string variants
//! - [`message`] - Typed input record ([`Record`](message::Record), [`ChatMessage`](message::ChatMessage), [`Role`](message::Role))
//! - [`config`] - [`ConvertConfig`](config::ConvertConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat), format dispatch
//! - [`error`] - [`ConvertError`], [`LineError`](error::LineError), [`Result`]
//! - `cli` - CLI types (with the `cli` feature)
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;

// Re-export the main types at the crate root for convenience
pub use error::{ConvertError, LineError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use jsonl2csv::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ConvertError, LineError, LineErrorKind, Result};

    // Input model
    pub use crate::message::{ChatMessage, Record, Role};

    // Transformation
    pub use crate::core::{Conversion, DatasetStats, Mode, RoleContents, Row, transform, transform_line};

    // Configuration
    pub use crate::config::ConvertConfig;

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
