use serde::Serialize;

use super::transform::Conversion;

/// Basic statistics about a converted dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub rows: usize,
    pub errors: usize,
    /// Rows read from a record with non-empty system content.
    pub with_system: usize,
    /// Rows whose completion/assistant column is empty.
    pub empty_completions: usize,
    /// Mean characters on the prompt side per row.
    pub avg_prompt_chars: f64,
    /// Mean characters on the completion side per row.
    pub avg_completion_chars: f64,
}

impl DatasetStats {
    pub fn from_conversion(conversion: &Conversion) -> Self {
        let rows = &conversion.rows;

        let mut empty_completions = 0;
        let mut prompt_chars = 0usize;
        let mut completion_chars = 0usize;

        for row in rows {
            if row.completion().is_empty() {
                empty_completions += 1;
            }
            prompt_chars += row.prompt_chars();
            completion_chars += row.completion().chars().count();
        }

        Self {
            total_lines: conversion.lines_read,
            blank_lines: conversion.blank_lines,
            rows: rows.len(),
            errors: conversion.errors.len(),
            with_system: conversion.system_rows,
            empty_completions,
            avg_prompt_chars: mean(prompt_chars, rows.len()),
            avg_completion_chars: mean(completion_chars, rows.len()),
        }
    }

    /// Share of non-blank lines that became rows, as a percentage.
    pub fn success_rate(&self) -> f64 {
        let records = self.rows + self.errors;
        if records == 0 {
            return 0.0;
        }
        self.rows as f64 / records as f64 * 100.0
    }
}

fn mean(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}
