//! Output formatting functions.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Print `value` as JSON, or its pretty rendering.
pub fn print_output<T: serde::Serialize>(value: &T, format: OutputFormat, pretty: impl FnOnce() -> String) {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(value)),
        OutputFormat::Pretty => println!("{}", pretty()),
    }
}
