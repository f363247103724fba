//! Report generation for tables and aggregation results
//!
//! Three generators are provided, each with a table and a summary entry point:
//! - **Console**: aligned plain text for the terminal
//! - **CSV**: spreadsheet-compatible output written through the `csv` crate
//! - **JSON**: machine-readable output mirroring the serialized table and summary types

mod common;
mod console;
mod csv;
mod json;

pub use console::{generate_summary as generate_summary_console, generate_table as generate_table_console};
pub use self::csv::{generate_summary as generate_summary_csv, generate_table as generate_table_csv};
pub use json::{generate_summary as generate_summary_json, generate_table as generate_table_json};
