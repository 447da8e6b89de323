//! Output writers for report data and rolled-up tables.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports (pretty)
//! - CSV/JSON input tables produced by the rollup
//! - Text summaries

pub mod json;
pub mod summary;
pub mod tables;

// Re-export main functions
pub use json::{read_report, report_to_string, write_json_pretty, write_report};
pub use summary::render_text_summary;
pub use tables::{write_csv, write_rollup, RollupPaths};
