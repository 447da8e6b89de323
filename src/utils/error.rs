//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading input tables
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid trade matrix: {0}")]
    InvalidMatrix(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Errors that can occur while loading reference data
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read reference file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid reference TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid reference data: {0}")]
    Invalid(String),
}

/// Errors that can occur during indicator calculation
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Matrix country '{0}' has no entry in the country summary")]
    UnmatchedCountry(String),

    #[error("Invalid trade matrix: {0}")]
    InvalidMatrix(String),
}

/// Errors that can occur while building a single report view
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("No data available for view")]
    Empty,

    #[error("Trend source has no usable records: {0}")]
    NoTrendData(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
