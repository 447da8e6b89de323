//! Configuration and constants for the pipeline.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// GDP estimates are stored in trillions of USD
pub const GDP_SCALE: f64 = 1e12;

/// GDP used when a country has no entry in the reference table (trillions USD)
pub const FALLBACK_GDP_TRILLIONS: f64 = 1.0;

/// Yearly summary rows at or below this total trade (USD) are dropped
pub const MATERIALITY_FLOOR_USD: f64 = 1e9;

/// Label assigned to countries outside every configured region
pub const OTHER_REGION: &str = "Other";

/// Column whose presence marks a table as pre-aggregated yearly summaries
pub const YEARLY_SUMMARY_MARKER: &str = "total_trade";

// Whole-word markers for non-country aggregates ("Areas, nes", "Other Asia, nes")
pub const EXCLUDED_LABEL_MARKERS: &[&str] = &["Areas", "nes"];

// Default view sizes
pub const DEFAULT_TREND_TOP_N: usize = 5;
pub const DEFAULT_RANKING_TOP_N: usize = 10;
pub const DEFAULT_RELATIONSHIP_TOP_N: usize = 5;
pub const DEFAULT_CHORD_TOP_N: usize = 5;

// Rollup output file names (consumed by `analyze`)
pub const SUMMARY_FILE_NAME: &str = "trade_summary.csv";
pub const YEARLY_FILE_NAME: &str = "yearly_trade_summary.csv";
pub const MATRIX_FILE_NAME: &str = "trade_matrix.json";
pub const NETWORK_FILE_NAME: &str = "trade_network.json";
pub const FLOWS_FILE_NAME: &str = "trade_flows_raw.csv";
