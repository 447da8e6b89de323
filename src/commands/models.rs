use crate::aggregator::{TrendFilter, TrendMetric};
use crate::indicators::UnmatchedPolicy;
use crate::utils::config::{
    DEFAULT_CHORD_TOP_N, DEFAULT_RANKING_TOP_N, DEFAULT_RELATIONSHIP_TOP_N, MATRIX_FILE_NAME,
    SUMMARY_FILE_NAME,
};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Country summary CSV
    pub summary: PathBuf,

    /// Bilateral trade matrix JSON
    pub matrix: PathBuf,

    /// Yearly summary or raw flow CSV (optional)
    pub trend: Option<PathBuf>,

    /// Network JSON (optional; derived from the matrix when absent)
    pub network: Option<PathBuf>,

    /// Reference data TOML overriding the built-in tables (optional)
    pub reference: Option<PathBuf>,

    /// Output path for the JSON report
    pub output: PathBuf,

    /// Trend filter mode
    pub filter: TrendFilter,

    /// Metric the trend view is ranked by
    pub metric: TrendMetric,

    /// Handling of matrix countries missing from the summary
    pub unmatched: UnmatchedPolicy,

    /// Number of countries in exporter/importer rankings
    pub ranking_size: usize,

    /// Number of highlighted bilateral relationships
    pub relationship_size: usize,

    /// Number of countries kept in the chord matrix
    pub chord_size: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            summary: PathBuf::from(SUMMARY_FILE_NAME),
            matrix: PathBuf::from(MATRIX_FILE_NAME),
            trend: None,
            network: None,
            reference: None,
            output: PathBuf::from("report.json"),
            filter: TrendFilter::default(),
            metric: TrendMetric::default(),
            unmatched: UnmatchedPolicy::default(),
            ranking_size: DEFAULT_RANKING_TOP_N,
            relationship_size: DEFAULT_RELATIONSHIP_TOP_N,
            chord_size: DEFAULT_CHORD_TOP_N,
            print_summary: false,
        }
    }
}

/// Arguments for the rollup command
#[derive(Debug, Clone)]
pub struct RollupArgs {
    /// Raw flow CSV
    pub flows: PathBuf,

    /// Directory receiving the summary, yearly and matrix tables
    pub out_dir: PathBuf,
}
