//! Trade Indicators CLI
//!
//! Derives economic indicators and chart datasets from country trade
//! tables and writes them as a single JSON report.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use trade_indicators::aggregator::{TrendFilter, TrendMetric};
use trade_indicators::commands::{
    display_schema, display_version, execute_analyze, execute_rollup, validate_args,
    validate_report_file, AnalyzeArgs, RollupArgs,
};
use trade_indicators::indicators::UnmatchedPolicy;
use trade_indicators::utils::config::{
    DEFAULT_CHORD_TOP_N, DEFAULT_RANKING_TOP_N, DEFAULT_RELATIONSHIP_TOP_N, DEFAULT_TREND_TOP_N,
};

/// Trade Indicators - economic indicators from trade tables
#[derive(Parser, Debug)]
#[command(name = "trade-indicators")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Trend filter mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    /// Top N countries by the latest year's metric
    #[value(name = "top5")]
    Top,
    /// Every country
    All,
    /// Aggregated per region
    Regions,
}

/// Trend metric
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    Volume,
    Balance,
    Openness,
}

impl From<MetricArg> for TrendMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Volume => TrendMetric::TotalTradeVolume,
            MetricArg::Balance => TrendMetric::TradeBalance,
            MetricArg::Openness => TrendMetric::TradeOpenness,
        }
    }
}

/// Handling of matrix countries missing from the summary
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnmatchedArg {
    Ignore,
    Warn,
    Error,
}

impl From<UnmatchedArg> for UnmatchedPolicy {
    fn from(policy: UnmatchedArg) -> Self {
        match policy {
            UnmatchedArg::Ignore => UnmatchedPolicy::Ignore,
            UnmatchedArg::Warn => UnmatchedPolicy::Warn,
            UnmatchedArg::Error => UnmatchedPolicy::Error,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate indicators and build the report
    Analyze {
        /// Country summary CSV
        #[arg(short, long)]
        summary: PathBuf,

        /// Bilateral trade matrix JSON
        #[arg(short, long)]
        matrix: PathBuf,

        /// Yearly summary or raw flow CSV for the trend view
        #[arg(short, long)]
        trend: Option<PathBuf>,

        /// Network JSON (derived from the matrix when omitted)
        #[arg(short, long)]
        network: Option<PathBuf>,

        /// Reference data TOML (GDP, regions, exclusions)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Trend filter mode
        #[arg(long, value_enum, default_value = "top5")]
        filter: FilterArg,

        /// Number of countries kept by the top filter
        #[arg(long, default_value_t = DEFAULT_TREND_TOP_N)]
        top: usize,

        /// Trend metric
        #[arg(long, value_enum, default_value = "volume")]
        metric: MetricArg,

        /// Matrix countries missing from the summary
        #[arg(long, value_enum, default_value = "warn")]
        unmatched: UnmatchedArg,

        /// Number of countries in exporter/importer rankings
        #[arg(long, default_value_t = DEFAULT_RANKING_TOP_N)]
        rankings: usize,

        /// Number of highlighted bilateral relationships
        #[arg(long, default_value_t = DEFAULT_RELATIONSHIP_TOP_N)]
        relationships: usize,

        /// Number of countries in the chord matrix
        #[arg(long, default_value_t = DEFAULT_CHORD_TOP_N)]
        chord: usize,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        print: bool,
    },

    /// Roll raw flows up into summary, yearly, matrix and network tables
    Rollup {
        /// Raw flow CSV
        #[arg(short, long)]
        flows: PathBuf,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            summary,
            matrix,
            trend,
            network,
            reference,
            filter,
            top,
            metric,
            unmatched,
            rankings,
            relationships,
            chord,
            output,
            print,
        } => {
            let filter = match filter {
                FilterArg::Top => TrendFilter::Top(top),
                FilterArg::All => TrendFilter::All,
                FilterArg::Regions => TrendFilter::Regions,
            };

            let args = AnalyzeArgs {
                summary,
                matrix,
                trend,
                network,
                reference,
                output,
                filter,
                metric: metric.into(),
                unmatched: unmatched.into(),
                ranking_size: rankings,
                relationship_size: relationships,
                chord_size: chord,
                print_summary: print,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(&args)?;
        }

        Commands::Rollup { flows, out_dir } => {
            execute_rollup(&RollupArgs { flows, out_dir })?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
