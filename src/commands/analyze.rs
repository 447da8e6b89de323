//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads reference data
//! 2. Loads the summary, matrix and (optional) trend and network tables
//! 3. Calculates economic indicators
//! 4. Builds each view dataset independently (rankings, network,
//!    relationships, trend)
//! 5. Writes the JSON report

use super::models::AnalyzeArgs;
use crate::aggregator::{aggregate_trend, apply_filter, Aggregation, TrendFilter};
use crate::indicators::{
    balance_extremes, bilateral_relationships, calculate_economic_indicators, network_from_matrix,
    network_view, top_exporters, top_importers, top_n_matrix, top_relationships,
};
use crate::output::{render_text_summary, write_report};
use crate::parser::{
    load_country_summaries, load_trade_matrix, load_trade_network, load_trend_source,
    CountrySummary, Diagnostics, Rankings, RelationshipView, Report, TradeMatrix, TradeNetwork,
    TrendSource, TrendView, ViewFailure,
};
use crate::reference::ReferenceData;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::{IndicatorError, ViewError};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::time::Instant;

/// Loaded input tables
#[derive(Debug, Clone)]
pub struct AnalysisInputs {
    pub summaries: Vec<CountrySummary>,
    pub matrix: TradeMatrix,
    pub trend: Option<TrendSource>,
    pub network: Option<TradeNetwork>,
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written
///
/// # Errors
/// * Reference data or input table load failures
/// * Unmatched matrix countries under the `error` policy
/// * File write errors
///
/// A view that cannot be built does not fail the command; it is listed in
/// the report's `view_errors`.
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<Report> {
    let start_time = Instant::now();

    info!("Step 1/5: Loading reference data...");
    let reference = match &args.reference {
        Some(path) => ReferenceData::load(path)
            .with_context(|| format!("Failed to load reference data {}", path.display()))?,
        None => ReferenceData::default(),
    };

    info!("Step 2/5: Loading input tables...");
    let inputs = load_inputs(args).context("Failed to load trade data")?;

    info!("Step 3/5: Calculating indicators and building views...");
    let report = build_report(inputs, &reference, args).context("Failed to calculate indicators")?;

    info!("Step 4/5: {} views built, {} failed", view_count(&report), report.view_errors.len());
    for failure in &report.view_errors {
        debug!("  {} view: {}", failure.view, failure.message);
    }

    info!("Step 5/5: Writing report...");
    write_report(&report, &args.output).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TRADE INDICATOR SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Countries: {}", report.countries.len());
        println!("\n{}", render_text_summary(&report, args.ranking_size));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Load every input table named in `args`
///
/// Any failure aborts the whole analysis.
pub fn load_inputs(args: &AnalyzeArgs) -> Result<AnalysisInputs> {
    let summaries = load_country_summaries(&args.summary)
        .with_context(|| format!("Failed to load summary {}", args.summary.display()))?;

    let matrix = load_trade_matrix(&args.matrix)
        .with_context(|| format!("Failed to load matrix {}", args.matrix.display()))?;

    let trend = match &args.trend {
        Some(path) => Some(
            load_trend_source(path)
                .with_context(|| format!("Failed to load trend data {}", path.display()))?,
        ),
        None => None,
    };

    let network = match &args.network {
        Some(path) => Some(
            load_trade_network(path)
                .with_context(|| format!("Failed to load network {}", path.display()))?,
        ),
        None => None,
    };

    Ok(AnalysisInputs {
        summaries,
        matrix,
        trend,
        network,
    })
}

/// Run the pipeline over loaded inputs
///
/// **Public** - file-free core of `execute_analyze`
pub fn build_report(
    inputs: AnalysisInputs,
    reference: &ReferenceData,
    args: &AnalyzeArgs,
) -> Result<Report, IndicatorError> {
    let AnalysisInputs {
        mut summaries,
        matrix,
        trend,
        network,
    } = inputs;

    let outcome = calculate_economic_indicators(&mut summaries, &matrix, reference, args.unmatched)?;

    let mut diagnostics = Diagnostics {
        gdp_fallbacks: outcome.gdp_fallbacks,
        unmatched_matrix_countries: outcome.unmatched_countries,
        unresolved_reporters: Vec::new(),
    };
    let mut view_errors = Vec::new();

    let rankings = record_view(
        "rankings",
        build_rankings(&summaries, args.ranking_size),
        &mut view_errors,
    );

    let network = network.unwrap_or_else(|| network_from_matrix(&matrix, &HashMap::new()));
    let network = record_view(
        "network",
        network_view(&network, reference),
        &mut view_errors,
    );

    let relationships = record_view(
        "relationships",
        build_relationships(&matrix, args.relationship_size, args.chord_size),
        &mut view_errors,
    );

    let trend = trend.and_then(|source| {
        let aggregation = aggregate_trend(&source, &summaries, reference);
        diagnostics.gdp_fallbacks.extend(aggregation.gdp_fallbacks.iter().cloned());
        diagnostics.unresolved_reporters = aggregation.unresolved_reporters.clone();

        record_view(
            "trend",
            build_trend_view(&source, &aggregation, args),
            &mut view_errors,
        )
    });

    diagnostics.gdp_fallbacks.sort();
    diagnostics.gdp_fallbacks.dedup();

    Ok(Report {
        version: SCHEMA_VERSION.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        countries: summaries,
        rankings,
        network,
        relationships,
        trend,
        diagnostics,
        view_errors,
    })
}

/// Exporter/importer rankings and balance extremes
pub fn build_rankings(summaries: &[CountrySummary], n: usize) -> Result<Rankings, ViewError> {
    if summaries.is_empty() {
        return Err(ViewError::Empty);
    }

    Ok(Rankings {
        top_exporters: top_exporters(summaries, n),
        top_importers: top_importers(summaries, n),
        balance_extremes: balance_extremes(summaries),
    })
}

/// Bilateral relationships and the restricted chord matrix
pub fn build_relationships(
    matrix: &TradeMatrix,
    top: usize,
    chord_size: usize,
) -> Result<RelationshipView, ViewError> {
    if matrix.is_empty() {
        return Err(ViewError::Empty);
    }

    let relationships = bilateral_relationships(matrix);
    let top_relationships = top_relationships(&relationships, top);

    Ok(RelationshipView {
        relationships,
        top_relationships,
        top_matrix: top_n_matrix(matrix, chord_size),
    })
}

/// Filtered trend records
pub fn build_trend_view(
    source: &TrendSource,
    aggregation: &Aggregation,
    args: &AnalyzeArgs,
) -> Result<TrendView, ViewError> {
    if source.is_empty() {
        return Err(ViewError::NoTrendData("source table is empty".to_string()));
    }
    if aggregation.records.is_empty() {
        return Err(ViewError::NoTrendData(format!(
            "none of {} {} rows survived filtering",
            source.len(),
            source.kind()
        )));
    }

    Ok(TrendView {
        source: source.kind().to_string(),
        filter: args.filter.to_string(),
        metric: args.metric.to_string(),
        records: apply_filter(&aggregation.records, args.filter, args.metric),
    })
}

/// **Private** - keep a built view or record why it failed
fn record_view<T>(
    view: &str,
    result: Result<T, ViewError>,
    errors: &mut Vec<ViewFailure>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Could not build {} view: {}", view, e);
            errors.push(ViewFailure {
                view: view.to_string(),
                message: e.to_string(),
            });
            None
        }
    }
}

/// **Private** - number of views present in the report
fn view_count(report: &Report) -> usize {
    [
        report.rankings.is_some(),
        report.network.is_some(),
        report.relationships.is_some(),
        report.trend.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count()
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !args.summary.is_file() {
        anyhow::bail!("Summary file not found: {}", args.summary.display());
    }

    if !args.matrix.is_file() {
        anyhow::bail!("Matrix file not found: {}", args.matrix.display());
    }

    if let Some(trend) = &args.trend {
        if !trend.is_file() {
            anyhow::bail!("Trend file not found: {}", trend.display());
        }
    }

    if let Some(network) = &args.network {
        if !network.is_file() {
            anyhow::bail!("Network file not found: {}", network.display());
        }
    }

    if let Some(reference) = &args.reference {
        if !reference.is_file() {
            anyhow::bail!("Reference file not found: {}", reference.display());
        }
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.filter == TrendFilter::Top(0) {
        anyhow::bail!("Trend top-N must be greater than 0");
    }

    for (name, size) in [
        ("ranking size", args.ranking_size),
        ("relationship size", args.relationship_size),
        ("chord size", args.chord_size),
    ] {
        if size == 0 {
            anyhow::bail!("{} must be greater than 0", name);
        }
        if size > 1000 {
            anyhow::bail!("{} is too large (max 1000)", name);
        }
    }

    Ok(())
}
