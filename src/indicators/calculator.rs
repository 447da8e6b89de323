//! Annotate country summaries with derived economic indicators.
//!
//! Runs once per load. Each summary gains trade openness, export ratio,
//! trade balance and its GDP ratio, and (from the bilateral matrix) export
//! and import concentration. The list is then re-sorted by total trade,
//! which downstream "top N" views rely on.

use super::concentration::herfindahl_index;
use crate::parser::{CountrySummary, TradeMatrix};
use crate::reference::ReferenceData;
use crate::utils::error::IndicatorError;
use log::{debug, info, warn};
use std::collections::HashMap;

/// What to do with a matrix country that has no summary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Skip silently
    Ignore,

    /// Skip, log a warning and record a diagnostic
    #[default]
    Warn,

    /// Fail the calculation before any summary is modified
    Error,
}

/// Data-quality gaps seen during calculation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationOutcome {
    /// Summaries that used the fallback GDP estimate
    pub gdp_fallbacks: Vec<String>,

    /// Matrix countries with no summary entry
    pub unmatched_countries: Vec<String>,
}

/// Calculate economic indicators in place
///
/// **Public** - main entry point for indicator calculation
///
/// # Arguments
/// * `summaries` - Country summaries, mutated and re-sorted
/// * `matrix` - Bilateral trade matrix (validated)
/// * `reference` - GDP table
/// * `policy` - Handling of matrix countries missing from `summaries`
///
/// # Errors
/// * `IndicatorError::InvalidMatrix` - ragged or non-finite matrix
/// * `IndicatorError::UnmatchedCountry` - only under `UnmatchedPolicy::Error`
pub fn calculate_economic_indicators(
    summaries: &mut [CountrySummary],
    matrix: &TradeMatrix,
    reference: &ReferenceData,
    policy: UnmatchedPolicy,
) -> Result<CalculationOutcome, IndicatorError> {
    info!(
        "Calculating indicators for {} countries ({} in matrix)",
        summaries.len(),
        matrix.len()
    );

    matrix
        .check_invariants()
        .map_err(IndicatorError::InvalidMatrix)?;

    // First entry wins for duplicate names
    let mut index_by_name: HashMap<String, usize> = HashMap::with_capacity(summaries.len());
    for (i, summary) in summaries.iter().enumerate() {
        index_by_name.entry(summary.country.clone()).or_insert(i);
    }

    let unmatched: Vec<String> = matrix
        .countries
        .iter()
        .filter(|c| !index_by_name.contains_key(c.as_str()))
        .cloned()
        .collect();

    if let Some(first) = unmatched.first() {
        match policy {
            UnmatchedPolicy::Error => {
                return Err(IndicatorError::UnmatchedCountry(first.clone()));
            }
            UnmatchedPolicy::Warn => {
                warn!(
                    "{} matrix countries have no summary entry: {}",
                    unmatched.len(),
                    unmatched.join(", ")
                );
            }
            UnmatchedPolicy::Ignore => {}
        }
    }

    let mut outcome = CalculationOutcome {
        gdp_fallbacks: Vec::new(),
        unmatched_countries: if policy == UnmatchedPolicy::Ignore {
            Vec::new()
        } else {
            unmatched
        },
    };

    for summary in summaries.iter_mut() {
        let gdp = match reference.gdp_exact(&summary.country) {
            Some(gdp) => gdp,
            None => {
                outcome.gdp_fallbacks.push(summary.country.clone());
                reference.gdp_or_fallback(&summary.country)
            }
        };
        annotate_ratios(summary, gdp);
    }

    if !outcome.gdp_fallbacks.is_empty() {
        debug!(
            "Fallback GDP used for {} countries",
            outcome.gdp_fallbacks.len()
        );
    }

    for (i, country) in matrix.countries.iter().enumerate() {
        let Some(&idx) = index_by_name.get(country.as_str()) else {
            continue;
        };
        let summary = &mut summaries[idx];

        if let Some(hhi) = herfindahl_index(&matrix.matrix[i]) {
            summary.export_concentration = Some(hhi);
        }
        if let Some(hhi) = herfindahl_index(&matrix.column(i)) {
            summary.import_concentration = Some(hhi);
        }
    }

    sort_by_total_trade(summaries);

    Ok(outcome)
}

/// Set the GDP-relative and trade-mix ratios
///
/// **Private** - `gdp` is in USD
fn annotate_ratios(summary: &mut CountrySummary, gdp: f64) {
    let total = summary.total_trade();

    summary.trade_openness = total / gdp * 100.0;
    // 0/0 yields NaN for countries with no trade
    summary.export_ratio = summary.exports / total * 100.0;
    summary.trade_balance = summary.exports - summary.imports;
    summary.trade_balance_ratio = summary.trade_balance / gdp * 100.0;
}

/// Sort descending by exports + imports (stable for ties)
pub fn sort_by_total_trade(summaries: &mut [CountrySummary]) {
    summaries.sort_by(|a, b| b.total_trade().total_cmp(&a.total_trade()));
}
