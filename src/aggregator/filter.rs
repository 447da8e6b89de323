//! Caller-selectable filtering of yearly records for trend display.

use super::region::aggregate_by_region;
use crate::parser::YearlyRecord;
use log::debug;
use std::fmt;

/// Metric a trend view is ranked and plotted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendMetric {
    #[default]
    TotalTradeVolume,
    TradeBalance,
    TradeOpenness,
}

impl TrendMetric {
    pub fn value(&self, record: &YearlyRecord) -> f64 {
        match self {
            TrendMetric::TotalTradeVolume => record.total_trade_volume,
            TrendMetric::TradeBalance => record.trade_balance,
            TrendMetric::TradeOpenness => record.trade_openness,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendMetric::TotalTradeVolume => "Total Trade Volume (USD)",
            TrendMetric::TradeBalance => "Trade Balance (USD)",
            TrendMetric::TradeOpenness => "Trade Openness (% of GDP)",
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendMetric::TotalTradeVolume => "total_trade_volume",
            TrendMetric::TradeBalance => "trade_balance",
            TrendMetric::TradeOpenness => "trade_openness",
        };
        f.write_str(name)
    }
}

/// Which records a trend view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendFilter {
    /// Countries ranked in the top N by the metric in the latest year
    Top(usize),

    All,

    /// One aggregated series per region
    Regions,
}

impl Default for TrendFilter {
    fn default() -> Self {
        TrendFilter::Top(crate::utils::config::DEFAULT_TREND_TOP_N)
    }
}

impl fmt::Display for TrendFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendFilter::Top(n) => write!(f, "top{}", n),
            TrendFilter::All => f.write_str("all"),
            TrendFilter::Regions => f.write_str("regions"),
        }
    }
}

/// Apply a filter mode to aggregated records
///
/// **Public** - invoked per render with the caller's current selection
pub fn apply_filter(
    records: &[YearlyRecord],
    filter: TrendFilter,
    metric: TrendMetric,
) -> Vec<YearlyRecord> {
    let filtered = match filter {
        TrendFilter::All => records.to_vec(),
        TrendFilter::Regions => aggregate_by_region(records),
        TrendFilter::Top(n) => {
            let top = top_countries_in_latest_year(records, metric, n);
            records
                .iter()
                .filter(|r| top.contains(&r.country))
                .cloned()
                .collect()
        }
    };

    debug!(
        "Filter {} by {}: {} of {} records",
        filter,
        metric,
        filtered.len(),
        records.len()
    );

    filtered
}

/// Countries among the `n` highest records of the latest year
///
/// Ranks records (not countries), so a country listed twice in the latest
/// year can take two slots. Records with a NaN metric are never ranked.
pub fn top_countries_in_latest_year(
    records: &[YearlyRecord],
    metric: TrendMetric,
    n: usize,
) -> Vec<String> {
    let Some(latest) = records.iter().map(|r| r.year).max() else {
        return Vec::new();
    };

    let mut latest_records: Vec<&YearlyRecord> = records
        .iter()
        .filter(|r| r.year == latest && !metric.value(r).is_nan())
        .collect();
    latest_records.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));

    let mut countries: Vec<String> = Vec::with_capacity(n);
    for record in latest_records.into_iter().take(n) {
        if !countries.contains(&record.country) {
            countries.push(record.country.clone());
        }
    }
    countries
}
