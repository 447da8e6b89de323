//! Build the summary, yearly and matrix tables from raw flow records.
//!
//! Produces the pre-computed inputs `analyze` consumes: summary, yearly,
//! matrix and network tables, plus the cleaned flows. The matrix and the
//! network are built from export flows only so each bilateral value is
//! counted once.

use super::yearly::{group_flows, FlowTotals};
use crate::indicators::network_from_matrix;
use crate::parser::{
    FlowDirection, FlowRecord, SummaryRow, TradeMatrix, TradeNetwork, YearlySummaryRow,
};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};

/// Partner label for whole-world aggregate rows
const WORLD_PARTNER: &str = "World";

/// Tables derived from raw flows
#[derive(Debug, Clone, PartialEq)]
pub struct Rollup {
    /// One row per reporter over all years, ordered by name
    pub summaries: Vec<SummaryRow>,

    /// One row per reporter per year, ordered by year then name
    pub yearly: Vec<YearlySummaryRow>,

    /// Export matrix between reporters, countries ordered by name
    pub matrix: TradeMatrix,

    /// Matrix as nodes and positive links
    pub network: TradeNetwork,

    /// Flows that fed the tables (zero and whole-world rows removed)
    pub flows: Vec<FlowRecord>,
}

/// Roll raw flows up into summary, yearly and matrix tables
///
/// **Public** - main entry point for the rollup command
///
/// Zero-valued flows and flows against the whole world (partner code 0 or
/// partner "World") are ignored.
pub fn rollup_flows(flows: &[FlowRecord]) -> Rollup {
    let usable: Vec<FlowRecord> = flows.iter().filter(|f| is_bilateral(f)).cloned().collect();

    info!(
        "Rolling up {} flow records ({} skipped)",
        usable.len(),
        flows.len() - usable.len()
    );

    let by_reporter_year = group_flows(&usable);

    let mut by_reporter: BTreeMap<&str, FlowTotals> = BTreeMap::new();
    for ((reporter, _), totals) in &by_reporter_year {
        let entry = by_reporter.entry(reporter.as_str()).or_default();
        entry.imports += totals.imports;
        entry.exports += totals.exports;
    }

    let summaries: Vec<SummaryRow> = by_reporter
        .iter()
        .map(|(country, totals)| SummaryRow {
            country: country.to_string(),
            exports: totals.exports,
            imports: totals.imports,
            balance: Some(totals.balance()),
        })
        .collect();

    let mut yearly: Vec<YearlySummaryRow> = by_reporter_year
        .iter()
        .map(|((country, year), totals)| YearlySummaryRow {
            year: *year,
            country: country.clone(),
            imports: Some(totals.imports),
            exports: Some(totals.exports),
            balance: Some(totals.balance()),
            total_trade: Some(totals.volume()),
        })
        .collect();
    yearly.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.country.cmp(&b.country)));

    let countries: Vec<String> = summaries.iter().map(|s| s.country.clone()).collect();
    let matrix = build_export_matrix(&usable, countries);
    let network = network_from_matrix(&matrix, &reporter_codes(&usable));

    debug!(
        "Rollup: {} summaries, {} yearly rows, {}x{} matrix, {} network links",
        summaries.len(),
        yearly.len(),
        matrix.len(),
        matrix.len(),
        network.links.len()
    );

    Rollup {
        summaries,
        yearly,
        matrix,
        network,
        flows: usable,
    }
}

/// First reporter code seen for each reporter name
pub fn reporter_codes(flows: &[FlowRecord]) -> HashMap<String, u32> {
    let mut codes = HashMap::new();
    for flow in flows {
        if let Some(code) = flow.reporter_code {
            codes.entry(flow.reporter.clone()).or_insert(code);
        }
    }
    codes
}

/// Sum export flows between the given countries
///
/// Self-trade stays zero; partners outside `countries` are ignored.
pub fn build_export_matrix(flows: &[FlowRecord], countries: Vec<String>) -> TradeMatrix {
    let index: HashMap<&str, usize> = countries
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let n = countries.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for flow in flows.iter().filter(|f| f.flow == FlowDirection::Export) {
        let (Some(&i), Some(&j)) = (
            index.get(flow.reporter.as_str()),
            index.get(flow.partner.as_str()),
        ) else {
            continue;
        };

        if i != j {
            matrix[i][j] += flow.value;
        }
    }

    TradeMatrix::new(countries, matrix)
}

/// **Private** - skip empty and whole-world rows
fn is_bilateral(flow: &FlowRecord) -> bool {
    flow.value != 0.0 && flow.partner_code != Some(0) && flow.partner != WORLD_PARTNER
}
