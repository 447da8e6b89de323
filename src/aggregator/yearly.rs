//! Reshape yearly summaries or raw flows into per-country yearly records.
//!
//! Two input shapes are accepted:
//! - Pre-aggregated yearly rows: mapped one-to-one, then non-country
//!   aggregates and rows under the materiality floor are dropped
//! - Raw flow rows: grouped by (reporter, year), imports and exports summed
//!   by flow tag, and each reporter resolved to a canonical summary name
//!
//! Both paths tag every record with a region.

use crate::parser::{CountrySummary, FlowDirection, FlowRecord, TrendSource, YearlyRecord, YearlySummaryRow};
use crate::reference::{NameResolver, ReferenceData};
use log::{debug, info};
use std::collections::BTreeMap;

/// Aggregated records plus names that could not be resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub records: Vec<YearlyRecord>,

    /// Names that used the fallback GDP estimate
    pub gdp_fallbacks: Vec<String>,

    /// Flow reporters dropped for lack of a canonical summary name
    pub unresolved_reporters: Vec<String>,
}

/// Import/export totals for one reporter in one year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowTotals {
    pub imports: f64,
    pub exports: f64,
}

impl FlowTotals {
    pub fn add(&mut self, flow: FlowDirection, value: f64) {
        match flow {
            FlowDirection::Import => self.imports += value,
            FlowDirection::Export => self.exports += value,
        }
    }

    pub fn volume(&self) -> f64 {
        self.imports + self.exports
    }

    pub fn balance(&self) -> f64 {
        self.exports - self.imports
    }
}

/// Aggregate whichever trend source was loaded
///
/// **Public** - main entry point for trend aggregation
///
/// # Arguments
/// * `source` - Yearly summary rows or raw flows
/// * `summaries` - Canonical country list (used by the flow path)
/// * `reference` - GDP table, regions, exclusion markers, materiality floor
pub fn aggregate_trend(
    source: &TrendSource,
    summaries: &[CountrySummary],
    reference: &ReferenceData,
) -> Aggregation {
    match source {
        TrendSource::Yearly(rows) => aggregate_yearly_summaries(rows, reference),
        TrendSource::Flows(flows) => aggregate_flow_records(flows, summaries, reference),
    }
}

/// Map yearly summary rows to records
///
/// Drops non-country aggregates and rows whose total trade does not exceed
/// the materiality floor.
pub fn aggregate_yearly_summaries(
    rows: &[YearlySummaryRow],
    reference: &ReferenceData,
) -> Aggregation {
    info!("Aggregating {} yearly summary rows", rows.len());

    let gdp_resolver = NameResolver::build(
        reference.gdp_keys(),
        rows.iter().map(|r| r.country.as_str()),
    );

    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        let imports = row.imports.unwrap_or(0.0);
        let exports = row.exports.unwrap_or(0.0);

        let total = nonzero(row.total_trade).unwrap_or(imports + exports);
        let balance = nonzero(row.balance).unwrap_or(exports - imports);

        // NaN totals must fail the floor
        if reference.is_excluded_label(&row.country) || !(total > reference.materiality_floor) {
            dropped += 1;
            continue;
        }

        let gdp = reference.gdp_resolved(&gdp_resolver, &row.country);

        records.push(YearlyRecord {
            country: row.country.clone(),
            year: row.year,
            total_trade_volume: total,
            trade_balance: balance,
            trade_openness: total / gdp * 100.0,
            region: reference.region_for(&row.country).to_string(),
        });
    }

    debug!(
        "Kept {} yearly records, dropped {} (aggregates or below floor)",
        records.len(),
        dropped
    );

    let gdp_fallbacks = fallback_names(&gdp_resolver, records.iter().map(|r| r.country.as_str()));

    Aggregation {
        records,
        gdp_fallbacks,
        unresolved_reporters: Vec::new(),
    }
}

/// Group raw flows into records keyed by canonical country name
///
/// Reporters with no canonical summary match, and non-country aggregates,
/// are dropped.
pub fn aggregate_flow_records(
    flows: &[FlowRecord],
    summaries: &[CountrySummary],
    reference: &ReferenceData,
) -> Aggregation {
    info!("Aggregating {} raw flow records", flows.len());

    let totals = group_flows(flows);

    let summary_resolver = NameResolver::build(
        summaries.iter().map(|s| s.country.clone()).collect(),
        totals.keys().map(|(reporter, _)| reporter.as_str()),
    );

    let gdp_resolver = NameResolver::build(
        reference.gdp_keys(),
        summaries.iter().map(|s| s.country.as_str()),
    );

    let mut records = Vec::with_capacity(totals.len());

    for ((reporter, year), flow_totals) in &totals {
        if reference.is_excluded_label(reporter) {
            continue;
        }

        let Some(country) = summary_resolver.canonical(reporter) else {
            continue;
        };

        let volume = flow_totals.volume();
        let gdp = reference.gdp_resolved(&gdp_resolver, country);

        records.push(YearlyRecord {
            country: country.to_string(),
            year: *year,
            total_trade_volume: volume,
            trade_balance: flow_totals.balance(),
            trade_openness: volume / gdp * 100.0,
            region: reference.region_for(country).to_string(),
        });
    }

    let unresolved_reporters: Vec<String> = summary_resolver
        .unresolved()
        .into_iter()
        .filter(|name| !reference.is_excluded_label(name))
        .collect();

    debug!(
        "Built {} yearly records from {} reporter-years ({} reporters unresolved)",
        records.len(),
        totals.len(),
        unresolved_reporters.len()
    );

    let gdp_fallbacks = fallback_names(&gdp_resolver, records.iter().map(|r| r.country.as_str()));

    Aggregation {
        records,
        gdp_fallbacks,
        unresolved_reporters,
    }
}

/// Sum flows per (reporter, year)
///
/// Ordered by reporter, then year.
pub fn group_flows(flows: &[FlowRecord]) -> BTreeMap<(String, i32), FlowTotals> {
    let mut totals: BTreeMap<(String, i32), FlowTotals> = BTreeMap::new();

    for flow in flows {
        totals
            .entry((flow.reporter.clone(), flow.year))
            .or_default()
            .add(flow.flow, flow.value);
    }

    totals
}

/// **Private** - treat missing, zero and NaN cells as absent
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// **Private** - distinct names among `names` the resolver could not place
fn fallback_names<'a, I>(resolver: &NameResolver, names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut missing: Vec<String> = names
        .into_iter()
        .filter(|name| !resolver.resolve(name).is_resolved())
        .map(|name| name.to_string())
        .collect();
    missing.sort();
    missing.dedup();
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yearly(country: &str, year: i32, total: Option<f64>, imports: f64, exports: f64) -> YearlySummaryRow {
        YearlySummaryRow {
            year,
            country: country.to_string(),
            imports: Some(imports),
            exports: Some(exports),
            balance: None,
            total_trade: total,
        }
    }

    #[test]
    fn test_china_flow_scenario() {
        let flows = vec![
            FlowRecord::new(2020, "China", "USA", FlowDirection::Export, 100.0),
            FlowRecord::new(2020, "China", "USA", FlowDirection::Import, 40.0),
        ];
        let summaries = vec![CountrySummary::new("China", 0.0, 0.0)];

        let agg = aggregate_flow_records(&flows, &summaries, &ReferenceData::default());

        assert_eq!(agg.records.len(), 1);
        let china = &agg.records[0];
        assert_eq!(china.total_trade_volume, 140.0);
        assert_eq!(china.trade_balance, 60.0);
        assert_eq!(china.region, "Asia-Pacific");
        assert!((china.trade_openness - 140.0 / 17.7e12 * 100.0).abs() < 1e-20);
    }

    #[test]
    fn test_flow_reporters_use_canonical_names() {
        let flows = vec![
            FlowRecord::new(2019, "Korea", "China", FlowDirection::Export, 10.0),
            FlowRecord::new(2019, "Atlantis", "China", FlowDirection::Export, 10.0),
            FlowRecord::new(2019, "Other Asia, nes", "China", FlowDirection::Export, 10.0),
        ];
        let summaries = vec![
            CountrySummary::new("Rep. of Korea", 0.0, 0.0),
            CountrySummary::new("Other Asia, nes", 0.0, 0.0),
        ];

        let agg = aggregate_flow_records(&flows, &summaries, &ReferenceData::default());

        assert_eq!(agg.records.len(), 1);
        assert_eq!(agg.records[0].country, "Rep. of Korea");
        assert_eq!(agg.unresolved_reporters, vec!["Atlantis".to_string()]);
    }

    #[test]
    fn test_yearly_summary_filters() {
        let rows = vec![
            yearly("Germany", 2020, Some(3.1e12), 1.5e12, 1.6e12),
            yearly("Areas, nes", 2020, Some(5e12), 0.0, 0.0),
            yearly("Tiny", 2020, Some(1e9), 0.0, 0.0),
            yearly("Philippines", 2020, Some(2e11), 1e11, 1e11),
        ];

        let agg = aggregate_yearly_summaries(&rows, &ReferenceData::default());
        let names: Vec<&str> = agg.records.iter().map(|r| r.country.as_str()).collect();

        assert_eq!(names, vec!["Germany", "Philippines"]);
        assert!(agg.records.iter().all(|r| r.total_trade_volume > 1e9));
        assert_eq!(agg.gdp_fallbacks, vec!["Philippines".to_string()]);
    }

    #[test]
    fn test_yearly_summary_drops_nan_total() {
        let rows = vec![
            yearly("Germany", 2020, Some(3.1e12), 1.5e12, 1.6e12),
            yearly("Bogus", 2020, Some(f64::NAN), 1.0, 0.0),
            yearly("Blank", 2020, None, f64::NAN, 0.0),
        ];

        let agg = aggregate_yearly_summaries(&rows, &ReferenceData::default());

        assert_eq!(agg.records.len(), 1);
        assert_eq!(agg.records[0].country, "Germany");
    }

    #[test]
    fn test_yearly_summary_fallback_columns() {
        let rows = vec![YearlySummaryRow {
            year: 2021,
            country: "Korea".to_string(),
            imports: Some(4e11),
            exports: Some(6e11),
            balance: Some(0.0),
            total_trade: None,
        }];

        let agg = aggregate_yearly_summaries(&rows, &ReferenceData::default());
        let korea = &agg.records[0];

        assert_eq!(korea.total_trade_volume, 1e12);
        assert_eq!(korea.trade_balance, 2e11);
        // "Korea" resolves to "Rep. of Korea" (1.8T) by containment
        assert!((korea.trade_openness - 1e12 / 1.8e12 * 100.0).abs() < 1e-9);
        assert_eq!(korea.region, "Asia-Pacific");
    }

    #[test]
    fn test_group_flows_orders_by_reporter_then_year() {
        let flows = vec![
            FlowRecord::new(2021, "B", "A", FlowDirection::Export, 1.0),
            FlowRecord::new(2020, "B", "A", FlowDirection::Import, 2.0),
            FlowRecord::new(2020, "A", "B", FlowDirection::Export, 3.0),
        ];

        let grouped = group_flows(&flows);
        let keys: Vec<(String, i32)> = grouped.keys().cloned().collect();

        assert_eq!(
            keys,
            vec![("A".to_string(), 2020), ("B".to_string(), 2020), ("B".to_string(), 2021)]
        );
        assert_eq!(grouped[&("B".to_string(), 2020)].imports, 2.0);
    }
}
