use trade_indicators::aggregator::{
    aggregate_by_region, aggregate_flow_records, aggregate_yearly_summaries, apply_filter,
    rollup_flows, TrendFilter, TrendMetric,
};
use trade_indicators::aggregator::aggregate_trend;
use trade_indicators::parser::{
    read_trend_source, CountrySummary, FlowDirection, FlowRecord, YearlySummaryRow,
};
use trade_indicators::reference::{NameResolver, ReferenceData};

fn yearly_row(country: &str, year: i32, total: f64) -> YearlySummaryRow {
    YearlySummaryRow {
        year,
        country: country.to_string(),
        imports: Some(total / 2.0),
        exports: Some(total / 2.0),
        balance: None,
        total_trade: Some(total),
    }
}

#[test]
fn test_materiality_floor_and_exclusions() {
    let rows = vec![
        yearly_row("Germany", 2020, 3.0e12),
        yearly_row("Small", 2020, 9.0e8),
        yearly_row("Floor", 2020, 1.0e9),
        yearly_row("Areas, nes", 2020, 4.0e12),
    ];

    let agg = aggregate_yearly_summaries(&rows, &ReferenceData::default());

    assert_eq!(agg.records.len(), 1);
    assert!(agg.records.iter().all(|r| r.total_trade_volume > 1e9));
}

#[test]
fn test_china_flow_aggregation() {
    let flows = vec![
        FlowRecord::new(2020, "China", "USA", FlowDirection::Export, 100.0),
        FlowRecord::new(2020, "China", "Japan", FlowDirection::Import, 40.0),
    ];
    let summaries = vec![CountrySummary::new("China", 1.0, 1.0)];

    let agg = aggregate_flow_records(&flows, &summaries, &ReferenceData::default());
    let china = &agg.records[0];

    assert_eq!(china.total_trade_volume, 140.0);
    assert_eq!(china.trade_balance, 60.0);
    assert_eq!(china.region, "Asia-Pacific");
}

#[test]
fn test_fuzzy_resolution_is_idempotent() {
    let keys = vec!["Rep. of Korea".to_string(), "Germany".to_string()];
    let first = NameResolver::build(keys.clone(), ["Korea"]);
    let canonical = first.canonical("Korea").unwrap().to_string();

    let second = NameResolver::build(keys, [canonical.as_str()]);
    assert_eq!(second.canonical(&canonical), Some(canonical.as_str()));
}

#[test]
fn test_top_filter_keeps_history_of_leaders() {
    let rows = vec![
        yearly_row("China", 2019, 4.0e12),
        yearly_row("China", 2020, 5.0e12),
        yearly_row("Germany", 2019, 3.0e12),
        yearly_row("Germany", 2020, 3.1e12),
        yearly_row("Japan", 2019, 1.6e12),
        yearly_row("Japan", 2020, 1.5e12),
    ];
    let agg = aggregate_yearly_summaries(&rows, &ReferenceData::default());

    let top = apply_filter(&agg.records, TrendFilter::Top(2), TrendMetric::TotalTradeVolume);

    assert_eq!(top.len(), 4);
    assert!(top.iter().all(|r| r.country != "Japan"));
}

#[test]
fn test_region_filter_sums_members() {
    let rows = vec![
        yearly_row("Germany", 2020, 3.0e12),
        yearly_row("France", 2020, 1.0e12),
        yearly_row("Nigeria", 2020, 2.0e11),
    ];
    let agg = aggregate_yearly_summaries(&rows, &ReferenceData::default());

    let regions = aggregate_by_region(&agg.records);
    let europe = regions.iter().find(|r| r.country == "Europe").unwrap();

    assert_eq!(europe.total_trade_volume, 4.0e12);
    assert!(regions.iter().any(|r| r.country == "Other"));

    let filtered = apply_filter(&agg.records, TrendFilter::Regions, TrendMetric::TradeBalance);
    assert_eq!(filtered, regions);
}

#[test]
fn test_rollup_feeds_flow_aggregation() {
    let flows = vec![
        FlowRecord::new(2020, "China", "USA", FlowDirection::Export, 100.0),
        FlowRecord::new(2020, "USA", "China", FlowDirection::Export, 45.0),
        FlowRecord::new(2020, "USA", "China", FlowDirection::Import, 100.0),
        FlowRecord::new(2020, "China", "World", FlowDirection::Export, 1000.0),
    ];

    let rollup = rollup_flows(&flows);

    assert_eq!(rollup.matrix.countries, vec!["China".to_string(), "USA".to_string()]);
    assert_eq!(rollup.matrix.value(0, 1), 100.0);
    assert_eq!(rollup.matrix.value(1, 0), 45.0);

    let usa = rollup.summaries.iter().find(|s| s.country == "USA").unwrap();
    assert_eq!(usa.exports, 45.0);
    assert_eq!(usa.imports, 100.0);
}

#[test]
fn test_nan_yearly_row_never_leads_top_filter() {
    let csv = "year,country,total_trade,imports,exports,balance\n\
               2020,Germany,3.1e12,,,\n\
               2020,China,5e12,,,\n\
               2020,Bogus,NaN,1,,\n";
    let source = read_trend_source(csv.as_bytes()).unwrap();

    let agg = aggregate_trend(&source, &[], &ReferenceData::default());
    assert!(agg.records.iter().all(|r| r.total_trade_volume > 1e9));

    let top = apply_filter(&agg.records, TrendFilter::Top(1), TrendMetric::TotalTradeVolume);
    let names: Vec<&str> = top.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(names, vec!["China"]);
}
