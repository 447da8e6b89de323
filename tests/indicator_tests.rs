use trade_indicators::indicators::{
    balance_extremes, calculate_economic_indicators, herfindahl_index, top_exporters,
    top_n_matrix, UnmatchedPolicy,
};
use trade_indicators::parser::{CountrySummary, TradeMatrix};
use trade_indicators::reference::ReferenceData;

fn summaries() -> Vec<CountrySummary> {
    vec![
        CountrySummary::new("Japan", 7.5e11, 7.7e11),
        CountrySummary::new("Germany", 1.6e12, 1.5e12),
        CountrySummary::new("China", 3.3e12, 2.6e12),
        CountrySummary::new("Atlantis", 2.0e10, 1.0e10),
    ]
}

fn matrix() -> TradeMatrix {
    TradeMatrix::new(
        vec!["Germany".into(), "China".into(), "Japan".into(), "Atlantis".into()],
        vec![
            vec![0.0, 50.0, 30.0, 20.0],
            vec![100.0, 0.0, 0.0, 0.0],
            vec![10.0, 10.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ],
    )
}

#[test]
fn test_germany_indicators() {
    let mut summaries = summaries();
    calculate_economic_indicators(
        &mut summaries,
        &matrix(),
        &ReferenceData::default(),
        UnmatchedPolicy::Warn,
    )
    .unwrap();

    let germany = summaries.iter().find(|s| s.country == "Germany").unwrap();
    assert!((germany.trade_openness - 3.1e12 / 4.2e12 * 100.0).abs() < 1e-9);
    assert!((germany.trade_balance - 1e11).abs() < 1.0);
    assert!((germany.trade_balance_ratio - 2.38).abs() < 0.01);
    assert!((germany.export_ratio - 51.6).abs() < 0.1);
    assert!((germany.export_concentration.unwrap() - 0.38).abs() < 1e-12);
}

#[test]
fn test_balance_is_exports_minus_imports() {
    let mut summaries = summaries();
    calculate_economic_indicators(
        &mut summaries,
        &matrix(),
        &ReferenceData::default(),
        UnmatchedPolicy::Ignore,
    )
    .unwrap();

    for s in &summaries {
        assert_eq!(s.trade_balance, s.exports - s.imports);
    }
}

#[test]
fn test_output_sorted_by_total_trade() {
    let mut summaries = summaries();
    calculate_economic_indicators(
        &mut summaries,
        &matrix(),
        &ReferenceData::default(),
        UnmatchedPolicy::Warn,
    )
    .unwrap();

    assert_eq!(summaries[0].country, "China");
    for pair in summaries.windows(2) {
        assert!(pair[0].total_trade() >= pair[1].total_trade());
    }
}

#[test]
fn test_concentration_bounds() {
    let mut summaries = summaries();
    calculate_economic_indicators(
        &mut summaries,
        &matrix(),
        &ReferenceData::default(),
        UnmatchedPolicy::Warn,
    )
    .unwrap();

    for s in &summaries {
        for hhi in [s.export_concentration, s.import_concentration].into_iter().flatten() {
            assert!(hhi > 0.0 && hhi <= 1.0, "{} out of bounds: {}", s.country, hhi);
        }
    }

    // A row with no trade leaves the field unset
    let atlantis = summaries.iter().find(|s| s.country == "Atlantis").unwrap();
    assert_eq!(atlantis.export_concentration, None);
    assert_eq!(herfindahl_index(&[42.0]), Some(1.0));
}

#[test]
fn test_gdp_fallback_reported() {
    let mut summaries = summaries();
    let outcome = calculate_economic_indicators(
        &mut summaries,
        &matrix(),
        &ReferenceData::default(),
        UnmatchedPolicy::Warn,
    )
    .unwrap();

    assert_eq!(outcome.gdp_fallbacks, vec!["Atlantis".to_string()]);
    assert!(outcome.unmatched_countries.is_empty());
}

#[test]
fn test_rankings_and_chord_matrix() {
    let mut summaries = summaries();
    calculate_economic_indicators(
        &mut summaries,
        &matrix(),
        &ReferenceData::default(),
        UnmatchedPolicy::Warn,
    )
    .unwrap();

    let exporters = top_exporters(&summaries, 2);
    assert_eq!(exporters[0].country, "China");
    assert_eq!(exporters[1].country, "Germany");

    let extremes = balance_extremes(&summaries);
    assert_eq!(extremes.highest_surplus.unwrap().country, "China");
    assert_eq!(extremes.largest_deficit.unwrap().country, "Japan");

    let top = top_n_matrix(&matrix(), 2);
    assert_eq!(top.countries, vec!["Germany".to_string(), "China".to_string()]);
    assert_eq!(top.matrix, vec![vec![0.0, 50.0], vec![100.0, 0.0]]);
}
