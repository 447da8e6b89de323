//! Rankings over annotated summaries (bar-chart datasets).

use crate::parser::{BalanceExtremes, CountrySummary, RankedCountry};

/// The `n` largest exporters, descending
pub fn top_exporters(summaries: &[CountrySummary], n: usize) -> Vec<RankedCountry> {
    top_by(summaries, n, |s| s.exports)
}

/// The `n` largest importers, descending
pub fn top_importers(summaries: &[CountrySummary], n: usize) -> Vec<RankedCountry> {
    top_by(summaries, n, |s| s.imports)
}

/// Highest surplus and largest deficit relative to GDP
///
/// A side is only reported when its sign is right: no surplus entry if
/// every country runs a deficit, and vice versa.
pub fn balance_extremes(summaries: &[CountrySummary]) -> BalanceExtremes {
    let ranked = |s: &CountrySummary| RankedCountry {
        country: s.country.clone(),
        value: s.trade_balance_ratio,
    };

    let highest_surplus = summaries
        .iter()
        .filter(|s| s.trade_balance_ratio > 0.0)
        .max_by(|a, b| a.trade_balance_ratio.total_cmp(&b.trade_balance_ratio))
        .map(ranked);

    let largest_deficit = summaries
        .iter()
        .filter(|s| s.trade_balance_ratio < 0.0)
        .min_by(|a, b| a.trade_balance_ratio.total_cmp(&b.trade_balance_ratio))
        .map(ranked);

    BalanceExtremes {
        highest_surplus,
        largest_deficit,
    }
}

/// **Private** - stable descending sort on `key`, then truncate
fn top_by<F>(summaries: &[CountrySummary], n: usize, key: F) -> Vec<RankedCountry>
where
    F: Fn(&CountrySummary) -> f64,
{
    let mut ranked: Vec<RankedCountry> = summaries
        .iter()
        .map(|s| RankedCountry {
            country: s.country.clone(),
            value: key(s),
        })
        .collect();

    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(country: &str, exports: f64, imports: f64, ratio: f64) -> CountrySummary {
        let mut s = CountrySummary::new(country, exports, imports);
        s.trade_balance_ratio = ratio;
        s
    }

    #[test]
    fn test_top_exporters_and_importers() {
        let summaries = vec![
            summary("A", 10.0, 50.0, 0.0),
            summary("B", 30.0, 20.0, 0.0),
            summary("C", 20.0, 40.0, 0.0),
        ];

        let exporters = top_exporters(&summaries, 2);
        assert_eq!(exporters[0].country, "B");
        assert_eq!(exporters[1].country, "C");

        let importers = top_importers(&summaries, 10);
        assert_eq!(importers.len(), 3);
        assert_eq!(importers[0].country, "A");
        assert_eq!(importers[0].value, 50.0);
    }

    #[test]
    fn test_balance_extremes() {
        let summaries = vec![
            summary("Surplus", 0.0, 0.0, 4.5),
            summary("Small", 0.0, 0.0, 1.0),
            summary("Deficit", 0.0, 0.0, -3.2),
        ];

        let extremes = balance_extremes(&summaries);
        assert_eq!(extremes.highest_surplus.unwrap().country, "Surplus");
        assert_eq!(extremes.largest_deficit.unwrap().value, -3.2);
    }

    #[test]
    fn test_balance_extremes_all_deficit() {
        let summaries = vec![summary("A", 0.0, 0.0, -1.0), summary("B", 0.0, 0.0, -2.0)];

        let extremes = balance_extremes(&summaries);
        assert!(extremes.highest_surplus.is_none());
        assert_eq!(extremes.largest_deficit.unwrap().country, "B");
    }
}
