//! Region-level aggregation of yearly records.

use crate::parser::YearlyRecord;
use log::debug;
use std::collections::BTreeMap;

/// Collapse records into one record per (region, year)
///
/// Volume and balance are summed; openness is the mean over the grouped
/// countries. The region name is used as the display country.
/// Output is ordered by region, then year.
pub fn aggregate_by_region(records: &[YearlyRecord]) -> Vec<YearlyRecord> {
    let mut groups: BTreeMap<(&str, i32), Vec<&YearlyRecord>> = BTreeMap::new();

    for record in records {
        groups
            .entry((record.region.as_str(), record.year))
            .or_default()
            .push(record);
    }

    let regional: Vec<YearlyRecord> = groups
        .into_iter()
        .map(|((region, year), entries)| {
            let count = entries.len() as f64;
            YearlyRecord {
                country: region.to_string(),
                year,
                total_trade_volume: entries.iter().map(|r| r.total_trade_volume).sum(),
                trade_balance: entries.iter().map(|r| r.trade_balance).sum(),
                trade_openness: entries.iter().map(|r| r.trade_openness).sum::<f64>() / count,
                region: region.to_string(),
            }
        })
        .collect();

    debug!(
        "Aggregated {} records into {} region-years",
        records.len(),
        regional.len()
    );

    regional
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, region: &str, year: i32, volume: f64, balance: f64, openness: f64) -> YearlyRecord {
        YearlyRecord {
            country: country.to_string(),
            year,
            total_trade_volume: volume,
            trade_balance: balance,
            trade_openness: openness,
            region: region.to_string(),
        }
    }

    #[test]
    fn test_sum_volume_mean_openness() {
        let records = vec![
            record("Germany", "Europe", 2020, 100.0, 10.0, 80.0),
            record("France", "Europe", 2020, 50.0, -5.0, 40.0),
            record("Germany", "Europe", 2021, 120.0, 12.0, 90.0),
            record("China", "Asia-Pacific", 2020, 300.0, 60.0, 30.0),
        ];

        let regional = aggregate_by_region(&records);

        assert_eq!(regional.len(), 3);
        assert_eq!(regional[0].country, "Asia-Pacific");

        let europe_2020 = regional
            .iter()
            .find(|r| r.region == "Europe" && r.year == 2020)
            .unwrap();
        assert_eq!(europe_2020.country, "Europe");
        assert_eq!(europe_2020.total_trade_volume, 150.0);
        assert_eq!(europe_2020.trade_balance, 5.0);
        assert_eq!(europe_2020.trade_openness, 60.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_region(&[]).is_empty());
    }
}
