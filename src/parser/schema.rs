//! Output JSON schema definitions for report data.
//!
//! This module defines the structure of the records handed to the rendering
//! layer and of the report file we write to disk.
//! Schema is versioned to allow future evolution.

use super::records::{NetworkLink, NetworkNode, SummaryRow, TradeMatrix};
use serde::{Deserialize, Deserializer, Serialize};

/// Per-country trade summary, annotated in place by the indicator calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    /// Country display name (unique key)
    pub country: String,

    pub exports: f64,
    pub imports: f64,

    /// Total trade as a percentage of estimated GDP
    #[serde(default)]
    pub trade_openness: f64,

    /// Exports as a percentage of total trade
    ///
    /// NaN when the country has no trade at all; serialized as `null`.
    #[serde(default = "nan", deserialize_with = "null_as_nan")]
    pub export_ratio: f64,

    /// Exports minus imports
    #[serde(default)]
    pub trade_balance: f64,

    /// Trade balance as a percentage of estimated GDP
    #[serde(default)]
    pub trade_balance_ratio: f64,

    /// Normalized HHI over export partners (unset when exports are zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_concentration: Option<f64>,

    /// Normalized HHI over import partners (unset when imports are zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_concentration: Option<f64>,
}

impl CountrySummary {
    /// Create an unannotated summary
    pub fn new(country: impl Into<String>, exports: f64, imports: f64) -> Self {
        Self {
            country: country.into(),
            exports,
            imports,
            trade_openness: 0.0,
            export_ratio: f64::NAN,
            trade_balance: 0.0,
            trade_balance_ratio: 0.0,
            export_concentration: None,
            import_concentration: None,
        }
    }

    /// Exports plus imports
    pub fn total_trade(&self) -> f64 {
        self.exports + self.imports
    }
}

impl From<SummaryRow> for CountrySummary {
    fn from(row: SummaryRow) -> Self {
        CountrySummary::new(row.country, row.exports, row.imports)
    }
}

fn nan() -> f64 {
    f64::NAN
}

fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// One country (or region) in one year, ready for trend display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub country: String,
    pub year: i32,
    pub total_trade_volume: f64,
    pub trade_balance: f64,
    pub trade_openness: f64,
    pub region: String,
}

/// Trade between one ordered pair of countries in the matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilateralRelationship {
    pub source: String,
    pub target: String,

    /// Flow from source to target
    pub exports: f64,

    /// Flow from target to source
    pub imports: f64,

    pub net_balance: f64,
    pub total_trade: f64,

    /// |net_balance| / total_trade, in [0, 1]
    pub imbalance_ratio: f64,
}

/// A country paired with the value it was ranked by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCountry {
    pub country: String,
    pub value: f64,
}

/// Countries with the most extreme trade balance relative to GDP
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceExtremes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_surplus: Option<RankedCountry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub largest_deficit: Option<RankedCountry>,
}

/// Bar-chart datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub top_exporters: Vec<RankedCountry>,
    pub top_importers: Vec<RankedCountry>,
    pub balance_extremes: BalanceExtremes,
}

/// Chord-diagram datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipView {
    pub relationships: Vec<BilateralRelationship>,
    pub top_relationships: Vec<BilateralRelationship>,

    /// Matrix restricted to the largest exporters
    pub top_matrix: TradeMatrix,
}

/// Network-graph dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkView {
    /// Nodes tagged with their region
    pub nodes: Vec<NetworkNode>,

    /// Links whose endpoints are both known nodes
    pub links: Vec<NetworkLink>,

    /// Links removed for referencing an unknown node
    #[serde(default)]
    pub dropped_links: usize,
}

/// Historical trend dataset after filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendView {
    pub source: String,
    pub filter: String,
    pub metric: String,
    pub records: Vec<YearlyRecord>,
}

/// Data-quality gaps found while building the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Names that used the fallback GDP estimate
    #[serde(default)]
    pub gdp_fallbacks: Vec<String>,

    /// Matrix countries with no summary entry
    #[serde(default)]
    pub unmatched_matrix_countries: Vec<String>,

    /// Flow reporters dropped for lack of a canonical summary name
    #[serde(default)]
    pub unresolved_reporters: Vec<String>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.gdp_fallbacks.is_empty()
            && self.unmatched_matrix_countries.is_empty()
            && self.unresolved_reporters.is_empty()
    }
}

/// A view that could not be built; other views are unaffected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFailure {
    pub view: String,
    pub message: String,
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Annotated summaries, sorted by total trade (descending)
    pub countries: Vec<CountrySummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rankings: Option<Rankings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkView>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<RelationshipView>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendView>,

    #[serde(default)]
    pub diagnostics: Diagnostics,

    #[serde(default)]
    pub view_errors: Vec<ViewFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_export_ratio_serializes_as_null() {
        let summary = CountrySummary::new("Nowhere", 0.0, 0.0);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["export_ratio"].is_null());
        assert!(json.get("export_concentration").is_none());

        let back: CountrySummary = serde_json::from_value(json).unwrap();
        assert!(back.export_ratio.is_nan());
    }

    #[test]
    fn test_summary_from_row() {
        let row = SummaryRow {
            country: "France".to_string(),
            exports: 10.0,
            imports: 5.0,
            balance: Some(5.0),
        };
        let summary = CountrySummary::from(row);
        assert_eq!(summary.country, "France");
        assert_eq!(summary.total_trade(), 15.0);
    }
}
