//! Typed input records for the fixed-schema trade tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the country-level summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub country: String,
    pub exports: f64,
    pub imports: f64,

    #[serde(default)]
    pub balance: Option<f64>,
}

/// One row of the yearly summary table
///
/// Every numeric column is optional; the aggregator falls back from
/// `total_trade` to `imports + exports` and from `balance` to
/// `exports - imports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummaryRow {
    pub year: i32,
    pub country: String,

    #[serde(default)]
    pub imports: Option<f64>,

    #[serde(default)]
    pub exports: Option<f64>,

    #[serde(default)]
    pub balance: Option<f64>,

    #[serde(default)]
    pub total_trade: Option<f64>,
}

/// Direction of a raw bilateral flow, from the reporter's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Import,
    Export,
}

impl FromStr for FlowDirection {
    type Err = String;

    /// Accepts the dashboard tags (`import`/`export`) and the Comtrade
    /// flow codes (`M`/`X`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "import" | "imports" | "m" => Ok(FlowDirection::Import),
            "export" | "exports" | "x" => Ok(FlowDirection::Export),
            other => Err(format!("unknown flow tag '{}'", other)),
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowDirection::Import => write!(f, "import"),
            FlowDirection::Export => write!(f, "export"),
        }
    }
}

/// One raw bilateral flow record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub year: i32,
    pub reporter: String,

    #[serde(default)]
    pub reporter_code: Option<u32>,

    pub partner: String,

    #[serde(default)]
    pub partner_code: Option<u32>,

    pub flow: FlowDirection,
    pub value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl FlowRecord {
    /// Convenience constructor used by rollups and tests
    pub fn new(
        year: i32,
        reporter: impl Into<String>,
        partner: impl Into<String>,
        flow: FlowDirection,
        value: f64,
    ) -> Self {
        Self {
            year,
            reporter: reporter.into(),
            reporter_code: None,
            partner: partner.into(),
            partner_code: None,
            flow,
            value,
            sector: None,
        }
    }
}

/// Square bilateral trade matrix
///
/// `matrix[i][j]` is the value flowing from `countries[i]` to `countries[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeMatrix {
    pub countries: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

impl TradeMatrix {
    pub fn new(countries: Vec<String>, matrix: Vec<Vec<f64>>) -> Self {
        Self { countries, matrix }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Check the shape and value invariants
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let n = self.countries.len();

        if self.matrix.len() != n {
            return Err(format!(
                "{} countries but {} matrix rows",
                n,
                self.matrix.len()
            ));
        }

        for (i, row) in self.matrix.iter().enumerate() {
            if row.len() != n {
                return Err(format!(
                    "row {} ('{}') has {} columns, expected {}",
                    i,
                    self.countries[i],
                    row.len(),
                    n
                ));
            }

            if let Some(j) = row.iter().position(|v| !v.is_finite() || *v < 0.0) {
                return Err(format!(
                    "value at [{}][{}] must be a non-negative number, found {}",
                    i, j, row[j]
                ));
            }
        }

        Ok(())
    }

    /// Total outgoing trade of country `i`
    pub fn row_total(&self, i: usize) -> f64 {
        self.matrix[i].iter().sum()
    }

    /// Incoming trade values of country `i`, one per partner
    pub fn column(&self, i: usize) -> Vec<f64> {
        self.matrix.iter().map(|row| row[i]).collect()
    }

    pub fn value(&self, from: usize, to: usize) -> f64 {
        self.matrix[from][to]
    }
}

/// Country node of the trade network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Reporter code when known, otherwise the country name
    pub id: String,
    pub name: String,

    /// ISO3 code, when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Set when the node is placed in a network view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Directed exporter-to-importer edge between two node ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

/// Node/link form of the export matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeNetwork {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

/// Source rows for the trend aggregator
#[derive(Debug, Clone, PartialEq)]
pub enum TrendSource {
    /// Pre-aggregated rows (table carries a `total_trade` column)
    Yearly(Vec<YearlySummaryRow>),

    /// Raw bilateral flow rows
    Flows(Vec<FlowRecord>),
}

impl TrendSource {
    pub fn len(&self) -> usize {
        match self {
            TrendSource::Yearly(rows) => rows.len(),
            TrendSource::Flows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TrendSource::Yearly(_) => "yearly-summary",
            TrendSource::Flows(_) => "raw-flows",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> TradeMatrix {
        let countries = (0..rows.len()).map(|i| format!("C{}", i)).collect();
        TradeMatrix::new(countries, rows)
    }

    #[test]
    fn test_flow_direction_parsing() {
        assert_eq!("import".parse::<FlowDirection>().unwrap(), FlowDirection::Import);
        assert_eq!("Export".parse::<FlowDirection>().unwrap(), FlowDirection::Export);
        assert_eq!("M".parse::<FlowDirection>().unwrap(), FlowDirection::Import);
        assert_eq!("X".parse::<FlowDirection>().unwrap(), FlowDirection::Export);
        assert!("re-export".parse::<FlowDirection>().is_err());
    }

    #[test]
    fn test_matrix_invariants_ok() {
        let m = matrix(vec![vec![0.0, 1.0], vec![2.0, 0.0]]);
        assert!(m.check_invariants().is_ok());
        assert_eq!(m.row_total(1), 2.0);
        assert_eq!(m.column(0), vec![0.0, 2.0]);
    }

    #[test]
    fn test_matrix_ragged_row() {
        let m = matrix(vec![vec![0.0, 1.0], vec![2.0]]);
        assert!(m.check_invariants().is_err());
    }

    #[test]
    fn test_matrix_row_count_mismatch() {
        let m = TradeMatrix::new(vec!["A".into()], vec![vec![0.0], vec![0.0]]);
        assert!(m.check_invariants().is_err());
    }

    #[test]
    fn test_matrix_negative_value() {
        let m = matrix(vec![vec![0.0, -1.0], vec![2.0, 0.0]]);
        let err = m.check_invariants().unwrap_err();
        assert!(err.contains("[0][1]"));
    }
}
