//! Loaders for the fixed-schema CSV/JSON input tables.
//!
//! Each table has a `read_*` function over any reader (used by tests and
//! in-memory callers) and a `load_*` function over a file path.

use super::records::{
    FlowDirection, FlowRecord, SummaryRow, TradeMatrix, TradeNetwork, TrendSource,
    YearlySummaryRow,
};
use super::schema::CountrySummary;
use crate::utils::config::YEARLY_SUMMARY_MARKER;
use crate::utils::error::LoadError;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw flow row as it appears in the CSV (flow tag not yet validated)
#[derive(Debug, Deserialize)]
struct RawFlowRow {
    year: i32,
    reporter: String,
    #[serde(default)]
    reporter_code: Option<u32>,
    partner: String,
    #[serde(default)]
    partner_code: Option<u32>,
    flow: String,
    value: f64,
    #[serde(default)]
    sector: Option<String>,
}

/// Read the country summary table
///
/// # Errors
/// * `LoadError::Csv` - malformed CSV or missing required column
/// * `LoadError::InvalidRecord` - negative or non-finite trade values
pub fn read_country_summaries<R: Read>(reader: R) -> Result<Vec<CountrySummary>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut summaries = Vec::new();

    for (index, result) in rdr.deserialize::<SummaryRow>().enumerate() {
        let row = result?;

        for (column, value) in [("exports", row.exports), ("imports", row.imports)] {
            if !value.is_finite() || value < 0.0 {
                return Err(LoadError::InvalidRecord(format!(
                    "summary row {} ('{}'): {} must be a non-negative number, found {}",
                    index + 1,
                    row.country,
                    column,
                    value
                )));
            }
        }

        summaries.push(CountrySummary::from(row));
    }

    debug!("Read {} country summaries", summaries.len());
    Ok(summaries)
}

/// Load the country summary table from a CSV file
pub fn load_country_summaries(path: impl AsRef<Path>) -> Result<Vec<CountrySummary>, LoadError> {
    let path = path.as_ref();
    info!("Loading country summary: {}", path.display());
    read_country_summaries(File::open(path)?)
}

/// Read and validate the bilateral trade matrix
///
/// # Errors
/// * `LoadError::Json` - invalid JSON structure
/// * `LoadError::InvalidMatrix` - shape or value invariant violated
pub fn read_trade_matrix<R: Read>(reader: R) -> Result<TradeMatrix, LoadError> {
    let matrix: TradeMatrix = serde_json::from_reader(reader)?;

    matrix.check_invariants().map_err(LoadError::InvalidMatrix)?;

    debug!("Read trade matrix with {} countries", matrix.len());
    Ok(matrix)
}

/// Load the bilateral trade matrix from a JSON file
pub fn load_trade_matrix(path: impl AsRef<Path>) -> Result<TradeMatrix, LoadError> {
    let path = path.as_ref();
    info!("Loading trade matrix: {}", path.display());
    read_trade_matrix(File::open(path)?)
}

/// Read a trade network (nodes and links)
///
/// # Errors
/// * `LoadError::Json` - invalid JSON structure
/// * `LoadError::InvalidRecord` - link value negative or non-finite
pub fn read_trade_network<R: Read>(reader: R) -> Result<TradeNetwork, LoadError> {
    let network: TradeNetwork = serde_json::from_reader(reader)?;

    if let Some(link) = network
        .links
        .iter()
        .find(|l| !l.value.is_finite() || l.value < 0.0)
    {
        return Err(LoadError::InvalidRecord(format!(
            "link {} -> {}: value must be a non-negative number, found {}",
            link.source, link.target, link.value
        )));
    }

    debug!(
        "Read trade network with {} nodes and {} links",
        network.nodes.len(),
        network.links.len()
    );
    Ok(network)
}

/// Load a trade network from a JSON file
pub fn load_trade_network(path: impl AsRef<Path>) -> Result<TradeNetwork, LoadError> {
    let path = path.as_ref();
    info!("Loading trade network: {}", path.display());
    read_trade_network(File::open(path)?)
}

/// Read a trend table, detecting its kind from the header row
///
/// A non-empty table with a `total_trade` column is a yearly summary;
/// anything else is treated as raw flow records.
pub fn read_trend_source<R: Read>(reader: R) -> Result<TrendSource, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let has_marker = rdr
        .headers()?
        .iter()
        .any(|h| h.trim() == YEARLY_SUMMARY_MARKER);

    if has_marker {
        let raw_rows = rdr
            .deserialize::<YearlySummaryRow>()
            .collect::<Result<Vec<_>, _>>()?;

        if !raw_rows.is_empty() {
            let raw_count = raw_rows.len();
            let rows: Vec<YearlySummaryRow> = raw_rows
                .into_iter()
                .enumerate()
                .filter_map(|(index, row)| match check_yearly_row(&row) {
                    Ok(()) => Some(row),
                    Err(reason) => {
                        warn!("Skipping yearly row {} ('{}'): {}", index + 1, row.country, reason);
                        None
                    }
                })
                .collect();

            debug!(
                "Trend table is a yearly summary ({} of {} rows usable)",
                rows.len(),
                raw_count
            );
            return Ok(TrendSource::Yearly(rows));
        }

        debug!("Yearly summary table is empty");
        return Ok(TrendSource::Flows(Vec::new()));
    }

    let flows = parse_flow_rows(rdr.deserialize::<RawFlowRow>())?;
    debug!("Trend table is raw flows ({} rows)", flows.len());
    Ok(TrendSource::Flows(flows))
}

/// Load a trend table from a CSV file
pub fn load_trend_source(path: impl AsRef<Path>) -> Result<TrendSource, LoadError> {
    let path = path.as_ref();
    info!("Loading trend data: {}", path.display());
    read_trend_source(File::open(path)?)
}

/// Read raw flow records
pub fn read_flow_records<R: Read>(reader: R) -> Result<Vec<FlowRecord>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    parse_flow_rows(rdr.deserialize::<RawFlowRow>())
}

/// Load raw flow records from a CSV file
pub fn load_flow_records(path: impl AsRef<Path>) -> Result<Vec<FlowRecord>, LoadError> {
    let path = path.as_ref();
    info!("Loading flow records: {}", path.display());
    read_flow_records(File::open(path)?)
}

/// Reject yearly rows with non-finite cells or negative trade totals
///
/// **Private** - `balance` may be negative, the other columns may not
fn check_yearly_row(row: &YearlySummaryRow) -> Result<(), String> {
    let columns = [
        ("imports", row.imports),
        ("exports", row.exports),
        ("total_trade", row.total_trade),
        ("balance", row.balance),
    ];

    for (column, value) in columns {
        let Some(value) = value else {
            continue;
        };
        if !value.is_finite() {
            return Err(format!("{} is not a finite number", column));
        }
        if value < 0.0 && column != "balance" {
            return Err(format!("{} is negative ({})", column, value));
        }
    }

    Ok(())
}

/// Convert raw rows, skipping rows whose flow tag is unknown
///
/// **Private** - shared by the flow and trend readers
fn parse_flow_rows<I>(rows: I) -> Result<Vec<FlowRecord>, LoadError>
where
    I: Iterator<Item = Result<RawFlowRow, csv::Error>>,
{
    let mut flows = Vec::new();
    let mut raw_count = 0usize;

    for (index, result) in rows.enumerate() {
        let row = result?;
        raw_count += 1;

        let flow = match row.flow.parse::<FlowDirection>() {
            Ok(flow) => flow,
            Err(e) => {
                // Log but don't fail - re-exports and other tags are not part of totals
                warn!("Skipping flow row {}: {}", index + 1, e);
                continue;
            }
        };

        if !row.value.is_finite() {
            warn!("Skipping flow row {}: non-finite value", index + 1);
            continue;
        }

        flows.push(FlowRecord {
            year: row.year,
            reporter: row.reporter,
            reporter_code: row.reporter_code,
            partner: row.partner,
            partner_code: row.partner_code,
            flow,
            value: row.value,
            sector: row.sector,
        });
    }

    if flows.is_empty() && raw_count > 0 {
        return Err(LoadError::InvalidRecord(
            "All flow rows failed to parse".to_string(),
        ));
    }

    Ok(flows)
}
