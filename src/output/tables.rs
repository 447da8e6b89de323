//! CSV/JSON writers for rolled-up input tables.

use super::json::{prepare_output_path, write_json_pretty};
use crate::aggregator::Rollup;
use crate::parser::{FlowDirection, FlowRecord};
use crate::utils::config::{
    FLOWS_FILE_NAME, MATRIX_FILE_NAME, NETWORK_FILE_NAME, SUMMARY_FILE_NAME, YEARLY_FILE_NAME,
};
use crate::utils::error::OutputError;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Files written by `write_rollup`
#[derive(Debug, Clone, PartialEq)]
pub struct RollupPaths {
    pub summary: PathBuf,
    pub yearly: PathBuf,
    pub matrix: PathBuf,
    pub network: PathBuf,
    pub flows: PathBuf,
}

/// Flow row with every column present, so the CSV header stays fixed
#[derive(Serialize)]
struct FlowCsvRow<'a> {
    year: i32,
    reporter_code: Option<u32>,
    reporter: &'a str,
    partner_code: Option<u32>,
    partner: &'a str,
    flow: FlowDirection,
    value: f64,
    sector: Option<&'a str>,
}

impl<'a> From<&'a FlowRecord> for FlowCsvRow<'a> {
    fn from(flow: &'a FlowRecord) -> Self {
        Self {
            year: flow.year,
            reporter_code: flow.reporter_code,
            reporter: &flow.reporter,
            partner_code: flow.partner_code,
            partner: &flow.partner,
            flow: flow.flow,
            value: flow.value,
            sector: flow.sector.as_deref(),
        }
    }
}

/// Write rows as a headed CSV file
pub fn write_csv<T: Serialize>(rows: &[T], output_path: &Path) -> Result<(), OutputError> {
    prepare_output_path(output_path)?;

    let mut writer = csv::Writer::from_path(output_path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the rollup tables into `out_dir`
///
/// File names match what `analyze` expects by default.
pub fn write_rollup(rollup: &Rollup, out_dir: impl AsRef<Path>) -> Result<RollupPaths, OutputError> {
    let out_dir = out_dir.as_ref();

    let paths = RollupPaths {
        summary: out_dir.join(SUMMARY_FILE_NAME),
        yearly: out_dir.join(YEARLY_FILE_NAME),
        matrix: out_dir.join(MATRIX_FILE_NAME),
        network: out_dir.join(NETWORK_FILE_NAME),
        flows: out_dir.join(FLOWS_FILE_NAME),
    };

    write_csv(&rollup.summaries, &paths.summary)?;
    write_csv(&rollup.yearly, &paths.yearly)?;
    write_json_pretty(&rollup.matrix, &paths.matrix)?;
    write_json_pretty(&rollup.network, &paths.network)?;

    let flow_rows: Vec<FlowCsvRow> = rollup.flows.iter().map(FlowCsvRow::from).collect();
    write_csv(&flow_rows, &paths.flows)?;

    info!("Rollup written to: {}", out_dir.display());

    Ok(paths)
}
