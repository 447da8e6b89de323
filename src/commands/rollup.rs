//! Rollup command implementation.
//!
//! Turns a raw flow CSV into the summary, yearly, matrix and network tables
//! that `analyze` consumes.

use super::models::RollupArgs;
use crate::aggregator::rollup_flows;
use crate::output::{write_rollup, RollupPaths};
use crate::parser::load_flow_records;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the rollup command
///
/// **Public** - called from main.rs
pub fn execute_rollup(args: &RollupArgs) -> Result<RollupPaths> {
    let start_time = Instant::now();

    info!("Step 1/3: Loading raw flows from {}...", args.flows.display());
    let flows = load_flow_records(&args.flows)
        .with_context(|| format!("Failed to load flows {}", args.flows.display()))?;
    info!("Loaded {} flow records", flows.len());

    info!("Step 2/3: Rolling up flows...");
    let rollup = rollup_flows(&flows);
    info!(
        "{} countries, {} country-years, {}x{} matrix",
        rollup.summaries.len(),
        rollup.yearly.len(),
        rollup.matrix.len(),
        rollup.matrix.len()
    );

    info!("Step 3/3: Writing tables...");
    let paths = write_rollup(&rollup, &args.out_dir).context("Failed to write rollup tables")?;

    info!("✓ Summary: {}", paths.summary.display());
    info!("✓ Yearly:  {}", paths.yearly.display());
    info!("✓ Matrix:  {}", paths.matrix.display());
    info!("✓ Network: {}", paths.network.display());
    info!("✓ Flows:   {}", paths.flows.display());
    info!("Rollup completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(paths)
}
