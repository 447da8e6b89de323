//! Aggregation of trade records into time-indexed series.
//!
//! This module transforms loaded trade tables into:
//! - Per-country yearly records (from yearly summaries or raw flows)
//! - Filtered trend views (top N, all, per region)
//! - Summary, yearly, matrix and network tables rolled up from raw flows

pub mod filter;
pub mod region;
pub mod rollup;
pub mod yearly;

// Re-export main types and functions
pub use filter::{apply_filter, top_countries_in_latest_year, TrendFilter, TrendMetric};
pub use region::aggregate_by_region;
pub use rollup::{build_export_matrix, reporter_codes, rollup_flows, Rollup};
pub use yearly::{
    aggregate_flow_records, aggregate_trend, aggregate_yearly_summaries, group_flows, Aggregation,
    FlowTotals,
};
