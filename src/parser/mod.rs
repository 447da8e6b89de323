//! Input loading and schema definitions.
//!
//! This module handles:
//! - Typed records for the summary, matrix, yearly and flow tables
//! - Loading and validating CSV/JSON inputs
//! - Defining the output report schema

pub mod loader;
pub mod records;
pub mod schema;

// Re-export main types
pub use loader::{
    load_country_summaries, load_flow_records, load_trade_matrix, load_trade_network,
    load_trend_source, read_country_summaries, read_flow_records, read_trade_matrix,
    read_trade_network, read_trend_source,
};
pub use records::{
    FlowDirection, FlowRecord, NetworkLink, NetworkNode, SummaryRow, TradeMatrix, TradeNetwork,
    TrendSource, YearlySummaryRow,
};
pub use schema::{
    BalanceExtremes, BilateralRelationship, CountrySummary, Diagnostics, NetworkView, RankedCountry,
    Rankings, RelationshipView, Report, TrendView, ViewFailure, YearlyRecord,
};
