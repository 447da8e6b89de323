//! Trade Indicators
//!
//! Economic indicators and chart-ready datasets derived from
//! country-level trade tables.
//!
//! The pipeline loads a country summary, a bilateral trade matrix and an
//! optional yearly or raw-flow table, then:
//! - annotates each country with openness, balance and concentration
//! - builds rankings, bilateral relationships and a trend series
//! - writes everything into a single JSON report
//!
//! This crate provides the core implementation for the
//! `trade-indicators` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trade-indicators rollup --flows raw_flows.csv --out-dir processed
//! trade-indicators analyze \
//!     --summary processed/trade_summary.csv \
//!     --matrix processed/trade_matrix.json \
//!     --trend processed/yearly_trade_summary.csv
//! ```

pub mod aggregator;
pub mod commands;
pub mod indicators;
pub mod output;
pub mod parser;
pub mod reference;
pub mod utils;
