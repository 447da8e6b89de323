//! Economic indicator derivation.
//!
//! This module annotates country summaries and derives chart datasets:
//! - Openness, export ratio, balance and balance ratio per country
//! - Export/import concentration (HHI) from the bilateral matrix
//! - Bilateral relationships and top-N matrix restriction
//! - Network nodes and links tagged by region
//! - Exporter/importer rankings and balance extremes

pub mod bilateral;
pub mod calculator;
pub mod concentration;
pub mod network;
pub mod rankings;

// Re-export main types and functions
pub use bilateral::{bilateral_relationships, top_n_matrix, top_relationships};
pub use calculator::{calculate_economic_indicators, sort_by_total_trade, CalculationOutcome, UnmatchedPolicy};
pub use concentration::{herfindahl_index, nonzero_count};
pub use network::{network_from_matrix, network_view};
pub use rankings::{balance_extremes, top_exporters, top_importers};
