//! Reference data shared by every pipeline stage.
//!
//! - GDP estimates and region membership (`tables`)
//! - Canonical country-name resolution (`resolver`)

pub mod resolver;
pub mod tables;

pub use resolver::{match_name, names_overlap, NameResolver, Resolution};
pub use tables::{GdpEstimate, ReferenceData, Region};
