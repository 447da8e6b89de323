//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod rollup;
pub mod utils;

// Re-export main command functions
pub use analyze::{build_report, execute_analyze, load_inputs, validate_args, AnalysisInputs};
pub use models::{AnalyzeArgs, RollupArgs};
pub use rollup::execute_rollup;
pub use utils::{display_schema, display_version, schema_description, validate_report_file};
