use crate::output::read_report;
use crate::parser::Report;
use crate::reference::ReferenceData;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: impl AsRef<Path>) -> Result<Report> {
    let file_path = file_path.as_ref();
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Not a valid report: {}", file_path.display()))?;

    if report.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Report schema v{} does not match supported v{}",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Countries: {}", report.countries.len());
    println!(
        "  Views: rankings={} network={} relationships={} trend={}",
        report.rankings.is_some(),
        report.network.is_some(),
        report.relationships.is_some(),
        report.trend.is_some()
    );
    if !report.view_errors.is_empty() {
        println!("  View failures: {}", report.view_errors.len());
    }

    Ok(report)
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    print!("{}", schema_description(show_details));
}

/// Text printed by `display_schema`
pub fn schema_description(show_details: bool) -> String {
    let mut lines = vec![
        "Trade Indicators Report Schema".to_string(),
        format!("Current Version: {}", SCHEMA_VERSION),
        String::new(),
    ];

    if show_details {
        lines.extend(
            [
                "Schema Structure:",
                "  version: string            - Schema version (e.g., '1.0.0')",
                "  generated_at: string       - ISO 8601 timestamp",
                "  countries: array           - Annotated summaries, by total trade desc",
                "    trade_openness: number   - (exports + imports) / GDP * 100",
                "    export_ratio: number?    - exports / (exports + imports) * 100 (null when undefined)",
                "    trade_balance: number    - exports - imports",
                "    export_concentration: number? - HHI over matrix row",
                "  rankings: object?          - Top exporters/importers, balance extremes",
                "  network: object?           - Region-tagged nodes and exporter->importer links",
                "  relationships: object?     - Bilateral pairs and top-N chord matrix",
                "  trend: object?             - Filtered yearly records",
                "    source: string           - 'yearly-summary' or 'raw-flows'",
                "  diagnostics: object        - GDP fallbacks and unresolved names",
                "  view_errors: array         - Views that could not be built",
            ]
            .iter()
            .map(|line| line.to_string()),
        );
    } else {
        lines.push("Use --show for detailed schema information".to_string());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Display version information
pub fn display_version() {
    let reference = ReferenceData::default();

    println!("Trade Indicators v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!(
        "Built-in reference: {} GDP estimates, {} regions",
        reference.gdp.len(),
        reference.regions.len()
    );
    println!();
    println!("Economic indicators and chart datasets from country trade tables.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::write_report;
    use crate::parser::Diagnostics;

    fn report(version: &str) -> Report {
        Report {
            version: version.to_string(),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            countries: Vec::new(),
            rankings: None,
            network: None,
            relationships: None,
            trend: None,
            diagnostics: Diagnostics::default(),
            view_errors: Vec::new(),
        }
    }

    #[test]
    fn test_validate_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&report(SCHEMA_VERSION), &path).unwrap();

        assert!(validate_report_file(&path).is_ok());
    }

    #[test]
    fn test_validate_rejects_other_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&report("0.1.0"), &path).unwrap();

        assert!(validate_report_file(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, "{\"not\": \"a report\"}").unwrap();

        assert!(validate_report_file(&path).is_err());
    }

    #[test]
    fn test_schema_describes_export_ratio() {
        let text = schema_description(true);
        assert!(text.contains("export_ratio: number?    - exports / (exports + imports) * 100"));
        assert!(text.contains("network: object?"));
        assert!(!schema_description(false).contains("export_ratio"));
    }
}
