//! Plain-text report summary for the terminal.

use crate::parser::schema::Report;

const NAME_WIDTH: usize = 24;

/// Render the top `max_lines` countries and any report problems
pub fn render_text_summary(report: &Report, max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  TOP TRADING COUNTRIES".to_string());
    lines.push(format!("  ┏{}┳{}┳{}┳{}┓", bar(NAME_WIDTH + 2), bar(16), bar(12), bar(10)));
    lines.push(format!(
        "  ┃ {:<w$} ┃ {:^14} ┃ {:^10} ┃ {:^8} ┃",
        "Country",
        "Trade (USD bn)",
        "Open %GDP",
        "Exp HHI",
        w = NAME_WIDTH
    ));
    lines.push(format!("  ┣{}╋{}╋{}╋{}┫", bar(NAME_WIDTH + 2), bar(16), bar(12), bar(10)));

    for country in report.countries.iter().take(max_lines) {
        let hhi = country
            .export_concentration
            .map(|h| format!("{:.3}", h))
            .unwrap_or_else(|| "-".to_string());

        lines.push(format!(
            "  ┃ {:<w$} ┃ {:>14.1} ┃ {:>10.1} ┃ {:>8} ┃",
            truncate(&country.country, NAME_WIDTH),
            country.total_trade() / 1e9,
            country.trade_openness,
            hhi,
            w = NAME_WIDTH
        ));
    }

    lines.push(format!("  ┗{}┻{}┻{}┻{}┛", bar(NAME_WIDTH + 2), bar(16), bar(12), bar(10)));

    if let Some(rankings) = &report.rankings {
        let extremes = &rankings.balance_extremes;
        if let Some(surplus) = &extremes.highest_surplus {
            lines.push(format!(
                "  Highest surplus: {} ({:.1}% of GDP)",
                surplus.country, surplus.value
            ));
        }
        if let Some(deficit) = &extremes.largest_deficit {
            lines.push(format!(
                "  Largest deficit: {} ({:.1}% of GDP)",
                deficit.country,
                deficit.value.abs()
            ));
        }
    }

    if let Some(network) = &report.network {
        lines.push(format!(
            "  Network: {} nodes, {} links",
            network.nodes.len(),
            network.links.len()
        ));
    }

    if let Some(trend) = &report.trend {
        lines.push(format!(
            "  Trend: {} records ({}, {} by {})",
            trend.records.len(),
            trend.source,
            trend.filter,
            trend.metric
        ));
    }

    let diagnostics = &report.diagnostics;
    if !diagnostics.is_clean() {
        lines.push(String::new());
        lines.push("  DATA GAPS".to_string());
        push_list(&mut lines, "GDP fallback", &diagnostics.gdp_fallbacks);
        push_list(&mut lines, "Matrix without summary", &diagnostics.unmatched_matrix_countries);
        push_list(&mut lines, "Unresolved reporters", &diagnostics.unresolved_reporters);
    }

    for failure in &report.view_errors {
        lines.push(format!("  ✗ {} view failed: {}", failure.view, failure.message));
    }

    lines.join("\n")
}

fn bar(width: usize) -> String {
    "━".repeat(width)
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let kept: String = name.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn push_list(lines: &mut Vec<String>, label: &str, names: &[String]) {
    if !names.is_empty() {
        lines.push(format!("  {}: {}", label, names.join(", ")));
    }
}
