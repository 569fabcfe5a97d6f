//! Table output formatting for CLI commands
//!
//! Provides formatted table output for suggestions and interaction reports
//! using comfy-table. Severity is color-coded when the terminal allows it.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{SeverityTier, Suggestion};
use crate::services::renderer::ReportView;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<usize>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<usize>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format autocomplete suggestions as a table
    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Drug").add_attribute(Attribute::Bold),
            Cell::new("DDC ID").add_attribute(Attribute::Bold),
            Cell::new("Brand ID").add_attribute(Attribute::Bold),
        ]);

        for suggestion in suggestions {
            table.add_row(vec![
                Cell::new(&suggestion.suggestion),
                Cell::new(&suggestion.ddc_id),
                Cell::new(&suggestion.brand_name_id),
            ]);
        }

        table.to_string()
    }

    /// Format a summary report view as a two-column table
    ///
    /// Views without a summary are returned as their plain text.
    pub fn format_report(&self, view: &ReportView) -> String {
        match view {
            ReportView::Error { text, .. } => text.clone(),
            ReportView::Unavailable { notice, text } => format!("{notice}\n\n{text}"),
            ReportView::Summary { severity, rows } => {
                let mut table = self.create_base_table();
                table.set_header(vec![
                    Cell::new("Field").add_attribute(Attribute::Bold),
                    Cell::new("Value").add_attribute(Attribute::Bold),
                ]);

                for row in rows {
                    let value = if row.badge_class.is_some() && self.use_colors {
                        Cell::new(&row.value)
                            .fg(severity_color(*severity))
                            .add_attribute(Attribute::Bold)
                    } else {
                        Cell::new(&row.value)
                    };
                    table.add_row(vec![Cell::new(row.label), value]);
                }

                table.to_string()
            }
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(u16::try_from(width).unwrap_or(u16::MAX));
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

const fn severity_color(tier: SeverityTier) -> Color {
    match tier {
        SeverityTier::Major => Color::Red,
        SeverityTier::Moderate => Color::Yellow,
        SeverityTier::Minor => Color::Blue,
        SeverityTier::None => Color::Green,
        SeverityTier::Unknown => Color::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::renderer::{SummaryRow, GENERIC_SUMMARY_FAILURE};

    #[test]
    fn test_format_suggestions() {
        let formatter = TableFormatter::with_config(false, Some(80));
        let output = formatter.format_suggestions(&[Suggestion::new("Aspirin", "1", "2")]);
        assert!(output.contains("Drug"));
        assert!(output.contains("Aspirin"));
    }

    #[test]
    fn test_format_unavailable_report() {
        let formatter = TableFormatter::with_config(false, None);
        let output = formatter.format_report(&ReportView::Unavailable {
            notice: GENERIC_SUMMARY_FAILURE,
            text: "raw text".to_string(),
        });
        assert!(output.starts_with(GENERIC_SUMMARY_FAILURE));
        assert!(output.ends_with("raw text"));
    }

    #[test]
    fn test_format_summary_report() {
        let formatter = TableFormatter::with_config(false, Some(100));
        let output = formatter.format_report(&ReportView::Summary {
            severity: SeverityTier::Major,
            rows: vec![SummaryRow {
                label: "Highest Severity Level",
                value: "Major".to_string(),
                badge_class: Some("bg-red-600 text-white"),
            }],
        });
        assert!(output.contains("Highest Severity Level"));
        assert!(output.contains("Major"));
    }

    #[test]
    fn test_format_error_report_prints_text_only() {
        let formatter = TableFormatter::with_config(false, None);
        let output = formatter.format_report(&ReportView::Error {
            message: "<p class=\"text-red-400\">Error: relay down</p>".to_string(),
            text: "Error: relay down".to_string(),
        });
        assert_eq!(output, "Error: relay down");
    }
}
