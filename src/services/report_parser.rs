//! Report parsing: content extraction from the interaction page and
//! normalisation of the AI summary into display-ready strings.
//!
//! The interaction page marks its report with a pair of HTML comments. When the
//! markers are missing, the content container is used instead. Both paths drop
//! scripts and styles and collapse whitespace in the visible text.

use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::models::{ExtractedReport, InteractionSummary, SeverityTier};

/// Placeholder for any missing summary field
pub const NOT_AVAILABLE: &str = "N/A";

const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

const BLOCK_ELEMENTS: [&str; 20] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "p", "tr",
];

/// Why no report region could be extracted
///
/// The display text doubles as the placeholder shown in place of the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Error: Could not locate the interaction report in the response.")]
    RegionNotFound,

    #[error("Error: Invalid report container selector '{0}'.")]
    InvalidSelector(String),
}

/// Where to look for the report region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Comment text opening the region
    pub start_marker: String,

    /// Comment text closing the region
    pub end_marker: String,

    /// CSS selector of the container used when the markers are absent
    pub container_selector: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            start_marker: "Content start".to_string(),
            end_marker: "Content end".to_string(),
            container_selector: "#content".to_string(),
        }
    }
}

/// Extract the report region from a full interaction page
///
/// Tries the comment markers first, then the container selector. A region with
/// no visible text counts as missing.
///
/// # Errors
/// Returns [`ExtractError`] when neither strategy yields a region.
pub fn extract_report(html: &str, options: &ExtractOptions) -> Result<ExtractedReport, ExtractError> {
    let document = Html::parse_document(html);

    if let Some(report) = extract_between_markers(&document, options) {
        debug!(chars = report.text.len(), "extracted report between comment markers");
        return Ok(report);
    }

    let selector = Selector::parse(&options.container_selector).map_err(|err| {
        warn!(selector = %options.container_selector, error = ?err, "invalid container selector");
        ExtractError::InvalidSelector(options.container_selector.clone())
    })?;

    let report = document
        .select(&selector)
        .map(|element| {
            let mut text = String::new();
            push_visible_text(element, &mut text);
            ExtractedReport {
                html: element.html(),
                text: collapse_whitespace(&text),
            }
        })
        .find(|report| !report.text.is_empty());

    match report {
        Some(report) => {
            debug!(chars = report.text.len(), "extracted report from container");
            Ok(report)
        }
        None => {
            warn!("report region not found in interaction page");
            Err(ExtractError::RegionNotFound)
        }
    }
}

fn extract_between_markers(document: &Html, options: &ExtractOptions) -> Option<ExtractedReport> {
    let start = document
        .tree
        .root()
        .descendants()
        .find(|node| is_marker(node.value(), &options.start_marker))?;

    let mut html = String::new();
    let mut text = String::new();
    let mut cursor = start.next_sibling();

    while let Some(node) = cursor {
        if is_marker(node.value(), &options.end_marker) {
            break;
        }

        if let Some(element) = ElementRef::wrap(node) {
            if !is_skipped(element.value().name()) {
                html.push_str(&element.html());
                push_visible_text(element, &mut text);
            }
        } else if let Some(fragment) = node.value().as_text() {
            html.push_str(&escape_text(fragment));
            push_inline(&mut text, fragment);
        }

        cursor = node.next_sibling();
    }

    let text = collapse_whitespace(&text);
    if text.is_empty() {
        return None;
    }
    Some(ExtractedReport { html, text })
}

fn is_marker(node: &Node, marker: &str) -> bool {
    node.as_comment()
        .is_some_and(|comment| comment.trim() == marker)
}

fn is_skipped(name: &str) -> bool {
    SKIPPED_ELEMENTS.contains(&name)
}

/// Append the visible text under `element`, one line per block element
fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    if is_skipped(element.value().name()) {
        return;
    }

    for node in element.descendants() {
        match node.value() {
            Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()) => out.push('\n'),
            Node::Text(fragment) => {
                let hidden = node
                    .ancestors()
                    .filter_map(|ancestor| ancestor.value().as_element())
                    .any(|el| is_skipped(el.name()));
                if !hidden {
                    push_inline(out, fragment);
                }
            }
            _ => {}
        }
    }
    out.push('\n');
}

/// Visible text of an HTML fragment, such as a gateway error message
///
/// Plain text passes through unchanged apart from whitespace collapsing.
pub fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::new();
    push_visible_text(fragment.root_element(), &mut text);
    collapse_whitespace(&text)
}

/// Source line breaks inside text are plain whitespace
fn push_inline(out: &mut String, text: &str) {
    out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
}

/// Trim every line, squeeze inner whitespace, and drop blank lines
fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Summary with every field resolved to display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedSummary {
    /// "Yes", "No" or "N/A"
    pub overall_interaction: String,
    /// Severity as reported
    pub severity_level: String,
    /// Tier derived from `severity_level`
    pub severity: SeverityTier,
    /// Clinical summary text
    pub clinical_summary: String,
    /// Recommendation text
    pub pharmacist_recommendation: String,
    /// Comma-joined drug names
    pub affected_drugs: String,
    /// Comma-joined interaction categories
    pub interaction_types: String,
}

/// Resolve a possibly-missing summary into display text
///
/// Returns `None` when there is no summary at all, so callers can show the
/// generic failure notice instead.
pub fn normalize_summary(summary: Option<&InteractionSummary>) -> Option<NormalizedSummary> {
    let summary = summary?;

    let severity = summary
        .highest_severity_level
        .as_deref()
        .map_or(SeverityTier::Unknown, SeverityTier::from_level);

    Some(NormalizedSummary {
        overall_interaction: text_or_na(summary.overall_interaction.as_deref()),
        severity_level: text_or_na(summary.highest_severity_level.as_deref()),
        severity,
        clinical_summary: text_or_na(summary.clinical_summary.as_deref()),
        pharmacist_recommendation: text_or_na(summary.pharmacist_recommendation.as_deref()),
        affected_drugs: join_or_na(summary.affected_drugs.as_deref()),
        interaction_types: join_or_na(summary.interaction_types.as_deref()),
    })
}

fn text_or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn join_or_na(items: Option<&[String]>) -> String {
    let items: Vec<&str> = items
        .unwrap_or_default()
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(", ")
    }
}
