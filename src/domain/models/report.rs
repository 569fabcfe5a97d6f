//! Domain models for interaction reports.
//!
//! A report is produced per submit: the interaction page is fetched, its content
//! region extracted, and the extracted text summarised by the AI service. Each
//! stage can fail without aborting the flow, so the outcome is a tagged union.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Structured AI summary of an interaction report
///
/// Every field is optional because the summarisation service is loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSummary {
    /// "Yes" or "No"
    #[serde(default, deserialize_with = "lenient_text")]
    pub overall_interaction: Option<String>,

    /// Major, Moderate, Minor, None, or anything else the service returns
    #[serde(default, deserialize_with = "lenient_text")]
    pub highest_severity_level: Option<String>,

    /// Plain-language clinical summary
    #[serde(default, deserialize_with = "lenient_text")]
    pub clinical_summary: Option<String>,

    /// Recommendation for the pharmacist
    #[serde(default, deserialize_with = "lenient_text")]
    pub pharmacist_recommendation: Option<String>,

    /// Drugs involved in interactions
    #[serde(default, deserialize_with = "one_or_many")]
    pub affected_drugs: Option<Vec<String>>,

    /// Interaction categories (drug-drug, drug-food, ...)
    #[serde(default, deserialize_with = "one_or_many")]
    pub interaction_types: Option<Vec<String>>,
}

/// Render a scalar JSON value as text; objects, arrays and null yield `None`
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Accept a text field given as any scalar; other shapes are dropped
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Accept a list field given as an array, a single scalar, or null
///
/// Array items that are not scalars are skipped rather than failing the
/// whole summary.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().filter_map(scalar_text).collect()),
        other => scalar_text(other).map(|item| vec![item]),
    })
}

/// Interaction risk tier used for display emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    /// Highly clinically significant
    Major,
    /// Moderately clinically significant
    Moderate,
    /// Minimally clinically significant
    Minor,
    /// No interaction found
    None,
    /// Missing or unrecognised level
    Unknown,
}

impl SeverityTier {
    /// Map a severity level string onto a tier, case-insensitively
    pub fn from_level(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "major" => Self::Major,
            "moderate" => Self::Moderate,
            "minor" => Self::Minor,
            "none" => Self::None,
            _ => Self::Unknown,
        }
    }

    /// Badge class for web front ends
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Major => "bg-red-600 text-white",
            Self::Moderate => "bg-yellow-500 text-gray-900",
            Self::Minor => "bg-blue-500 text-white",
            Self::None => "bg-green-600 text-white",
            Self::Unknown => "bg-gray-500 text-white",
        }
    }

    /// Human-readable tier label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Moderate => "Moderate",
            Self::Minor => "Minor",
            Self::None => "None",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Content region extracted from the interaction page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReport {
    /// HTML of the extracted region
    pub html: String,

    /// Visible text of the extracted region
    pub text: String,
}

/// Result of fetching the interaction page through the gateway
///
/// Never an error type: a failed fetch still carries renderable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionFetch {
    /// Raw page body
    Report(String),

    /// Human-readable error fragment to show in place of the report
    Failed(String),
}

impl InteractionFetch {
    /// Renderable text for either variant
    pub fn into_text(self) -> String {
        match self {
            Self::Report(body) | Self::Failed(body) => body,
        }
    }

    /// Whether the fetch failed
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What a finished submit produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// Fetching or extraction failed; the message replaces the report
    Error {
        /// Error text to render
        message: String,
    },

    /// The page was extracted but no summary could be produced
    Extracted {
        /// Extracted region
        extract: ExtractedReport,
    },

    /// The page was extracted and summarised
    Summarized {
        /// Extracted region
        extract: ExtractedReport,
        /// Parsed AI summary
        summary: InteractionSummary,
    },
}

/// Interaction report for one submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    /// Names of the drugs that were checked, in selection order
    pub drugs: Vec<String>,

    /// The `drug_list` parameter sent to the checker
    pub drug_list: String,

    /// When the check finished
    pub checked_at: DateTime<Utc>,

    /// Result of the check
    pub outcome: ReportOutcome,
}

impl InteractionReport {
    /// Create a report stamped with the current time
    pub fn new(drugs: Vec<String>, drug_list: String, outcome: ReportOutcome) -> Self {
        Self {
            drugs,
            drug_list,
            checked_at: Utc::now(),
            outcome,
        }
    }

    /// Summary, when the AI step succeeded
    pub fn summary(&self) -> Option<&InteractionSummary> {
        match &self.outcome {
            ReportOutcome::Summarized { summary, .. } => Some(summary),
            _ => None,
        }
    }
}

/// Stage of the submit flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitPhase {
    /// No submit in flight
    #[default]
    Idle,
    /// Waiting on the interaction page
    Fetching,
    /// Extracting the content region
    Extracting,
    /// Waiting on the AI summary
    Summarizing,
    /// Building the report view
    Rendering,
}

impl SubmitPhase {
    /// Whether a submit is in flight
    pub const fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
