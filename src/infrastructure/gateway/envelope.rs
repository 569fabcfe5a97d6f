//! Decoding of the summarisation envelope
//!
//! The relay returns the AI service's response in one of two shapes:
//!
//! - a sequence whose first element carries `content.parts[0].text`
//! - a single object carrying `content.parts[0].text`
//!
//! The text is itself a JSON-encoded summary. Decoding tries shape A, then
//! shape B, and fails otherwise.

use serde::Deserialize;
use serde_json::Value;

use super::errors::GatewayError;
use crate::domain::models::InteractionSummary;

/// Envelope shapes the relay may return
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SummaryEnvelope {
    /// Shape A: `[ { content: { parts: [ { text } ] } }, ... ]`
    Sequence(Vec<Value>),

    /// Shape B: `{ content: { parts: [ { text } ] } }`
    Single(Candidate),
}

/// One generated candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

impl Candidate {
    fn into_text(self) -> Option<String> {
        self.content.parts.into_iter().next().map(|part| part.text)
    }
}

impl SummaryEnvelope {
    /// The JSON-encoded summary carried by the envelope
    pub fn into_inner_text(self) -> Result<String, GatewayError> {
        let candidate = match self {
            Self::Sequence(items) => {
                let first = items
                    .into_iter()
                    .next()
                    .ok_or_else(|| GatewayError::Envelope("empty candidate list".to_string()))?;
                serde_json::from_value::<Candidate>(first)
                    .map_err(|e| GatewayError::Envelope(e.to_string()))?
            }
            Self::Single(candidate) => candidate,
        };

        candidate
            .into_text()
            .ok_or_else(|| GatewayError::Envelope("candidate has no parts".to_string()))
    }
}

/// Decode a raw relay response into a summary
///
/// # Errors
/// Returns [`GatewayError::Envelope`] when the value matches neither shape and
/// [`GatewayError::JsonError`] when the inner text is not a summary object.
pub fn decode_summary(value: Value) -> Result<InteractionSummary, GatewayError> {
    let envelope: SummaryEnvelope =
        serde_json::from_value(value).map_err(|e| GatewayError::Envelope(e.to_string()))?;
    let text = envelope.into_inner_text()?;
    let summary = serde_json::from_str(strip_markdown_fences(&text))?;
    Ok(summary)
}

/// Strip a surrounding ```json fence, which models add despite being asked not to
fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let clean = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    clean.strip_suffix("```").unwrap_or(clean).trim()
}
