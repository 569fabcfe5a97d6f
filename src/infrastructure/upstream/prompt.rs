//! Prompt sent to the summarisation service

/// Keys the summary object must contain
pub const SUMMARY_KEYS: [&str; 6] = [
    "overall_interaction",
    "highest_severity_level",
    "clinical_summary",
    "pharmacist_recommendation",
    "affected_drugs",
    "interaction_types",
];

/// Build the summarisation prompt for an interaction report
///
/// Report text longer than `max_chars` characters is cut at a character
/// boundary.
pub fn build_summary_prompt(report_text: &str, max_chars: usize) -> String {
    let report = truncate_chars(report_text.trim(), max_chars);

    format!(
        r#"You are a clinical pharmacist. Summarise the drug interaction report below.

Respond with a single JSON object and nothing else, using exactly these keys:
- "overall_interaction": "Yes" if any interaction was found, otherwise "No"
- "highest_severity_level": one of "Major", "Moderate", "Minor", "None"
- "clinical_summary": two or three sentences describing the interactions
- "pharmacist_recommendation": one practical recommendation
- "affected_drugs": array of the drug names involved in interactions
- "interaction_types": array of interaction categories (e.g. "drug-drug", "drug-food")

REPORT:
{report}"#
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
