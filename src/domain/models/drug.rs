//! Domain models for drug lookup and selection.
//!
//! Suggestions come back from the autocomplete endpoint and are transient; a
//! `SelectedDrug` is created when the user picks one and lives in the session's
//! selection until removed.

use serde::{Deserialize, Deserializer, Serialize};

/// One autocomplete candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display name of the drug
    pub suggestion: String,

    /// Drug identifier used by the interaction checker
    #[serde(default, deserialize_with = "string_or_number")]
    pub ddc_id: String,

    /// Brand name identifier used by the interaction checker
    #[serde(default, deserialize_with = "string_or_number")]
    pub brand_name_id: String,
}

impl Suggestion {
    /// Build a suggestion from its three identifiers
    pub fn new(
        suggestion: impl Into<String>,
        ddc_id: impl Into<String>,
        brand_name_id: impl Into<String>,
    ) -> Self {
        Self {
            suggestion: suggestion.into(),
            ddc_id: ddc_id.into(),
            brand_name_id: brand_name_id.into(),
        }
    }
}

/// A drug the user has added to the interaction check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDrug {
    /// Display name, unique within a selection
    pub suggestion: String,

    /// Drug identifier
    pub ddc_id: String,

    /// Brand name identifier
    pub brand_name_id: String,
}

impl SelectedDrug {
    /// Build a selected drug from its three identifiers
    pub fn new(
        suggestion: impl Into<String>,
        ddc_id: impl Into<String>,
        brand_name_id: impl Into<String>,
    ) -> Self {
        Self {
            suggestion: suggestion.into(),
            ddc_id: ddc_id.into(),
            brand_name_id: brand_name_id.into(),
        }
    }

    /// The `"{ddc_id}-{brand_name_id}"` pair the interaction checker expects
    pub fn query_pair(&self) -> String {
        format!("{}-{}", self.ddc_id, self.brand_name_id)
    }
}

impl From<Suggestion> for SelectedDrug {
    fn from(s: Suggestion) -> Self {
        Self {
            suggestion: s.suggestion,
            ddc_id: s.ddc_id,
            brand_name_id: s.brand_name_id,
        }
    }
}

/// Join the query pairs of `drugs` into a `drug_list` parameter
///
/// # Example
/// ```
/// use negin::domain::models::{drug_list_param, SelectedDrug};
///
/// let drugs = vec![SelectedDrug::new("A", "1", "2"), SelectedDrug::new("B", "3", "4")];
/// assert_eq!(drug_list_param(&drugs), "1-2,3-4");
/// ```
pub fn drug_list_param(drugs: &[SelectedDrug]) -> String {
    drugs
        .iter()
        .map(SelectedDrug::query_pair)
        .collect::<Vec<_>>()
        .join(",")
}

/// Raw autocomplete payload: `{ categories: [ { results: [...] } ] }`
///
/// Results are kept as loose JSON so one malformed entry does not discard
/// the whole list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompletePayload {
    /// Result categories; only the first one is used
    #[serde(default)]
    pub categories: Vec<AutocompleteCategory>,
}

/// One category of autocomplete results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteCategory {
    /// Candidate entries
    #[serde(default)]
    pub results: Option<Vec<serde_json::Value>>,
}

impl AutocompletePayload {
    /// Suggestions from the first category, or empty when there is none
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.categories
            .into_iter()
            .next()
            .and_then(|category| category.results)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<Suggestion>(entry).ok())
            .filter(|s| !s.suggestion.trim().is_empty())
            .collect()
    }
}

/// Accept an identifier encoded either as a JSON string or a number
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
        Id::Missing(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pair() {
        let drug = SelectedDrug::new("Aspirin", "244", "0");
        assert_eq!(drug.query_pair(), "244-0");
    }

    #[test]
    fn test_drug_list_param_empty() {
        assert_eq!(drug_list_param(&[]), "");
    }

    #[test]
    fn test_payload_takes_first_category() {
        let payload: AutocompletePayload = serde_json::from_value(json!({
            "categories": [
                { "results": [ { "suggestion": "Ibuprofen", "ddc_id": "1", "brand_name_id": "0" } ] },
                { "results": [ { "suggestion": "Ignored", "ddc_id": "9", "brand_name_id": "9" } ] }
            ]
        }))
        .unwrap();

        let suggestions = payload.into_suggestions();
        assert_eq!(suggestions, vec![Suggestion::new("Ibuprofen", "1", "0")]);
    }

    #[test]
    fn test_payload_without_results_is_empty() {
        let payload: AutocompletePayload =
            serde_json::from_value(json!({ "categories": [ {} ] })).unwrap();
        assert!(payload.into_suggestions().is_empty());

        let payload: AutocompletePayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.into_suggestions().is_empty());
    }

    #[test]
    fn test_numeric_ids_and_malformed_entries() {
        let payload: AutocompletePayload = serde_json::from_value(json!({
            "categories": [ { "results": [
                { "suggestion": "Warfarin", "ddc_id": 2311, "brand_name_id": 0 },
                { "ddc_id": "5", "brand_name_id": "6" },
                { "suggestion": "   ", "ddc_id": "7", "brand_name_id": "8" },
                "not an object"
            ] } ]
        }))
        .unwrap();

        let suggestions = payload.into_suggestions();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0], Suggestion::new("Warfarin", "2311", "0"));
    }

    #[test]
    fn test_selected_from_suggestion() {
        let selected: SelectedDrug = Suggestion::new("Aspirin", "244", "0").into();
        assert_eq!(selected, SelectedDrug::new("Aspirin", "244", "0"));
    }
}
