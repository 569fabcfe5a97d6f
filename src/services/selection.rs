//! Ordered, de-duplicated selection of drugs for one session.

use serde::Serialize;

use crate::domain::models::{drug_list_param, SelectedDrug};

/// Minimum number of selections before an interaction check can be submitted
pub const MIN_SELECTIONS: usize = 2;

/// Selection state owned by a session
///
/// Entries are unique by `suggestion` and keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    drugs: Vec<SelectedDrug>,
}

impl SelectionState {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `drug` unless one with the same name is already selected
    ///
    /// Returns `true` if the drug was added.
    pub fn add(&mut self, drug: SelectedDrug) -> bool {
        if self.contains(&drug.suggestion) {
            return false;
        }
        self.drugs.push(drug);
        true
    }

    /// Remove the entry named `suggestion`
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, suggestion: &str) -> bool {
        match self.drugs.iter().position(|d| d.suggestion == suggestion) {
            Some(index) => {
                self.drugs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Current selection in insertion order
    pub fn list(&self) -> &[SelectedDrug] {
        &self.drugs
    }

    /// Display names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.drugs.iter().map(|d| d.suggestion.clone()).collect()
    }

    /// Whether a drug with this name is selected
    pub fn contains(&self, suggestion: &str) -> bool {
        self.drugs.iter().any(|d| d.suggestion == suggestion)
    }

    /// Whether enough drugs are selected to check interactions
    pub fn can_submit(&self) -> bool {
        self.drugs.len() >= MIN_SELECTIONS
    }

    /// `drug_list` query value for the current selection
    pub fn drug_list_param(&self) -> String {
        drug_list_param(&self.drugs)
    }

    /// Remove every selection
    pub fn clear(&mut self) {
        self.drugs.clear();
    }

    /// Number of selected drugs
    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}
