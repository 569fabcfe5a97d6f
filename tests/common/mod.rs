//! Common test utilities for integration tests
//!
//! Provides an in-memory gateway and sample pages shared across the session
//! and relay tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use negin::domain::models::{InteractionFetch, InteractionSummary, Suggestion};
use negin::InteractionGateway;

/// Interaction page with the report between comment markers
pub const MARKED_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Drug Interaction Report</title></head>
<body>
  <nav>Home | Drugs A-Z</nav>
  <div id="content">
    <!-- Content start -->
    <h1>Drug Interaction Report</h1>
    <p>2 potential interactions and/or warnings have been found between the following drugs:</p>
    <ul><li>aspirin</li><li>warfarin</li></ul>
    <h2>Major</h2>
    <p>Aspirin may increase the anticoagulant effect of warfarin.</p>
    <!-- Content end -->
    <div class="ads">Sponsored</div>
  </div>
</body></html>"#;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// One gateway call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Autocomplete(String),
    Check(String),
    Summarize(String),
}

/// In-memory gateway with scripted answers and optional per-call delays
pub struct FakeGateway {
    suggestions: HashMap<String, (Vec<Suggestion>, Duration)>,
    page: InteractionFetch,
    check_delay: Duration,
    summary: Option<InteractionSummary>,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            suggestions: HashMap::new(),
            page: InteractionFetch::Report(MARKED_PAGE.to_string()),
            check_delay: Duration::ZERO,
            summary: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suggestions(mut self, query: &str, results: Vec<Suggestion>) -> Self {
        self.suggestions
            .insert(query.to_string(), (results, Duration::ZERO));
        self
    }

    pub fn with_slow_suggestions(
        mut self,
        query: &str,
        results: Vec<Suggestion>,
        delay: Duration,
    ) -> Self {
        self.suggestions.insert(query.to_string(), (results, delay));
        self
    }

    pub fn with_page(mut self, page: InteractionFetch) -> Self {
        self.page = page;
        self
    }

    pub fn with_check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = delay;
        self
    }

    pub fn with_summary(mut self, summary: InteractionSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl InteractionGateway for FakeGateway {
    async fn autocomplete(&self, query: &str) -> Vec<Suggestion> {
        self.record(Call::Autocomplete(query.to_string()));
        match self.suggestions.get(query) {
            Some((results, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                results.clone()
            }
            None => Vec::new(),
        }
    }

    async fn check_interactions(&self, drug_list: &str) -> InteractionFetch {
        self.record(Call::Check(drug_list.to_string()));
        if !self.check_delay.is_zero() {
            tokio::time::sleep(self.check_delay).await;
        }
        self.page.clone()
    }

    async fn summarize(&self, report_text: &str) -> Option<InteractionSummary> {
        self.record(Call::Summarize(report_text.to_string()));
        self.summary.clone()
    }
}

pub fn major_summary() -> InteractionSummary {
    InteractionSummary {
        overall_interaction: Some("Yes".to_string()),
        highest_severity_level: Some("Major".to_string()),
        clinical_summary: Some("Increased bleeding risk.".to_string()),
        pharmacist_recommendation: Some("Avoid combination; monitor INR.".to_string()),
        affected_drugs: Some(vec!["aspirin".to_string(), "warfarin".to_string()]),
        interaction_types: Some(vec!["drug-drug".to_string()]),
    }
}
