//! Debounced autocomplete feed.
//!
//! Every keystroke bumps a monotonic sequence number. When the debounced lookup
//! completes, its results are published only if its sequence is still the latest
//! issued, so a slow response for an old query never replaces newer results.
//! The sequence of the lookup currently awaiting the gateway is tracked too,
//! which drives the loading indicator for the latest query only.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::models::{SearchConfig, Suggestion};
use crate::domain::ports::InteractionGateway;
use crate::services::debounce::Debouncer;

/// Autocomplete results driven by raw search-box input
pub struct SuggestionFeed {
    query: Mutex<String>,
    sequence: Arc<AtomicU64>,
    in_flight: Arc<AtomicU64>,
    suggestions: Arc<watch::Sender<Vec<Suggestion>>>,
    debouncer: Debouncer<(u64, String)>,
    min_query_len: usize,
}

impl SuggestionFeed {
    /// Create a feed that looks suggestions up through `gateway`
    pub fn new(gateway: Arc<dyn InteractionGateway>, config: &SearchConfig) -> Self {
        let (suggestions, _) = watch::channel(Vec::new());
        let suggestions = Arc::new(suggestions);
        let sequence = Arc::new(AtomicU64::new(0));
        let in_flight = Arc::new(AtomicU64::new(0));

        let debouncer = {
            let suggestions = Arc::clone(&suggestions);
            let sequence = Arc::clone(&sequence);
            let in_flight = Arc::clone(&in_flight);
            Debouncer::new(
                Duration::from_millis(config.debounce_ms),
                move |(issued, query): (u64, String)| {
                    let gateway = Arc::clone(&gateway);
                    let suggestions = Arc::clone(&suggestions);
                    let sequence = Arc::clone(&sequence);
                    let in_flight = Arc::clone(&in_flight);
                    async move {
                        in_flight.store(issued, Ordering::SeqCst);
                        let results = gateway.autocomplete(&query).await;
                        let _ = in_flight.compare_exchange(
                            issued,
                            0,
                            Ordering::SeqCst,
                            Ordering::SeqCst,
                        );
                        let latest = sequence.load(Ordering::SeqCst);
                        if issued != latest {
                            debug!(issued, latest, query = %query, "dropping stale suggestions");
                            return;
                        }
                        debug!(count = results.len(), query = %query, "suggestions updated");
                        suggestions.send_replace(results);
                    }
                },
            )
        };

        Self {
            query: Mutex::new(String::new()),
            sequence,
            in_flight,
            suggestions,
            debouncer,
            min_query_len: config.min_query_len.max(1),
        }
    }

    /// Handle new search-box text
    ///
    /// The query is trimmed; one shorter than the minimum length clears the
    /// suggestions immediately. Returns the sequence number issued.
    pub fn on_input(&self, raw: &str) -> u64 {
        let query = raw.trim().to_string();
        *self.query.lock().unwrap_or_else(PoisonError::into_inner) = raw.to_string();
        let issued = self.bump();

        if query.chars().count() < self.min_query_len {
            self.debouncer.cancel();
            self.suggestions.send_replace(Vec::new());
            return issued;
        }

        self.debouncer.call((issued, query));
        issued
    }

    /// Clear the query and suggestions, invalidating in-flight lookups
    pub fn clear(&self) {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.bump();
        self.debouncer.cancel();
        self.suggestions.send_replace(Vec::new());
    }

    /// Hide the suggestions but keep the query text
    ///
    /// In-flight and pending lookups are invalidated, so the panel stays
    /// hidden until the next keystroke.
    pub fn dismiss(&self) {
        self.bump();
        self.debouncer.cancel();
        self.suggestions.send_replace(Vec::new());
    }

    /// Raw text last entered
    pub fn query(&self) -> String {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Latest published suggestions
    pub fn current(&self) -> Vec<Suggestion> {
        self.suggestions.borrow().clone()
    }

    /// Watch published suggestions
    pub fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>> {
        self.suggestions.subscribe()
    }

    /// Latest sequence number issued
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Whether a debounced lookup is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether the lookup for the latest query is awaiting the gateway
    pub fn is_loading(&self) -> bool {
        let fetching = self.in_flight.load(Ordering::SeqCst);
        fetching != 0 && fetching == self.sequence()
    }

    fn bump(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}
