//! Widget state: the search field, the last snapshot or error, and the
//! loading flag, plus the search handler that drives them.
//!
//! A search is split in two so several can be in flight at once:
//! [`WidgetState::begin_search`] validates and hands out a [`PendingSearch`]
//! ticket, [`WidgetState::complete_search`] applies the provider outcome.
//! Only the most recently issued ticket may change state; outcomes of
//! superseded searches are dropped.

use thiserror::Error;
use tracing::debug;

use crate::{WeatherProvider, WeatherSnapshot};

/// The two failures a user can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter a valid location.")]
    EmptyInput,

    /// Non-success status, transport failure or unreadable body.
    #[error("City not found. Please try again.")]
    NotFound,
}

/// Ticket for a search that has been validated and is waiting on the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending search leaves the widget loading until it is completed"]
pub struct PendingSearch {
    location: String,
    generation: u64,
}

impl PendingSearch {
    /// Trimmed location to send to the provider.
    pub fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    input: String,
    weather: Option<WeatherSnapshot>,
    error: Option<SearchError>,
    loading: bool,
    generation: u64,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn error(&self) -> Option<SearchError> {
        self.error
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Overwrite the search field. Anything goes while typing.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Validate the field and, if it holds a location, enter the loading state.
    ///
    /// Blank input records [`SearchError::EmptyInput`], clears the snapshot and
    /// returns `None`; no request should be made.
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        let location = self.input.trim();

        if location.is_empty() {
            self.error = Some(SearchError::EmptyInput);
            self.weather = None;
            return None;
        }

        self.generation += 1;
        self.loading = true;
        self.error = None;

        Some(PendingSearch { location: location.to_string(), generation: self.generation })
    }

    /// Apply a provider outcome. Returns `false` when the ticket was superseded
    /// by a later search and the outcome was discarded.
    pub fn complete_search(
        &mut self,
        pending: PendingSearch,
        outcome: anyhow::Result<WeatherSnapshot>,
    ) -> bool {
        if pending.generation != self.generation {
            debug!(
                location = %pending.location,
                stale = pending.generation,
                latest = self.generation,
                "discarding superseded search result"
            );
            return false;
        }

        match outcome {
            Ok(snapshot) => {
                self.weather = Some(snapshot);
                self.error = None;
            }
            Err(err) => {
                debug!(location = %pending.location, error = ?err, "search failed");
                self.error = Some(SearchError::NotFound);
                self.weather = None;
            }
        }

        self.loading = false;
        true
    }

    /// Submit the current input: validate, query `provider` once, store the result.
    pub async fn search(&mut self, provider: &dyn WeatherProvider) {
        let Some(pending) = self.begin_search() else {
            return;
        };

        let outcome = provider.current(pending.location()).await;
        self.complete_search(pending, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider that replays a canned outcome and records queried locations.
    #[derive(Debug, Default)]
    struct StubProvider {
        reply: Option<WeatherSnapshot>,
        calls: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn ok(snapshot: WeatherSnapshot) -> Self {
            Self { reply: Some(snapshot), ..Self::default() }
        }

        fn failing() -> Self {
            Self::default()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, location: &str) -> anyhow::Result<WeatherSnapshot> {
            self.calls.lock().unwrap().push(location.to_string());
            self.reply.clone().ok_or_else(|| anyhow::anyhow!("status 400: No matching location"))
        }
    }

    fn london() -> WeatherSnapshot {
        WeatherSnapshot::celsius(12.0, "Overcast".into(), "London".into())
    }

    fn assert_exclusive(state: &WidgetState) {
        assert!(
            !(state.weather().is_some() && state.error().is_some()),
            "weather and error must not both be present: {state:?}"
        );
    }

    #[test]
    fn set_input_overwrites_without_validation() {
        let mut state = WidgetState::new();
        state.set_input("Lon");
        state.set_input("   ");

        assert_eq!(state.input(), "   ");
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn blank_input_never_calls_provider() {
        for input in ["", " ", "\t\n  "] {
            let provider = StubProvider::ok(london());
            let mut state = WidgetState::new();
            state.set_input(input);

            state.search(&provider).await;

            assert_eq!(state.error(), Some(SearchError::EmptyInput));
            assert_eq!(state.weather(), None);
            assert!(!state.is_loading());
            assert!(provider.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn blank_input_clears_previous_snapshot() {
        let provider = StubProvider::ok(london());
        let mut state = WidgetState::new();
        state.set_input("London");
        state.search(&provider).await;
        assert!(state.weather().is_some());

        state.set_input("  ");
        state.search(&provider).await;

        assert_eq!(state.weather(), None);
        assert_eq!(state.error(), Some(SearchError::EmptyInput));
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn success_stores_snapshot_and_sends_trimmed_location() {
        let provider = StubProvider::ok(london());
        let mut state = WidgetState::new();
        state.set_input("  london \n");

        state.search(&provider).await;

        assert_eq!(provider.calls(), vec!["london".to_string()]);
        assert_eq!(state.weather(), Some(&london()));
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
        // The field keeps what the user typed.
        assert_eq!(state.input(), "  london \n");
    }

    #[tokio::test]
    async fn failure_sets_not_found_and_clears_snapshot() {
        let mut state = WidgetState::new();
        state.set_input("London");
        state.search(&StubProvider::ok(london())).await;

        state.set_input("Atlantis");
        state.search(&StubProvider::failing()).await;

        assert_eq!(state.error(), Some(SearchError::NotFound));
        assert_eq!(state.weather(), None);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn success_after_failure_clears_error() {
        let mut state = WidgetState::new();
        state.set_input("Atlantis");
        state.search(&StubProvider::failing()).await;
        assert_eq!(state.error(), Some(SearchError::NotFound));

        state.set_input("London");
        state.search(&StubProvider::ok(london())).await;

        assert_eq!(state.error(), None);
        assert_eq!(state.weather(), Some(&london()));
    }

    #[test]
    fn begin_search_enters_loading_and_clears_error() {
        let mut state = WidgetState::new();
        assert!(state.begin_search().is_none());
        assert_eq!(state.error(), Some(SearchError::EmptyInput));

        state.set_input("Oslo");
        let pending = state.begin_search().expect("non-blank input starts a search");

        assert_eq!(pending.location(), "Oslo");
        assert!(state.is_loading());
        assert_eq!(state.error(), None);

        assert!(state.complete_search(pending, Ok(london())));
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut state = WidgetState::new();

        state.set_input("Paris");
        let first = state.begin_search().unwrap();
        state.set_input("London");
        let second = state.begin_search().unwrap();

        // Second search resolves first, then the older one arrives late.
        assert!(state.complete_search(second, Ok(london())));
        assert!(!state.complete_search(first, Err(anyhow::anyhow!("timeout"))));

        assert_eq!(state.weather(), Some(&london()));
        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn loading_stays_on_until_latest_search_completes() {
        let mut state = WidgetState::new();

        state.set_input("Paris");
        let first = state.begin_search().unwrap();
        state.set_input("London");
        let second = state.begin_search().unwrap();

        assert!(!state.complete_search(first, Ok(london())));
        assert!(state.is_loading());
        assert_eq!(state.weather(), None);

        assert!(state.complete_search(second, Err(anyhow::anyhow!("404"))));
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(SearchError::NotFound));
    }

    #[tokio::test]
    async fn weather_and_error_stay_exclusive() {
        let ok = StubProvider::ok(london());
        let bad = StubProvider::failing();
        let mut state = WidgetState::new();

        for (input, fail) in [("London", false), ("", false), ("Atlantis", true), ("London", false)] {
            state.set_input(input);
            if fail {
                state.search(&bad).await;
            } else {
                state.search(&ok).await;
            }
            assert_exclusive(&state);
            assert!(!state.is_loading());
        }
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(SearchError::EmptyInput.to_string(), "Please enter a valid location.");
        assert_eq!(SearchError::NotFound.to_string(), "City not found. Please try again.");
    }
}
