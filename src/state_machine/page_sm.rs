//! Page state machine.
//!
//! Models the top-level page:
//! ```text
//! Home ⇄ Results
//! ```
//! Submitting a search from either page lands on (or re-enters) `Results`
//! with the new query; clicking the app title goes back home.

use statig::prelude::*;
use tracing::info;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events dispatched to the page state machine.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// A trimmed, non-empty query was submitted (search bar, suggestion,
    /// topic card, or history entry).
    SearchSubmitted(String),
    /// User clicked the app title in the results header.
    HomeRequested,
}

// ---------------------------------------------------------------------------
// Shared storage
// ---------------------------------------------------------------------------

/// Shared storage for the page state machine: the active query.
#[derive(Debug, Default)]
pub struct PageMachine {
    pub query: String,
}

// ---------------------------------------------------------------------------
// State machine implementation
// ---------------------------------------------------------------------------

#[state_machine(
    initial = "State::home()",
    state(derive(Debug, Clone, PartialEq))
)]
impl PageMachine {
    /// Landing page: hero, big search bar, trending topics.
    #[state]
    fn home(&mut self, event: &PageEvent) -> Outcome<State> {
        match event {
            PageEvent::SearchSubmitted(query) => {
                info!(target: "search", "query submitted: {}", query);
                self.query = query.clone();
                Transition(State::results())
            }
            PageEvent::HomeRequested => Handled,
        }
    }

    /// Results page: AI summary card plus reference results.
    ///
    /// Re-entering with a new query is a self-transition; the caller
    /// restarts the loading/reveal cycle on every `SearchSubmitted`.
    #[state]
    fn results(&mut self, event: &PageEvent) -> Outcome<State> {
        match event {
            PageEvent::SearchSubmitted(query) => {
                info!(target: "search", "query replaced: {}", query);
                self.query = query.clone();
                Transition(State::results())
            }
            PageEvent::HomeRequested => Transition(State::home()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_moves_home_to_results() {
        let mut sm = PageMachine::default().state_machine();
        assert_eq!(*sm.state(), State::home());

        sm.handle(&PageEvent::SearchSubmitted("ai trends".into()));
        assert_eq!(*sm.state(), State::results());
        // StateMachine derefs to the shared storage.
        assert_eq!(sm.query, "ai trends");
    }

    #[test]
    fn resubmit_updates_query_in_place() {
        let mut sm = PageMachine::default().state_machine();
        sm.handle(&PageEvent::SearchSubmitted("first".into()));
        sm.handle(&PageEvent::SearchSubmitted("second".into()));
        assert_eq!(*sm.state(), State::results());
        assert_eq!(sm.query, "second");
    }

    #[test]
    fn home_requested_returns_home() {
        let mut sm = PageMachine::default().state_machine();
        sm.handle(&PageEvent::SearchSubmitted("q".into()));
        sm.handle(&PageEvent::HomeRequested);
        assert_eq!(*sm.state(), State::home());
    }
}
