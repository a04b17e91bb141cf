//! Application core: all UI state and the event/action logic, independent of
//! the window and GPU plumbing in `main.rs`.
//!
//! Everything time-based (reveal, tips, sidebar slide, loading deadline,
//! caret blink) is recomputed from the `now` passed into `tick` and the
//! handlers, so the core is fully deterministic under test.

use std::time::Instant;

use statig::prelude::*;
use tracing::{info, warn};
use vello::Scene;

use crate::hit::{Action, HitMap};
use crate::home_screen::{self, HomeView};
use crate::mock;
use crate::model::{
    AiSummary, FeedbackKind, HistoryEntry, HotTopic, QueryKind, SearchResult, search_time_for,
};
use crate::results_screen::{self, ResultsView};
use crate::reveal::RevealAnimation;
use crate::search_bar::SearchBarState;
use crate::sidebar::{self, HistorySidebar};
use crate::state_machine::{PageEvent, PageMachine, PageState};
use crate::text::Fonts;
use crate::theme::ThemeTokens;
use crate::tooltip::TransientTip;

/// Which text input owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Search,
    FollowUp,
}

pub struct AppCore {
    pub theme: ThemeTokens,
    page: StateMachine<PageMachine>,

    // Search bars: one per page so going home preserves the hero bar.
    pub home_bar: SearchBarState,
    pub results_bar: SearchBarState,
    pub focus: Focus,
    pub hits: HitMap,
    pub cursor: (f64, f64),

    // Home page.
    pub show_all_topics: bool,
    pub selected_category: Option<usize>,
    pub sidebar: HistorySidebar,
    pub history: Vec<HistoryEntry>,
    topics: Vec<HotTopic>,
    categories: Vec<String>,
    suggestions: Vec<String>,

    // Results page.
    summary: AiSummary,
    results: Vec<SearchResult>,
    pub loading_until: Option<Instant>,
    pub reveal: RevealAnimation,
    copy_tip: TransientTip,
    feedback_tip: TransientTip,
    follow_up_tip: TransientTip,
    pub follow_up_input: String,
    search_time: f64,

    started_at: Instant,
}

impl AppCore {
    pub fn new(theme: ThemeTokens, now: Instant) -> Self {
        let topics = mock::hot_topics();
        let categories = home_screen::category_list(&topics);
        let reveal = RevealAnimation::new(theme.reveal_duration(), theme.reveal.chunk_threshold);
        Self {
            theme,
            page: PageMachine::default().state_machine(),
            home_bar: SearchBarState::default(),
            results_bar: SearchBarState::default(),
            focus: Focus::None,
            hits: HitMap::default(),
            cursor: (0.0, 0.0),
            show_all_topics: false,
            selected_category: None,
            sidebar: HistorySidebar::default(),
            history: mock::history(),
            topics,
            categories,
            suggestions: mock::suggestions(),
            summary: mock::summary(),
            results: mock::results(),
            loading_until: None,
            reveal,
            copy_tip: TransientTip::new(),
            feedback_tip: TransientTip::new(),
            follow_up_tip: TransientTip::new(),
            follow_up_input: String::new(),
            search_time: 0.0,
            started_at: now,
        }
    }

    pub fn on_results_page(&self) -> bool {
        matches!(self.page.state(), PageState::Results {})
    }

    pub fn query(&self) -> &str {
        &self.page.query
    }

    fn active_bar_mut(&mut self) -> &mut SearchBarState {
        if self.on_results_page() {
            &mut self.results_bar
        } else {
            &mut self.home_bar
        }
    }

    // -----------------------------------------------------------------------
    // Per-frame clock
    // -----------------------------------------------------------------------

    /// Resolve deadlines and advance animations. Called once per frame.
    pub fn tick(&mut self, now: Instant) {
        if self.loading_until.is_some_and(|deadline| now >= deadline) {
            self.loading_until = None;
            if self.reveal.text() == self.summary.text {
                // Regeneration: the same answer replays from the start.
                self.reveal.restart(now);
            } else {
                let text = self.summary.text.clone();
                self.reveal.set_text(&text, now);
            }
        }
        self.reveal.tick(now);
        self.sidebar.tick(now, &self.theme);
    }

    pub fn is_loading(&self) -> bool {
        self.loading_until.is_some()
    }

    /// Caret blink: on/off square wave from the app clock.
    pub fn caret_on(&self, now: Instant) -> bool {
        let period = self.theme.motion.cursor_blink_ms.max(1);
        let elapsed = now.saturating_duration_since(self.started_at).as_millis() as u64;
        (elapsed / period) % 2 == 0
    }

    /// Skeleton pulse in `[0, 1]`, a sine on the app clock.
    pub fn pulse(&self, now: Instant) -> f64 {
        let period = self.theme.motion.skeleton_pulse_ms.max(1) as f64 / 1000.0;
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f64();
        0.5 + 0.5 * (elapsed / period * std::f64::consts::TAU).sin()
    }

    // -----------------------------------------------------------------------
    // Search flow
    // -----------------------------------------------------------------------

    /// Submit a query: record history, switch pages, arm the mock backend
    /// deadline, and reset the reveal so the card starts from the skeleton.
    pub fn submit_search(&mut self, query: &str, kind: QueryKind, now: Instant) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        info!(target: "search", %query, "search submitted");
        self.history.insert(
            0,
            HistoryEntry {
                query: query.to_owned(),
                timestamp: chrono::Utc::now(),
                kind,
            },
        );
        self.page.handle(&PageEvent::SearchSubmitted(query.to_owned()));
        self.results_bar.query = query.to_owned();
        self.results_bar.dismiss();
        self.home_bar.dismiss();
        self.search_time = search_time_for(query);
        self.begin_loading(now);
        self.focus = Focus::None;
    }

    /// Arm the fake backend: skeleton now, reveal when the deadline passes.
    fn begin_loading(&mut self, now: Instant) {
        self.loading_until = Some(now + self.theme.loading_delay());
        self.reveal.clear();
        self.follow_up_input.clear();
        self.copy_tip.clear();
        self.feedback_tip.clear();
    }

    fn go_home(&mut self) {
        self.page.handle(&PageEvent::HomeRequested);
        self.loading_until = None;
        self.reveal.clear();
        self.follow_up_tip.clear();
        self.focus = Focus::None;
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// A resolved click. Returns `true` if the click hit anything.
    pub fn handle_action(&mut self, action: Action, now: Instant) {
        let ttl = self.theme.tooltip_ttl();
        match action {
            Action::FocusSearch => {
                self.focus = Focus::Search;
            }
            Action::SubmitSearch => {
                if let Some(query) = self.active_bar_mut().take_submission() {
                    self.submit_search(&query, QueryKind::Text, now);
                }
            }
            Action::Suggestion(i) => {
                if let Some(s) = self.suggestions.get(i).cloned() {
                    self.home_bar.query = s.clone();
                    self.submit_search(&s, QueryKind::Text, now);
                }
            }
            Action::VoiceSearch => {
                self.active_bar_mut()
                    .feature_tip
                    .show("Voice search is under development", now, ttl);
            }
            Action::ImageSearch => {
                self.active_bar_mut()
                    .feature_tip
                    .show("Image search is under development", now, ttl);
            }
            Action::OpenHistory => self.sidebar.open(now),
            Action::CloseHistory => self.sidebar.close(now),
            Action::HistoryItem(i) => {
                if let Some(q) = self.history.get(i).map(|e| e.query.clone()) {
                    self.sidebar.close(now);
                    self.submit_search(&q, QueryKind::Text, now);
                }
            }
            Action::ClearHistory => {
                info!(target: "search", "history cleared");
                self.history.clear();
            }
            Action::QuickLink(i) => {
                if let Some(link) = mock::QUICK_LINKS.get(i) {
                    info!(target: "nav", url = link.url, "quick link opened");
                }
            }
            Action::TopicCard(i) => {
                if let Some(title) = self.topics.get(i).map(|t| t.title.clone()) {
                    self.home_bar.query = title.clone();
                    self.submit_search(&title, QueryKind::Text, now);
                }
            }
            Action::CategoryPill(selected) => self.selected_category = selected,
            Action::ToggleAllTopics => self.show_all_topics = !self.show_all_topics,
            Action::GoHome => self.go_home(),
            Action::Regenerate => {
                info!(target: "summary", "regenerate requested");
                // The reveal keeps its text: the skeleton hides it until the
                // deadline tick replays it via `restart`.
                self.loading_until = Some(now + self.theme.loading_delay());
                self.copy_tip.clear();
                self.feedback_tip.clear();
            }
            Action::CopySummary => {
                self.copy_summary(now);
            }
            Action::Feedback(kind) => {
                info!(target: "summary", kind = kind.label(), "feedback recorded");
                let msg = match kind {
                    FeedbackKind::Positive => "Thanks for the thumbs up!",
                    FeedbackKind::Negative => "Thanks, we'll work on it",
                };
                self.feedback_tip.show(msg, now, ttl);
            }
            Action::FollowUpChip(i) => {
                if let Some(q) = self.summary.follow_up_questions.get(i).cloned() {
                    self.ask_follow_up(&q, now);
                }
            }
            Action::FocusFollowUp => {
                self.focus = Focus::FollowUp;
            }
            Action::SubmitFollowUp => {
                let q = self.follow_up_input.trim().to_owned();
                if !q.is_empty() {
                    self.ask_follow_up(&q, now);
                }
            }
            Action::ResultCard(i) => {
                if let Some(r) = self.results.get(i) {
                    info!(target: "nav", url = %r.url, "result opened");
                }
            }
        }
    }

    fn ask_follow_up(&mut self, question: &str, now: Instant) {
        info!(target: "summary", %question, "follow-up asked");
        self.follow_up_tip.show(
            format!("Follow-up received: {question}"),
            now,
            self.theme.tooltip_ttl(),
        );
        self.begin_loading(now);
    }

    fn copy_summary(&mut self, now: Instant) {
        let text = self.summary.text.clone();
        match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
            Ok(()) => {
                info!(target: "summary", "summary copied to clipboard");
                self.copy_tip.show("Copied to clipboard", now, self.theme.tooltip_ttl());
            }
            Err(e) => {
                warn!(target: "summary", "clipboard unavailable: {e}");
                self.copy_tip.show("Copy failed", now, self.theme.tooltip_ttl());
            }
        }
    }

    pub fn on_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            Focus::Search => self.active_bar_mut().input_char(c),
            Focus::FollowUp => self.follow_up_input.push(c),
            Focus::None => {}
        }
    }

    pub fn on_backspace(&mut self) {
        match self.focus {
            Focus::Search => self.active_bar_mut().backspace(),
            Focus::FollowUp => {
                self.follow_up_input.pop();
            }
            Focus::None => {}
        }
    }

    pub fn on_enter(&mut self, now: Instant) {
        match self.focus {
            Focus::Search => {
                if let Some(query) = self.active_bar_mut().take_submission() {
                    self.submit_search(&query, QueryKind::Text, now);
                }
            }
            Focus::FollowUp => self.handle_action(Action::SubmitFollowUp, now),
            Focus::None => {}
        }
    }

    /// Escape: close the topmost dismissable thing. Returns `false` when
    /// nothing was open, which the window loop treats as a request to exit.
    pub fn on_escape(&mut self, now: Instant) -> bool {
        if self.sidebar.wants_dismissal() {
            self.sidebar.close(now);
            return true;
        }
        if self.home_bar.show_suggestions || self.results_bar.show_suggestions {
            self.home_bar.dismiss();
            self.results_bar.dismiss();
            return true;
        }
        if self.focus != Focus::None {
            self.focus = Focus::None;
            return true;
        }
        false
    }

    pub fn on_click(&mut self, now: Instant) {
        let (x, y) = self.cursor;
        match self.hits.hit(x, y).cloned() {
            Some(action) => self.handle_action(action, now),
            None => {
                // Clicking empty space drops focus and dropdowns.
                self.focus = Focus::None;
                self.home_bar.dismiss();
                self.results_bar.dismiss();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Draw the current page plus overlays, rebuilding the hit map.
    pub fn render(&mut self, scene: &mut Scene, fonts: &Fonts, width: f64, height: f64, now: Instant) {
        self.hits.clear();
        if self.on_results_page() {
            let view = ResultsView {
                bar: &self.results_bar,
                summary: &self.summary,
                revealed: self.reveal.displayed(),
                loading: self.is_loading(),
                pulse: self.pulse(now),
                results: &self.results,
                search_time: self.search_time,
                follow_up_input: &self.follow_up_input,
                follow_up_focused: self.focus == Focus::FollowUp,
                search_focused: self.focus == Focus::Search,
                caret_on: self.caret_on(now),
                copy_tip: self.copy_tip.message(now),
                feedback_tip: self.feedback_tip.message(now),
                follow_up_tip: self.follow_up_tip.message(now),
            };
            results_screen::render(scene, fonts, &self.theme, &mut self.hits, &view, width, height, now);
        } else {
            let view = HomeView {
                bar: &self.home_bar,
                suggestions: &self.suggestions,
                topics: &self.topics,
                categories: &self.categories,
                selected_category: self.selected_category,
                show_all_topics: self.show_all_topics,
                quick_links: &mock::QUICK_LINKS,
                search_focused: self.focus == Focus::Search,
                caret_on: self.caret_on(now),
            };
            home_screen::render(scene, fonts, &self.theme, &mut self.hits, &view, width, height, now);
        }
        sidebar::render(
            scene,
            fonts,
            &self.theme,
            &mut self.hits,
            &self.sidebar,
            &self.history,
            width,
            height,
            now,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealPhase;
    use std::time::Duration;

    fn core() -> (AppCore, Instant) {
        let now = Instant::now();
        (AppCore::new(ThemeTokens::default(), now), now)
    }

    #[test]
    fn submit_switches_page_and_arms_loading() {
        let (mut app, t0) = core();
        assert!(!app.on_results_page());

        app.submit_search("  ai trends  ", QueryKind::Text, t0);
        assert!(app.on_results_page());
        assert_eq!(app.query(), "ai trends");
        assert!(app.is_loading());
        assert_eq!(app.history.first().map(|e| e.query.as_str()), Some("ai trends"));
        assert_eq!(app.reveal.phase(), RevealPhase::Idle);
    }

    #[test]
    fn empty_submission_is_ignored() {
        let (mut app, t0) = core();
        app.submit_search("   ", QueryKind::Text, t0);
        assert!(!app.on_results_page());
        assert_eq!(app.history.len(), mock::history().len());
    }

    #[test]
    fn loading_deadline_starts_the_reveal() {
        let (mut app, t0) = core();
        app.submit_search("q", QueryKind::Text, t0);

        app.tick(t0 + Duration::from_millis(500));
        assert!(app.is_loading());
        assert_eq!(app.reveal.displayed(), "");

        app.tick(t0 + Duration::from_millis(1000));
        assert!(!app.is_loading());
        assert_eq!(app.reveal.phase(), RevealPhase::Animating);

        // Reveal completes 1500 ms after it starts.
        app.tick(t0 + Duration::from_millis(2600));
        assert_eq!(app.reveal.phase(), RevealPhase::Settled);
        assert_eq!(app.reveal.displayed(), mock::summary().text);
    }

    #[test]
    fn regenerate_replays_from_skeleton() {
        let (mut app, t0) = core();
        app.submit_search("q", QueryKind::Text, t0);
        // One tick to resolve the loading deadline, one to finish the reveal.
        app.tick(t0 + Duration::from_millis(1000));
        app.tick(t0 + Duration::from_millis(2600));
        assert_eq!(app.reveal.phase(), RevealPhase::Settled);

        let t1 = t0 + Duration::from_millis(4000);
        app.handle_action(Action::Regenerate, t1);
        assert!(app.is_loading());
        // The settled answer stays (hidden by the skeleton) until the
        // deadline replays it.
        assert_eq!(app.reveal.phase(), RevealPhase::Settled);

        app.tick(t1 + Duration::from_millis(1100));
        assert_eq!(app.reveal.phase(), RevealPhase::Animating);
        app.tick(t1 + Duration::from_millis(2700));
        assert_eq!(app.reveal.displayed(), mock::summary().text);
    }

    #[test]
    fn topic_card_submits_its_title() {
        let (mut app, t0) = core();
        let title = mock::hot_topics()[2].title.clone();
        app.handle_action(Action::TopicCard(2), t0);
        assert!(app.on_results_page());
        assert_eq!(app.query(), title);
    }

    #[test]
    fn history_item_closes_sidebar_and_searches() {
        let (mut app, t0) = core();
        app.handle_action(Action::OpenHistory, t0);
        assert!(app.sidebar.is_visible());

        let expected = app.history[1].query.clone();
        app.handle_action(Action::HistoryItem(1), t0 + Duration::from_millis(600));
        assert!(app.on_results_page());
        assert_eq!(app.query(), expected);
    }

    #[test]
    fn clear_history_empties_the_list() {
        let (mut app, t0) = core();
        app.handle_action(Action::ClearHistory, t0);
        assert!(app.history.is_empty());
    }

    #[test]
    fn escape_unwinds_overlays_before_exiting() {
        let (mut app, t0) = core();
        app.handle_action(Action::OpenHistory, t0);
        app.focus = Focus::Search;
        app.home_bar.input_char('a');

        assert!(app.on_escape(t0)); // starts closing the sidebar
        // The panel is still sliding out but no longer captures Escape.
        assert!(app.sidebar.is_visible());
        assert!(app.on_escape(t0)); // dismisses the dropdown
        assert!(app.on_escape(t0)); // drops focus
        assert!(!app.on_escape(t0)); // nothing left: exit
    }

    #[test]
    fn follow_up_submission_shows_tip_and_reloads() {
        let (mut app, t0) = core();
        app.submit_search("q", QueryKind::Text, t0);
        app.tick(t0 + Duration::from_millis(3000));

        app.focus = Focus::FollowUp;
        for c in "why?".chars() {
            app.on_char(c);
        }
        let t1 = t0 + Duration::from_millis(3500);
        app.on_enter(t1);
        assert!(app.is_loading());
        assert!(app.follow_up_input.is_empty());
    }

    #[test]
    fn go_home_tears_down_results_state() {
        let (mut app, t0) = core();
        app.submit_search("q", QueryKind::Text, t0);
        app.handle_action(Action::GoHome, t0 + Duration::from_millis(100));
        assert!(!app.on_results_page());
        assert!(!app.is_loading());
        assert_eq!(app.reveal.phase(), RevealPhase::Idle);
    }

    #[test]
    fn category_and_grid_toggles() {
        let (mut app, t0) = core();
        app.handle_action(Action::CategoryPill(Some(1)), t0);
        assert_eq!(app.selected_category, Some(1));
        app.handle_action(Action::CategoryPill(None), t0);
        assert_eq!(app.selected_category, None);
        app.handle_action(Action::ToggleAllTopics, t0);
        assert!(app.show_all_topics);
    }
}
