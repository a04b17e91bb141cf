//! Per-frame hit testing.
//!
//! Render functions register the rectangles they draw for every interactive
//! element; a mouse click is resolved against the registry, topmost (last
//! registered) region first. The map is rebuilt from scratch each frame, so
//! it always matches what is actually on screen.

use vello::kurbo::{Point, Rect};

use crate::model::FeedbackKind;

/// Everything a click can mean.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Search bars
    FocusSearch,
    SubmitSearch,
    Suggestion(usize),
    VoiceSearch,
    ImageSearch,

    // Home page
    OpenHistory,
    QuickLink(usize),
    TopicCard(usize),
    /// `None` selects the "All" pill.
    CategoryPill(Option<usize>),
    ToggleAllTopics,

    // History sidebar
    CloseHistory,
    HistoryItem(usize),
    ClearHistory,

    // Results page
    GoHome,
    Regenerate,
    CopySummary,
    Feedback(FeedbackKind),
    FollowUpChip(usize),
    FocusFollowUp,
    SubmitFollowUp,
    ResultCard(usize),
}

/// The clickable regions of the current frame.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Action)>,
}

impl HitMap {
    /// Drop all regions; called at the start of every frame.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, action: Action) {
        self.regions.push((rect, action));
    }

    /// Resolve a click. Later regions win: overlays register after the page
    /// beneath them.
    pub fn hit(&self, x: f64, y: f64) -> Option<&Action> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(Point::new(x, y)))
            .map(|(_, action)| action)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.regions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topmost_region_wins() {
        let mut map = HitMap::default();
        map.push(Rect::new(0.0, 0.0, 100.0, 100.0), Action::FocusSearch);
        map.push(Rect::new(40.0, 40.0, 60.0, 60.0), Action::SubmitSearch);

        assert_eq!(map.hit(50.0, 50.0), Some(&Action::SubmitSearch));
        assert_eq!(map.hit(10.0, 10.0), Some(&Action::FocusSearch));
        assert_eq!(map.hit(500.0, 500.0), None);
    }

    #[test]
    fn clear_resets_the_frame() {
        let mut map = HitMap::default();
        map.push(Rect::new(0.0, 0.0, 10.0, 10.0), Action::OpenHistory);
        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.hit(5.0, 5.0), None);
    }
}
