//! Transient auto-dismiss tooltips.
//!
//! A tooltip is a value with a deadline: it reads as present until the
//! deadline passes, then as absent. Expiry is checked lazily on read, so no
//! timer ever needs to be scheduled or cancelled. Showing a new message
//! replaces the old one and its deadline.

use std::time::{Duration, Instant};

/// One transient tooltip slot (copy confirmation, feedback thanks, ...).
#[derive(Debug, Default)]
pub struct TransientTip {
    current: Option<(String, Instant)>,
}

impl TransientTip {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Show `message` until `now + ttl`. Replaces any active tip.
    pub fn show(&mut self, message: impl Into<String>, now: Instant, ttl: Duration) {
        self.current = Some((message.into(), now + ttl));
    }

    /// The active message, or `None` once the deadline has passed.
    pub fn message(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((msg, expires_at)) if now < *expires_at => Some(msg),
            _ => None,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.message(now).is_some()
    }

    /// Dismiss early (component unmount or a superseding action).
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(2000);

    #[test]
    fn visible_until_deadline_then_absent() {
        let t0 = Instant::now();
        let mut tip = TransientTip::new();
        assert!(tip.message(t0).is_none());

        tip.show("Copied to clipboard", t0, TTL);
        assert_eq!(tip.message(t0), Some("Copied to clipboard"));
        assert_eq!(tip.message(t0 + Duration::from_millis(1999)), Some("Copied to clipboard"));
        assert!(tip.message(t0 + TTL).is_none());
        assert!(!tip.is_active(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn new_action_replaces_message_and_deadline() {
        let t0 = Instant::now();
        let mut tip = TransientTip::new();
        tip.show("first", t0, TTL);
        tip.show("second", t0 + Duration::from_millis(1500), TTL);

        // The old deadline no longer applies.
        let late = t0 + Duration::from_millis(3000);
        assert_eq!(tip.message(late), Some("second"));
        assert!(tip.message(t0 + Duration::from_millis(3501)).is_none());
    }

    #[test]
    fn clear_dismisses_early() {
        let t0 = Instant::now();
        let mut tip = TransientTip::new();
        tip.show("short lived", t0, TTL);
        tip.clear();
        assert!(tip.message(t0).is_none());
    }
}
