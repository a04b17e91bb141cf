//! Progressive text reveal for the AI summary card.
//!
//! The summary text is split into chunks at sentence boundaries (or a length
//! threshold), and a fixed-duration timeline maps elapsed wall-clock time to
//! "how much of which chunk" is visible. The visible prefix grows every frame
//! until the timeline completes, at which point the full text is published
//! verbatim.
//!
//! Lifecycle:
//! ```text
//! Idle → Animating → Settled
//! ```
//! Setting new text from any state cancels the in-flight run before the new
//! one starts, so two timelines can never write to the same displayed string.
//! All pacing is recomputed from `Instant::now()` inside the frame loop; there
//! are no timers and no threads.

use std::time::{Duration, Instant};

use tracing::debug;

/// Split `text` into ordered chunks that concatenate back to `text` exactly.
///
/// Tokens are whitespace-preserving (each word carries its trailing
/// whitespace). A chunk closes when its latest token ends with a
/// sentence-terminal mark (`.`, `!`, `?`) or when the accumulated character
/// count exceeds `threshold`. Any non-empty trailing buffer becomes the final
/// chunk. An empty input yields an empty sequence.
pub fn chunk_text(text: &str, threshold: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buf = String::new();
    let mut buf_chars = 0usize;

    for token in whitespace_tokens(text) {
        buf_chars += token.chars().count();
        buf.push_str(token);
        let sentence_end = token.trim_end().ends_with(['.', '!', '?']);
        if sentence_end || buf_chars > threshold {
            chunks.push(std::mem::take(&mut buf));
            buf_chars = 0;
        }
    }
    if !buf.is_empty() {
        chunks.push(buf);
    }
    chunks
}

/// Split `text` into tokens such that `concat(tokens) == text`.
///
/// A token is a maximal run of non-whitespace characters plus the whitespace
/// run that follows it. Leading whitespace forms a token of its own.
fn whitespace_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_ws_tail = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            in_ws_tail = true;
        } else if in_ws_tail {
            tokens.push(&text[start..i]);
            start = i;
            in_ws_tail = false;
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Map a progress fraction in `[0, 1]` to the visible text prefix.
///
/// `progress * chunk_count` selects the boundary chunk; its fractional part
/// selects how many characters of that chunk are shown. At `progress >= 1`
/// the full concatenation is returned so the final frame is exact regardless
/// of floating-point rounding along the way.
pub fn displayed_at(chunks: &[String], progress: f64) -> String {
    if chunks.is_empty() {
        return String::new();
    }
    let progress = progress.clamp(0.0, 1.0);
    if progress >= 1.0 {
        return chunks.concat();
    }

    let n = chunks.len();
    let scaled = progress * n as f64;
    let target = (scaled.floor() as usize).min(n - 1);
    let block = scaled - target as f64;
    let current = &chunks[target];
    let chars_to_show = (block * current.chars().count() as f64).floor() as usize;

    let mut out: String = chunks[..target].concat();
    out.extend(current.chars().take(chars_to_show));
    out
}

/// Lifecycle state of one reveal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// No text assigned (or the animation was torn down).
    Idle,
    /// A timeline is running; the displayed prefix grows each frame.
    Animating,
    /// The timeline completed; displayed text equals the full summary.
    Settled,
}

/// Drives the reveal of one summary text.
///
/// Owns the chunk sequence, the timeline start instant, and the currently
/// displayed prefix. Exactly one run is live at a time: `set_text` and
/// `restart` replace the previous run synchronously.
#[derive(Debug)]
pub struct RevealAnimation {
    duration: Duration,
    threshold: usize,
    text: String,
    chunks: Vec<String>,
    displayed: String,
    phase: RevealPhase,
    started_at: Option<Instant>,
}

impl RevealAnimation {
    pub fn new(duration: Duration, threshold: usize) -> Self {
        Self {
            duration,
            threshold,
            text: String::new(),
            chunks: Vec::new(),
            displayed: String::new(),
            phase: RevealPhase::Idle,
            started_at: None,
        }
    }

    /// Assign summary text and start (or restart) the reveal.
    ///
    /// Re-entrancy rule: if a run is already animating the *same* text, this
    /// is a no-op, guarding against duplicate starts from redundant triggers.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        if self.phase == RevealPhase::Animating && self.text == text {
            return;
        }
        self.begin(text.to_owned(), now);
    }

    /// Replay the current text from the beginning (regeneration).
    pub fn restart(&mut self, now: Instant) {
        let text = std::mem::take(&mut self.text);
        self.begin(text, now);
    }

    fn begin(&mut self, text: String, now: Instant) {
        // Cancel the in-flight run before the new one starts.
        self.text = text;
        self.chunks = chunk_text(&self.text, self.threshold);
        self.displayed.clear();
        if self.chunks.is_empty() {
            // Degenerate input: settle immediately, no frame iterations.
            self.phase = RevealPhase::Settled;
            self.started_at = None;
            debug!(target: "reveal", "empty text, settled immediately");
        } else {
            self.phase = RevealPhase::Animating;
            self.started_at = Some(now);
            debug!(
                target: "reveal",
                chunks = self.chunks.len(),
                chars = self.text.chars().count(),
                "reveal started"
            );
        }
    }

    /// Tear down the animation (view unmounted). Cancels any pending run.
    pub fn clear(&mut self) {
        self.text.clear();
        self.chunks.clear();
        self.displayed.clear();
        self.phase = RevealPhase::Idle;
        self.started_at = None;
    }

    /// Advance one frame. Returns `true` while the run is still animating,
    /// i.e. while another frame should be scheduled.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase != RevealPhase::Animating {
            return false;
        }
        let Some(started) = self.started_at else {
            return false;
        };

        let elapsed = now.saturating_duration_since(started);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        if progress >= 1.0 {
            // Snap to the exact full text, independent of rounding above.
            self.displayed.clear();
            self.displayed.push_str(&self.text);
            self.phase = RevealPhase::Settled;
            self.started_at = None;
            debug!(target: "reveal", "reveal settled");
            false
        } else {
            self.displayed = displayed_at(&self.chunks, progress);
            true
        }
    }

    /// The currently visible prefix of the summary text.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == RevealPhase::Animating
    }

    /// The full summary text of the current run.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: usize = 60;

    fn dur(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn chunks_concat_back_to_input() {
        let samples = [
            "",
            "word",
            "Hello world. This is AI.",
            "  leading whitespace, then text!",
            "no terminal punctuation at all just a very long run of words \
             that should be split by the length threshold eventually",
            "Multi.\nline. text?\twith tabs!   trailing spaces   ",
            "宽字符测试。多字节字符也必须保持完整！",
        ];
        for s in samples {
            let chunks = chunk_text(s, THRESHOLD);
            assert_eq!(chunks.concat(), s, "concat(chunk({s:?})) must equal input");
        }
    }

    #[test]
    fn chunks_are_non_empty() {
        let chunks = chunk_text("One. Two! Three? Four", THRESHOLD);
        assert!(!chunks.is_empty());
        for c in &chunks {
            assert!(!c.is_empty());
        }
        assert!(chunk_text("", THRESHOLD).is_empty());
    }

    #[test]
    fn splits_at_sentence_boundary() {
        let chunks = chunk_text("Hello world. This is AI.", THRESHOLD);
        assert_eq!(chunks, vec!["Hello world. ".to_string(), "This is AI.".to_string()]);
    }

    #[test]
    fn splits_at_length_threshold() {
        let text = "aaaa ".repeat(40); // 200 chars, no sentence marks
        let chunks = chunk_text(&text, THRESHOLD);
        assert!(chunks.len() > 1, "long unpunctuated text must split");
        assert_eq!(chunks.concat(), text);
        // Every chunk except the last must have crossed the threshold.
        for c in &chunks[..chunks.len() - 1] {
            assert!(c.chars().count() > THRESHOLD);
        }
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "Determinism matters. Same input, same output!";
        assert_eq!(chunk_text(text, THRESHOLD), chunk_text(text, THRESHOLD));
    }

    #[test]
    fn displayed_lengths_are_non_decreasing() {
        let text = "Hello world. This is AI. And a third sentence for pacing.";
        let chunks = chunk_text(text, THRESHOLD);
        let mut prev_len = 0;
        for i in 0..=1000 {
            let p = i as f64 / 1000.0;
            let shown = displayed_at(&chunks, p);
            assert!(
                shown.chars().count() >= prev_len,
                "length regressed at p={p}"
            );
            assert!(text.starts_with(&shown), "displayed must be a prefix");
            prev_len = shown.chars().count();
        }
    }

    #[test]
    fn displayed_at_completion_is_exact() {
        let text = "Три предложения. Non-ASCII safe? Yes!";
        let chunks = chunk_text(text, THRESHOLD);
        assert_eq!(displayed_at(&chunks, 1.0), text);
        assert_eq!(displayed_at(&chunks, 2.5), text, "progress clamps to 1");
    }

    #[test]
    fn displayed_tolerates_empty_chunks() {
        assert_eq!(displayed_at(&[], 0.5), "");
        assert_eq!(displayed_at(&[], 1.0), "");
    }

    #[test]
    fn animation_progresses_through_chunks() {
        let text = "Hello world. This is AI.";
        let t0 = Instant::now();
        let mut anim = RevealAnimation::new(dur(1500), THRESHOLD);
        anim.set_text(text, t0);
        assert_eq!(anim.phase(), RevealPhase::Animating);

        assert!(anim.tick(t0));
        assert_eq!(anim.displayed(), "");

        // Mid first chunk.
        assert!(anim.tick(t0 + dur(400)));
        let mid = anim.displayed().to_owned();
        assert!(!mid.is_empty());
        assert!("Hello world. ".starts_with(&mid));

        // Into the second chunk.
        assert!(anim.tick(t0 + dur(1100)));
        assert!(anim.displayed().starts_with("Hello world. "));

        // Completion snaps to the full text and stops the loop.
        assert!(!anim.tick(t0 + dur(1500)));
        assert_eq!(anim.displayed(), text);
        assert_eq!(anim.phase(), RevealPhase::Settled);
    }

    #[test]
    fn empty_text_settles_without_frames() {
        let t0 = Instant::now();
        let mut anim = RevealAnimation::new(dur(1500), THRESHOLD);
        anim.set_text("", t0);
        assert_eq!(anim.phase(), RevealPhase::Settled);
        assert_eq!(anim.displayed(), "");
        assert!(!anim.tick(t0));
    }

    #[test]
    fn same_text_while_animating_is_a_no_op() {
        let text = "Hello world. This is AI.";
        let t0 = Instant::now();
        let mut anim = RevealAnimation::new(dur(1500), THRESHOLD);
        anim.set_text(text, t0);
        anim.tick(t0 + dur(700));
        let shown = anim.displayed().to_owned();
        assert!(!shown.is_empty());

        // Redundant trigger must not reset the timeline.
        anim.set_text(text, t0 + dur(750));
        anim.tick(t0 + dur(800));
        assert!(anim.displayed().chars().count() >= shown.chars().count());
    }

    #[test]
    fn replacement_cancels_previous_run() {
        let s1 = "First answer. It will be superseded.";
        let s2 = "Second answer wins.";
        let t0 = Instant::now();
        let mut anim = RevealAnimation::new(dur(1500), THRESHOLD);
        anim.set_text(s1, t0);
        anim.tick(t0 + dur(600));

        // Replace mid-flight: displayed resets and only s2 is ever shown.
        anim.set_text(s2, t0 + dur(700));
        assert_eq!(anim.displayed(), "");
        for ms in [750, 900, 1400, 2200, 2300] {
            anim.tick(t0 + dur(ms));
            assert!(
                s2.starts_with(anim.displayed()),
                "no characters from the old run may leak"
            );
        }
        assert_eq!(anim.displayed(), s2);
        assert_eq!(anim.phase(), RevealPhase::Settled);
    }

    #[test]
    fn restart_replays_from_empty() {
        let text = "Hello world. This is AI.";
        let t0 = Instant::now();
        let mut anim = RevealAnimation::new(dur(1500), THRESHOLD);
        anim.set_text(text, t0);
        anim.tick(t0 + dur(1500));
        assert_eq!(anim.phase(), RevealPhase::Settled);

        anim.restart(t0 + dur(2000));
        assert_eq!(anim.phase(), RevealPhase::Animating);
        assert_eq!(anim.displayed(), "");
        anim.tick(t0 + dur(3500));
        assert_eq!(anim.displayed(), text);
    }

    #[test]
    fn clear_tears_down() {
        let t0 = Instant::now();
        let mut anim = RevealAnimation::new(dur(1500), THRESHOLD);
        anim.set_text("Some text.", t0);
        anim.clear();
        assert_eq!(anim.phase(), RevealPhase::Idle);
        assert_eq!(anim.displayed(), "");
        assert!(!anim.tick(t0 + dur(100)));
    }

    #[test]
    fn zero_duration_settles_on_first_tick() {
        let t0 = Instant::now();
        let mut anim = RevealAnimation::new(Duration::ZERO, THRESHOLD);
        anim.set_text("Instant. Reveal.", t0);
        assert!(!anim.tick(t0));
        assert_eq!(anim.displayed(), "Instant. Reveal.");
    }
}
