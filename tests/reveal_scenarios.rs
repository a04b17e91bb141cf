//! End-to-end scenarios for the progressive reveal, driven through the
//! public crate API the way the frame loop drives it.

use std::time::{Duration, Instant};

use glint_search::reveal::{RevealAnimation, RevealPhase, chunk_text, displayed_at};

const DURATION: Duration = Duration::from_millis(1500);
const THRESHOLD: usize = 60;

fn anim() -> RevealAnimation {
    RevealAnimation::new(DURATION, THRESHOLD)
}

#[test]
fn full_run_reveals_the_exact_text() {
    let text = "AI is moving fast. Customer service changed first! What comes next?";
    let t0 = Instant::now();
    let mut a = anim();
    a.set_text(text, t0);

    // Sample the timeline like a 60 fps frame loop would.
    let mut prev = 0;
    for frame in 0..=100 {
        let now = t0 + Duration::from_millis(frame * 16);
        a.tick(now);
        let shown = a.displayed();
        assert!(text.starts_with(shown), "displayed must stay a prefix");
        assert!(shown.chars().count() >= prev, "reveal must never shrink");
        prev = shown.chars().count();
    }
    a.tick(t0 + DURATION);
    assert_eq!(a.displayed(), text);
    assert_eq!(a.phase(), RevealPhase::Settled);
}

#[test]
fn pacing_is_chunk_by_chunk() {
    let text = "First sentence here. Second sentence follows. Third closes it.";
    let chunks = chunk_text(text, THRESHOLD);
    assert_eq!(chunks.len(), 3);

    // At one third of the timeline only the first chunk can be complete.
    let early = displayed_at(&chunks, 1.0 / 3.0);
    assert!(early.chars().count() <= chunks[0].chars().count());

    // At two thirds the first chunk is fully visible.
    let mid = displayed_at(&chunks, 2.0 / 3.0);
    assert!(mid.starts_with(&chunks[0]));
    assert!(mid.chars().count() < text.chars().count());
}

#[test]
fn query_replacement_mid_reveal_never_mixes_texts() {
    let first = "The answer to the first question. It rambles on for a while.";
    let second = "A different answer entirely.";
    let t0 = Instant::now();
    let mut a = anim();
    a.set_text(first, t0);
    a.tick(t0 + Duration::from_millis(800));
    assert!(!a.displayed().is_empty());

    // New search arrives mid-animation.
    let t1 = t0 + Duration::from_millis(900);
    a.set_text(second, t1);
    for ms in (0..2000).step_by(100) {
        a.tick(t1 + Duration::from_millis(ms));
        assert!(
            second.starts_with(a.displayed()),
            "old run leaked characters: {:?}",
            a.displayed()
        );
    }
    assert_eq!(a.displayed(), second);
}

#[test]
fn regeneration_restarts_the_same_text() {
    let text = "Stable answer. Regenerated on demand.";
    let t0 = Instant::now();
    let mut a = anim();
    a.set_text(text, t0);
    a.tick(t0 + DURATION);
    assert_eq!(a.phase(), RevealPhase::Settled);

    let t1 = t0 + Duration::from_secs(5);
    a.restart(t1);
    assert_eq!(a.phase(), RevealPhase::Animating);
    assert_eq!(a.displayed(), "");
    a.tick(t1 + DURATION);
    assert_eq!(a.displayed(), text);
}

#[test]
fn unmount_cancels_cleanly() {
    let t0 = Instant::now();
    let mut a = anim();
    a.set_text("Will be torn down. Mid flight.", t0);
    a.tick(t0 + Duration::from_millis(400));
    a.clear();

    assert_eq!(a.phase(), RevealPhase::Idle);
    assert_eq!(a.displayed(), "");
    // Ticks after teardown are inert.
    assert!(!a.tick(t0 + Duration::from_millis(800)));
    assert_eq!(a.displayed(), "");
}

#[test]
fn multibyte_text_reveals_on_char_boundaries() {
    let text = "多语言支持很重要。句子边界也适用！最后一段收尾。";
    let chunks = chunk_text(text, THRESHOLD);
    assert_eq!(chunks.concat(), text);
    // Every sampled prefix must be valid UTF-8 by construction; exercise a
    // dense sweep so any byte-slicing bug would panic.
    for i in 0..=500 {
        let shown = displayed_at(&chunks, i as f64 / 500.0);
        assert!(text.starts_with(&shown));
    }
}

#[test]
fn whitespace_only_text_settles() {
    let t0 = Instant::now();
    let mut a = anim();
    a.set_text("   \n\t  ", t0);
    // Whitespace forms a single chunk; the run completes normally.
    a.tick(t0 + DURATION);
    assert_eq!(a.phase(), RevealPhase::Settled);
    assert_eq!(a.displayed(), "   \n\t  ");
}
