//! History sidebar: slide-in panel with past queries.
//!
//! The panel animates both directions: it slides in over the scrim when
//! opened and slides back out before it stops rendering. Both phases are
//! driven by elapsed time against the configured slide duration; there is no
//! timer to cancel.

use std::time::Instant;

use chrono::Utc;
use vello::Scene;
use vello::kurbo::{Affine, Circle, Line, Rect, RoundedRect, Stroke};
use vello::peniko::Fill;

use crate::hit::{Action, HitMap};
use crate::model::{HistoryEntry, format_relative};
use crate::text::{self, Fonts};
use crate::theme::ThemeTokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlidePhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Open/close state of the history sidebar.
#[derive(Debug)]
pub struct HistorySidebar {
    phase: SlidePhase,
    phase_started: Option<Instant>,
}

impl Default for HistorySidebar {
    fn default() -> Self {
        Self {
            phase: SlidePhase::Closed,
            phase_started: None,
        }
    }
}

impl HistorySidebar {
    pub fn open(&mut self, now: Instant) {
        if matches!(self.phase, SlidePhase::Closed | SlidePhase::Closing) {
            self.phase = SlidePhase::Opening;
            self.phase_started = Some(now);
        }
    }

    pub fn close(&mut self, now: Instant) {
        if matches!(self.phase, SlidePhase::Open | SlidePhase::Opening) {
            self.phase = SlidePhase::Closing;
            self.phase_started = Some(now);
        }
    }

    /// Advance phase transitions whose slide has completed.
    pub fn tick(&mut self, now: Instant, theme: &ThemeTokens) {
        let done = self
            .phase_started
            .is_some_and(|t| now.saturating_duration_since(t) >= theme.sidebar_slide());
        match self.phase {
            SlidePhase::Opening if done => {
                self.phase = SlidePhase::Open;
                self.phase_started = None;
            }
            SlidePhase::Closing if done => {
                self.phase = SlidePhase::Closed;
                self.phase_started = None;
            }
            _ => {}
        }
    }

    /// Visible fraction in `[0, 1]`: 0 fully off-screen, 1 fully open.
    pub fn offset(&self, now: Instant, theme: &ThemeTokens) -> f64 {
        let t = self.phase_started.map_or(1.0, |started| {
            let slide = theme.sidebar_slide().as_secs_f64();
            if slide <= 0.0 {
                1.0
            } else {
                (now.saturating_duration_since(started).as_secs_f64() / slide).min(1.0)
            }
        });
        match self.phase {
            SlidePhase::Closed => 0.0,
            SlidePhase::Open => 1.0,
            SlidePhase::Opening => ease_in_out(t),
            SlidePhase::Closing => 1.0 - ease_in_out(t),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != SlidePhase::Closed
    }

    pub fn is_open(&self) -> bool {
        self.phase == SlidePhase::Open
    }

    /// True while the panel is open or still sliding in. A panel that is
    /// already sliding out no longer captures dismissal input.
    pub fn wants_dismissal(&self) -> bool {
        matches!(self.phase, SlidePhase::Opening | SlidePhase::Open)
    }
}

/// Smooth ease-in-out cubic curve.
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Draw the scrim and panel. No-op while fully closed.
#[allow(clippy::too_many_arguments)]
pub fn render(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    sidebar: &HistorySidebar,
    entries: &[HistoryEntry],
    width: f64,
    height: f64,
    now: Instant,
) {
    if !sidebar.is_visible() {
        return;
    }
    let p = &theme.palette;
    let offset = sidebar.offset(now, theme);
    let font = fonts.ui.as_ref();

    let panel_w = theme.layout.sidebar_width;
    let panel_x = (offset - 1.0) * panel_w;

    // Scrim dims the page behind. Only the exposed part closes the sidebar;
    // the panel itself swallows clicks.
    let scrim = Rect::new(0.0, 0.0, width, height);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        p.tooltip_bg.with_alpha(0.20 * offset),
        None,
        &scrim,
    );
    hits.push(Rect::new(panel_x + panel_w, 0.0, width, height), Action::CloseHistory);
    let panel = Rect::new(panel_x, 0.0, panel_x + panel_w, height);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.surface.with_alpha(0.97), None, &panel);

    // Header: icon well, title, close button.
    let header_h = 72.0;
    let rule = Line::new((panel_x, header_h), (panel_x + panel_w, header_h));
    scene.stroke(&Stroke::new(1.0), Affine::IDENTITY, p.border.color(), None, &rule);

    let icon_well = Circle::new((panel_x + 36.0, header_h / 2.0), 16.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary_light.color(), None, &icon_well);
    draw_clock_icon(scene, theme, panel_x + 36.0, header_h / 2.0, 8.0);
    text::draw(
        scene,
        font,
        panel_x + 64.0,
        header_h / 2.0 + 6.0,
        "Search history",
        p.text_primary.color(),
        theme.type_size(1) as f32,
    );

    let close = Rect::new(panel_x + panel_w - 48.0, header_h / 2.0 - 16.0, panel_x + panel_w - 16.0, header_h / 2.0 + 16.0);
    draw_close_icon(scene, theme, close);
    hits.push(close, Action::CloseHistory);

    if entries.is_empty() {
        text::draw_centered(
            scene,
            font,
            panel_x + panel_w / 2.0,
            height / 2.0,
            "No search history yet",
            p.text_secondary.color(),
            theme.type_scale.base as f32,
        );
        return;
    }

    // Entries.
    let now_utc = Utc::now();
    let row_h = 72.0;
    let mut row_y = header_h + 12.0;
    for (i, entry) in entries.iter().enumerate() {
        if row_y + row_h > height - 96.0 {
            break;
        }
        let row = RoundedRect::new(panel_x + 12.0, row_y, panel_x + panel_w - 12.0, row_y + row_h - 8.0, 12.0);
        scene.fill(Fill::NonZero, Affine::IDENTITY, p.bg_top.with_alpha(0.6), None, &row);

        let query = text::truncate_to_width(
            font,
            &entry.query,
            theme.type_scale.base as f32,
            panel_w - 140.0,
        );
        text::draw(
            scene,
            font,
            panel_x + 28.0,
            row_y + 24.0,
            &query,
            p.text_primary.color(),
            theme.type_scale.base as f32,
        );
        let when = format_relative(entry.timestamp, now_utc);
        let when_w = text::measure(font, &when, theme.type_size(-1) as f32);
        text::draw(
            scene,
            font,
            panel_x + panel_w - 28.0 - when_w,
            row_y + 24.0,
            &when,
            p.text_tertiary.color(),
            theme.type_size(-1) as f32,
        );

        // Query-kind tag pill.
        let tag = entry.kind.label();
        let tag_size = theme.type_size(-1) as f32;
        let tag_w = text::measure(font, tag, tag_size) + 16.0;
        let pill = RoundedRect::new(panel_x + 28.0, row_y + 34.0, panel_x + 28.0 + tag_w, row_y + 54.0, 10.0);
        scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary_light.color(), None, &pill);
        text::draw(
            scene,
            font,
            panel_x + 36.0,
            row_y + 48.0,
            tag,
            p.primary.color(),
            tag_size,
        );

        hits.push(row.rect(), Action::HistoryItem(i));
        row_y += row_h;
    }

    // Footer: clear-all button.
    let clear = RoundedRect::new(panel_x + 24.0, height - 72.0, panel_x + panel_w - 24.0, height - 24.0, 12.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary_light.color(), None, &clear);
    text::draw_centered(
        scene,
        font,
        panel_x + panel_w / 2.0,
        height - 42.0,
        "Clear all history",
        p.primary.color(),
        theme.type_scale.base as f32,
    );
    hits.push(clear.rect(), Action::ClearHistory);
}

fn draw_clock_icon(scene: &mut Scene, theme: &ThemeTokens, cx: f64, cy: f64, r: f64) {
    let c = theme.palette.primary.color();
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &Circle::new((cx, cy), r));
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &Line::new((cx, cy - r * 0.6), (cx, cy)));
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &Line::new((cx, cy), (cx + r * 0.5, cy + r * 0.3)));
}

fn draw_close_icon(scene: &mut Scene, theme: &ThemeTokens, r: Rect) {
    let c = theme.palette.text_secondary.color();
    let inset = 10.0;
    scene.stroke(
        &Stroke::new(2.0),
        Affine::IDENTITY,
        c,
        None,
        &Line::new((r.x0 + inset, r.y0 + inset), (r.x1 - inset, r.y1 - inset)),
    );
    scene.stroke(
        &Stroke::new(2.0),
        Affine::IDENTITY,
        c,
        None,
        &Line::new((r.x1 - inset, r.y0 + inset), (r.x0 + inset, r.y1 - inset)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn slide_opens_then_closes_fully() {
        let theme = ThemeTokens::default();
        let t0 = Instant::now();
        let mut sb = HistorySidebar::default();
        assert!(!sb.is_visible());
        assert_eq!(sb.offset(t0, &theme), 0.0);

        sb.open(t0);
        assert!(sb.is_visible());
        let mid = sb.offset(t0 + Duration::from_millis(250), &theme);
        assert!(mid > 0.0 && mid < 1.0);

        sb.tick(t0 + Duration::from_millis(500), &theme);
        assert!(sb.is_open());
        assert_eq!(sb.offset(t0 + Duration::from_millis(600), &theme), 1.0);

        let t1 = t0 + Duration::from_millis(700);
        sb.close(t1);
        assert!(sb.is_visible(), "closing still renders");
        let closing = sb.offset(t1 + Duration::from_millis(250), &theme);
        assert!(closing > 0.0 && closing < 1.0);
        sb.tick(t1 + Duration::from_millis(500), &theme);
        assert!(!sb.is_visible());
    }

    #[test]
    fn reopen_during_close_restarts_slide() {
        let theme = ThemeTokens::default();
        let t0 = Instant::now();
        let mut sb = HistorySidebar::default();
        sb.open(t0);
        sb.tick(t0 + Duration::from_millis(500), &theme);
        sb.close(t0 + Duration::from_millis(600));
        sb.open(t0 + Duration::from_millis(700));
        assert!(sb.is_visible());
        sb.tick(t0 + Duration::from_millis(1200), &theme);
        assert!(sb.is_open());
    }

    #[test]
    fn panel_swallows_clicks_but_scrim_closes() {
        let theme = ThemeTokens::default();
        let t0 = Instant::now();
        let mut sb = HistorySidebar::default();
        sb.open(t0);
        sb.tick(t0 + Duration::from_millis(500), &theme);
        assert!(sb.is_open());

        let mut scene = Scene::new();
        let fonts = Fonts { ui: None };
        let mut hits = HitMap::default();
        let entries = crate::mock::history();
        render(
            &mut scene,
            &fonts,
            &theme,
            &mut hits,
            &sb,
            &entries,
            1280.0,
            800.0,
            t0 + Duration::from_millis(600),
        );

        // Inside the panel header, away from the close button: no action.
        assert_eq!(hits.hit(200.0, 40.0), None);
        // A history row inside the panel resolves to its entry.
        assert_eq!(hits.hit(200.0, 100.0), Some(&Action::HistoryItem(0)));
        // The exposed scrim right of the panel closes.
        assert_eq!(hits.hit(1000.0, 400.0), Some(&Action::CloseHistory));
    }

    #[test]
    fn ease_curve_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-9);
    }
}
