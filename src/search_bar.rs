//! The search bar: input state and rendering for both variants.
//!
//! The home page uses the large variant with a suggestion dropdown; the
//! results header uses the small variant. Voice and image search are demo
//! buttons that surface an "under development" tip.

use std::time::Instant;

use vello::Scene;
use vello::kurbo::{Affine, Circle, Line, Rect, RoundedRect, Stroke};
use vello::peniko::Fill;

use crate::hit::{Action, HitMap};
use crate::text::{self, Fonts};
use crate::theme::ThemeTokens;
use crate::tooltip::TransientTip;

/// Which variant of the bar to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarSize {
    Large,
    Small,
}

/// Editable state of one search bar.
#[derive(Debug, Default)]
pub struct SearchBarState {
    pub query: String,
    pub show_suggestions: bool,
    pub feature_tip: TransientTip,
}

impl SearchBarState {
    /// Typed character: extends the query and (re)opens the dropdown.
    pub fn input_char(&mut self, c: char) {
        self.query.push(c);
        self.show_suggestions = true;
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.show_suggestions = !self.query.is_empty();
    }

    /// Enter pressed or the search button clicked. Returns the trimmed query
    /// if it is non-empty; closes the dropdown either way.
    pub fn take_submission(&mut self) -> Option<String> {
        self.show_suggestions = false;
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }

    /// Click outside or Escape: dismiss the dropdown.
    pub fn dismiss(&mut self) {
        self.show_suggestions = false;
    }
}

/// Draw the bar (and, for the large variant, its suggestion dropdown and
/// feature tip). Registers hit regions. Returns the bar height.
#[allow(clippy::too_many_arguments)]
pub fn render(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    state: &SearchBarState,
    suggestions: &[String],
    x: f64,
    y: f64,
    width: f64,
    size: BarSize,
    focused: bool,
    caret_on: bool,
    now: Instant,
) -> f64 {
    let p = &theme.palette;
    let (height, font_size) = match size {
        BarSize::Large => (56.0, theme.type_size(1) as f32),
        BarSize::Small => (40.0, theme.type_scale.base as f32),
    };
    let radius = height / 2.0;
    let bar = RoundedRect::new(x, y, x + width, y + height, radius);

    scene.fill(Fill::NonZero, Affine::IDENTITY, p.surface.color(), None, &bar);
    let border = if focused { p.primary.color() } else { p.border.color() };
    scene.stroke(&Stroke::new(if focused { 2.0 } else { 1.0 }), Affine::IDENTITY, border, None, &bar);
    hits.push(bar.rect(), Action::FocusSearch);

    // Query text or placeholder.
    let text_x = x + 24.0;
    let baseline = y + height / 2.0 + font_size as f64 * 0.35;
    let icons_w = 3.0 * (height - 8.0);
    let text_budget = width - 24.0 - icons_w - 16.0;
    if state.query.is_empty() {
        text::draw(
            scene,
            fonts.ui.as_ref(),
            text_x,
            baseline,
            "Search anything...",
            p.text_tertiary.color(),
            font_size,
        );
    } else {
        let shown = text::truncate_to_width(fonts.ui.as_ref(), &state.query, font_size, text_budget);
        text::draw(scene, fonts.ui.as_ref(), text_x, baseline, &shown, p.text_primary.color(), font_size);
    }

    // Caret.
    if focused && caret_on {
        let caret_x = text_x
            + text::measure(fonts.ui.as_ref(), &state.query, font_size).min(text_budget)
            + 2.0;
        let caret = Rect::new(caret_x, baseline - font_size as f64, caret_x + 2.0, baseline + 3.0);
        scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary.color(), None, &caret);
    }

    // Right-aligned buttons: voice, image, search.
    let btn = height - 16.0;
    let btn_y = y + 8.0;
    let mut btn_x = x + width - 8.0 - btn;
    for (icon, action) in [
        (Icon::Search, Action::SubmitSearch),
        (Icon::Image, Action::ImageSearch),
        (Icon::Voice, Action::VoiceSearch),
    ] {
        let r = Rect::new(btn_x, btn_y, btn_x + btn, btn_y + btn);
        draw_icon_button(scene, theme, r, icon);
        hits.push(r, action);
        btn_x -= btn + 4.0;
    }

    // Suggestion dropdown (large variant only, while editing).
    if size == BarSize::Large && state.show_suggestions && !suggestions.is_empty() {
        let row_h = 44.0;
        let top = y + height + 8.0;
        let panel = RoundedRect::new(x, top, x + width, top + row_h * suggestions.len() as f64, 12.0);
        scene.fill(Fill::NonZero, Affine::IDENTITY, p.surface.color(), None, &panel);
        scene.stroke(&Stroke::new(1.0), Affine::IDENTITY, p.border.color(), None, &panel);
        for (i, suggestion) in suggestions.iter().enumerate() {
            let row_top = top + row_h * i as f64;
            let row = Rect::new(x, row_top, x + width, row_top + row_h);
            text::draw(
                scene,
                fonts.ui.as_ref(),
                x + 24.0,
                row_top + row_h / 2.0 + 5.0,
                suggestion,
                p.text_primary.color(),
                theme.type_scale.base as f32,
            );
            hits.push(row, Action::Suggestion(i));
        }
    }

    // "Under development" tip for voice/image search.
    if let Some(tip) = state.feature_tip.message(now) {
        draw_tip_bubble(scene, fonts, theme, x + width / 2.0, y + height + 10.0, tip);
    }

    height
}

/// Dark tooltip bubble centered on `center_x`, below `top`.
pub fn draw_tip_bubble(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    center_x: f64,
    top: f64,
    message: &str,
) {
    let p = &theme.palette;
    let size = theme.type_size(-1) as f32;
    let w = text::measure(fonts.ui.as_ref(), message, size) + 24.0;
    let h = 28.0;
    let bubble = RoundedRect::new(center_x - w / 2.0, top, center_x + w / 2.0, top + h, 8.0);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        p.tooltip_bg.with_alpha(0.92),
        None,
        &bubble,
    );
    text::draw_centered(
        scene,
        fonts.ui.as_ref(),
        center_x,
        top + h / 2.0 + size as f64 * 0.35,
        message,
        vello::peniko::Color::new([1.0, 1.0, 1.0, 1.0]),
        size,
    );
}

enum Icon {
    Voice,
    Image,
    Search,
}

fn draw_icon_button(scene: &mut Scene, theme: &ThemeTokens, r: Rect, icon: Icon) {
    let p = &theme.palette;
    let well = RoundedRect::from_rect(r, 8.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary_light.with_alpha(0.6), None, &well);

    let c = p.primary.color();
    let (cx, cy) = (r.center().x, r.center().y);
    let s = r.width() * 0.22;
    match icon {
        Icon::Voice => {
            // Microphone: capsule plus stand.
            let capsule = RoundedRect::new(cx - s * 0.45, cy - s, cx + s * 0.45, cy + s * 0.3, s * 0.45);
            scene.fill(Fill::NonZero, Affine::IDENTITY, c, None, &capsule);
            let stand = Line::new((cx, cy + s * 0.3), (cx, cy + s));
            scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &stand);
        }
        Icon::Image => {
            // Picture frame with a horizon line.
            let frame = Rect::new(cx - s, cy - s * 0.75, cx + s, cy + s * 0.75);
            scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &frame);
            let horizon = Line::new((cx - s, cy + s * 0.25), (cx + s, cy + s * 0.25));
            scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &horizon);
        }
        Icon::Search => {
            // Magnifier: lens plus handle.
            let lens = Circle::new((cx - s * 0.2, cy - s * 0.2), s * 0.8);
            scene.stroke(&Stroke::new(2.0), Affine::IDENTITY, c, None, &lens);
            let handle = Line::new((cx + s * 0.4, cy + s * 0.4), (cx + s, cy + s));
            scene.stroke(&Stroke::new(2.0), Affine::IDENTITY, c, None, &handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_trims_and_rejects_empty() {
        let mut bar = SearchBarState::default();
        bar.query = "   ".into();
        assert_eq!(bar.take_submission(), None);

        bar.query = "  ai trends  ".into();
        assert_eq!(bar.take_submission(), Some("ai trends".to_string()));
        assert!(!bar.show_suggestions);
    }

    #[test]
    fn typing_opens_dropdown_and_dismiss_closes_it() {
        let mut bar = SearchBarState::default();
        bar.input_char('a');
        assert!(bar.show_suggestions);
        bar.dismiss();
        assert!(!bar.show_suggestions);
        bar.backspace();
        assert!(bar.query.is_empty());
        assert!(!bar.show_suggestions);
    }
}
