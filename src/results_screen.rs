//! Results page: small search bar in the header, the AI summary card on the
//! left, and compact reference results on the right.
//!
//! The summary body renders whatever prefix the reveal animation currently
//! exposes; while the mock backend "loads", skeleton bars pulse in its place.

use std::time::Instant;

use vello::Scene;
use vello::kurbo::{Affine, Circle, Line, Rect, RoundedRect, Stroke};
use vello::peniko::{Fill, Gradient};

use crate::hit::{Action, HitMap};
use crate::model::{AiSummary, FeedbackKind, SearchResult, domain_from_url};
use crate::search_bar::{self, BarSize, SearchBarState};
use crate::text::{self, Fonts};
use crate::theme::ThemeTokens;

/// Everything the results page needs to draw one frame.
pub struct ResultsView<'a> {
    pub bar: &'a SearchBarState,
    pub summary: &'a AiSummary,
    /// Prefix of the summary text currently revealed.
    pub revealed: &'a str,
    pub loading: bool,
    /// Skeleton pulse alpha in `[0, 1]`, driven by the caller's clock.
    pub pulse: f64,
    pub results: &'a [SearchResult],
    pub search_time: f64,
    pub follow_up_input: &'a str,
    pub follow_up_focused: bool,
    pub search_focused: bool,
    pub caret_on: bool,
    pub copy_tip: Option<&'a str>,
    pub feedback_tip: Option<&'a str>,
    pub follow_up_tip: Option<&'a str>,
}

#[allow(clippy::too_many_arguments)]
pub fn render(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    view: &ResultsView<'_>,
    width: f64,
    height: f64,
    now: Instant,
) {
    let p = &theme.palette;

    let bg = Gradient::new_linear((0.0, 0.0), (0.0, height))
        .with_stops([p.bg_top.color(), p.bg_bottom.color()]);
    scene.fill(Fill::NonZero, Affine::IDENTITY, &bg, None, &Rect::new(0.0, 0.0, width, height));

    render_header(scene, fonts, theme, hits, view, width, now);

    let margin = theme.layout.margin;
    let top = theme.layout.header_height + margin;
    let summary_w = theme.layout.summary_column.min(width * 0.55);
    render_ai_card(scene, fonts, theme, hits, view, margin, top, summary_w, height);

    let refs_x = margin + summary_w + theme.layout.card_gap * 1.5;
    render_references(scene, fonts, theme, hits, view, refs_x, top, width - refs_x - margin, height);
}

fn render_header(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    view: &ResultsView<'_>,
    width: f64,
    now: Instant,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();
    let h = theme.layout.header_height;
    let margin = theme.layout.margin;

    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        p.surface.with_alpha(0.9),
        None,
        &Rect::new(0.0, 0.0, width, h),
    );
    scene.stroke(
        &Stroke::new(1.0),
        Affine::IDENTITY,
        p.border.color(),
        None,
        &Line::new((0.0, h), (width, h)),
    );

    // App title links back home.
    let title_size = theme.type_size(1) as f32;
    let title_w = text::measure(font, "Glint", title_size);
    text::draw(scene, font, margin, h / 2.0 + title_size as f64 * 0.35, "Glint", p.primary.color(), title_size);
    hits.push(Rect::new(margin - 4.0, 8.0, margin + title_w + 4.0, h - 8.0), Action::GoHome);

    // Small search bar.
    let bar_x = margin + title_w + 32.0;
    let bar_w = (width * 0.42).min(560.0);
    search_bar::render(
        scene,
        fonts,
        theme,
        hits,
        view.bar,
        &[],
        bar_x,
        8.0,
        bar_w,
        BarSize::Small,
        view.search_focused,
        view.caret_on,
        now,
    );

    let size = theme.type_size(-1) as f32;
    let settings_w = text::measure(font, "Settings", size);
    text::draw(
        scene,
        font,
        width - margin - settings_w,
        h / 2.0 + size as f64 * 0.35,
        "Settings",
        p.text_secondary.color(),
        size,
    );
}

#[allow(clippy::too_many_arguments)]
fn render_ai_card(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    view: &ResultsView<'_>,
    x: f64,
    y: f64,
    w: f64,
    height: f64,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();
    let pad = theme.layout.card_padding;
    let card_bottom = height - theme.layout.margin;
    let card = RoundedRect::new(x, y, x + w, card_bottom, theme.layout.corner_radius);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.surface.color(), None, &card);
    scene.stroke(&Stroke::new(1.0), Affine::IDENTITY, p.border.color(), None, &card);

    // Card header: spark icon, title, regenerate and copy buttons.
    let head_y = y + pad + 10.0;
    let icon = Circle::new((x + pad + 12.0, head_y - 4.0), 12.0);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        &Gradient::new_linear((icon.center.x - 12.0, 0.0), (icon.center.x + 12.0, 0.0))
            .with_stops([p.primary.color(), p.accent.color()]),
        None,
        &icon,
    );
    text::draw(
        scene,
        font,
        x + pad + 34.0,
        head_y,
        "AI Summary",
        p.text_primary.color(),
        theme.type_size(1) as f32,
    );

    let btn = 28.0;
    let copy_r = Rect::new(x + w - pad - btn, head_y - 18.0, x + w - pad, head_y - 18.0 + btn);
    let regen_r = Rect::new(copy_r.x0 - btn - 8.0, copy_r.y0, copy_r.x0 - 8.0, copy_r.y1);
    draw_copy_icon(scene, theme, copy_r);
    draw_regen_icon(scene, theme, regen_r);
    if !view.loading {
        hits.push(copy_r, Action::CopySummary);
        hits.push(regen_r, Action::Regenerate);
    }
    if let Some(tip) = view.copy_tip {
        search_bar::draw_tip_bubble(scene, fonts, theme, copy_r.center().x, copy_r.y1 + 8.0, tip);
    }

    // Body: the revealing text, or the skeleton while loading.
    let body_top = head_y + 16.0;
    let body_x = x + pad + 14.0;
    let body_w = w - pad * 2.0 - 28.0;
    let line_h = theme.space(1.0);

    if view.loading {
        render_skeleton(scene, theme, view.pulse, x + pad, body_top + 8.0, w - pad * 2.0);
    } else {
        let text_baseline = body_top + 14.0 + theme.type_scale.base;
        let next = text::draw_wrapped(
            scene,
            font,
            body_x,
            text_baseline,
            body_w,
            line_h,
            None,
            view.revealed,
            p.text_primary.color(),
            theme.type_scale.base as f32,
        );
        // Thin brand-colored accent along the left of the answer.
        scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            p.primary.color(),
            None,
            &RoundedRect::new(x + pad, body_top + 6.0, x + pad + 3.0, next - 8.0, 1.5),
        );
        let mut cursor_y = next + 12.0;

        // Sources.
        text::draw(scene, font, body_x, cursor_y + 12.0, "Sources", p.text_secondary.color(), theme.type_size(-1) as f32);
        cursor_y += 32.0;
        for source in &view.summary.sources {
            if cursor_y > card_bottom - 120.0 {
                break;
            }
            scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                p.primary.color(),
                None,
                &Circle::new((body_x + 3.0, cursor_y - 4.0), 2.5),
            );
            let line = text::truncate_to_width(font, source, theme.type_size(-1) as f32, body_w - 16.0);
            text::draw(scene, font, body_x + 14.0, cursor_y, &line, p.text_secondary.color(), theme.type_size(-1) as f32);
            cursor_y += 20.0;
        }

        // Follow-up chips.
        cursor_y += 10.0;
        let chip_size = theme.type_size(-1) as f32;
        let chip_h = 28.0;
        let mut chip_x = body_x;
        for (i, q) in view.summary.follow_up_questions.iter().enumerate() {
            let label = text::truncate_to_width(font, q, chip_size, body_w * 0.8);
            let cw = text::measure(font, &label, chip_size) + 24.0;
            if chip_x + cw > body_x + body_w {
                chip_x = body_x;
                cursor_y += chip_h + 8.0;
            }
            if cursor_y + chip_h > card_bottom - 70.0 {
                break;
            }
            let chip = RoundedRect::new(chip_x, cursor_y, chip_x + cw, cursor_y + chip_h, chip_h / 2.0);
            scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary_light.color(), None, &chip);
            text::draw_centered(
                scene,
                font,
                chip_x + cw / 2.0,
                cursor_y + chip_h / 2.0 + chip_size as f64 * 0.35,
                &label,
                p.primary.color(),
                chip_size,
            );
            hits.push(chip.rect(), Action::FollowUpChip(i));
            chip_x += cw + 8.0;
        }
    }

    // Follow-up input row pinned to the card bottom.
    render_follow_up_row(scene, fonts, theme, hits, view, x + pad, card_bottom - pad - 40.0, w - pad * 2.0);
}

fn render_skeleton(scene: &mut Scene, theme: &ThemeTokens, pulse: f64, x: f64, y: f64, w: f64) {
    let color = theme.palette.skeleton.with_alpha(0.45 + 0.55 * pulse);
    let widths = [1.0, 0.92, 0.97, 0.6];
    for (i, frac) in widths.iter().enumerate() {
        let bar_y = y + i as f64 * 22.0;
        let bar = RoundedRect::new(x, bar_y, x + w * frac, bar_y + 12.0, 6.0);
        scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &bar);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_follow_up_row(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    view: &ResultsView<'_>,
    x: f64,
    y: f64,
    w: f64,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();
    let h = 40.0;
    let size = theme.type_scale.base as f32;

    // Thumbs up / down on the right.
    let thumb = 32.0;
    let down_r = Rect::new(x + w - thumb, y + (h - thumb) / 2.0, x + w, y + (h + thumb) / 2.0);
    let up_r = Rect::new(down_r.x0 - thumb - 6.0, down_r.y0, down_r.x0 - 6.0, down_r.y1);
    draw_thumb_icon(scene, theme, up_r, true);
    draw_thumb_icon(scene, theme, down_r, false);
    hits.push(up_r, Action::Feedback(FeedbackKind::Positive));
    hits.push(down_r, Action::Feedback(FeedbackKind::Negative));
    if let Some(tip) = view.feedback_tip {
        search_bar::draw_tip_bubble(scene, fonts, theme, up_r.center().x, up_r.y0 - 38.0, tip);
    }

    // Send button.
    let send_w = 60.0;
    let send = RoundedRect::new(up_r.x0 - 12.0 - send_w, y, up_r.x0 - 12.0, y + h, h / 2.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary.color(), None, &send);
    text::draw_centered(
        scene,
        font,
        send.rect().center().x,
        y + h / 2.0 + size as f64 * 0.35,
        "Ask",
        p.surface.color(),
        size,
    );
    hits.push(send.rect(), Action::SubmitFollowUp);

    // Input field.
    let field = RoundedRect::new(x, y, send.rect().x0 - 10.0, y + h, h / 2.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.bg_top.color(), None, &field);
    let border = if view.follow_up_focused { p.primary.color() } else { p.border.color() };
    scene.stroke(&Stroke::new(if view.follow_up_focused { 2.0 } else { 1.0 }), Affine::IDENTITY, border, None, &field);
    hits.push(field.rect(), Action::FocusFollowUp);

    let text_x = x + 18.0;
    let baseline = y + h / 2.0 + size as f64 * 0.35;
    let budget = field.rect().width() - 36.0;
    if view.follow_up_input.is_empty() {
        text::draw(scene, font, text_x, baseline, "Ask a follow-up question...", p.text_tertiary.color(), size);
    } else {
        let shown = text::truncate_to_width(font, view.follow_up_input, size, budget);
        text::draw(scene, font, text_x, baseline, &shown, p.text_primary.color(), size);
    }
    if view.follow_up_focused && view.caret_on {
        let cx = text_x + text::measure(font, view.follow_up_input, size).min(budget) + 2.0;
        scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            p.primary.color(),
            None,
            &Rect::new(cx, baseline - size as f64, cx + 2.0, baseline + 3.0),
        );
    }
    if let Some(tip) = view.follow_up_tip {
        search_bar::draw_tip_bubble(scene, fonts, theme, field.rect().center().x, y - 38.0, tip);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_references(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    view: &ResultsView<'_>,
    x: f64,
    y: f64,
    w: f64,
    height: f64,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();

    text::draw(scene, font, x, y + 16.0, "References", p.text_primary.color(), theme.type_size(1) as f32);
    let readout = format!(
        "{} results in {:.2}s",
        view.results.len(),
        view.search_time
    );
    text::draw(
        scene,
        font,
        x,
        y + 36.0,
        &readout,
        p.text_tertiary.color(),
        theme.type_size(-1) as f32,
    );

    let card_h = 108.0;
    let gap = theme.layout.card_gap;
    let mut card_y = y + 52.0;
    for (i, result) in view.results.iter().enumerate() {
        if card_y + card_h > height - theme.layout.margin {
            break;
        }
        render_result_card(scene, fonts, theme, result, x, card_y, w, card_h);
        hits.push(Rect::new(x, card_y, x + w, card_y + card_h), Action::ResultCard(i));
        card_y += card_h + gap;
    }
}

#[allow(clippy::too_many_arguments)]
fn render_result_card(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    result: &SearchResult,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();
    let card = RoundedRect::new(x, y, x + w, y + h, theme.layout.corner_radius);
    scene.fill(Fill::NonZero, Affine::IDENTITY, p.surface.color(), None, &card);
    scene.stroke(&Stroke::new(1.0), Affine::IDENTITY, p.border.color(), None, &card);

    // Thumbnail placeholder block with the kind marker.
    let pad = 12.0;
    let thumb = Rect::new(x + pad, y + pad, x + pad + 84.0, y + h - pad);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        if result.thumbnail.is_some() { p.primary_light.color() } else { p.skeleton.color() },
        None,
        &RoundedRect::from_rect(thumb, 8.0),
    );
    text::draw_centered(
        scene,
        font,
        thumb.center().x,
        thumb.center().y + 4.0,
        result.kind.marker(),
        p.primary.color(),
        theme.type_size(-1) as f32,
    );

    let body_x = thumb.x1 + 14.0;
    let body_w = x + w - pad - body_x;
    let title = text::truncate_to_width(font, &result.title, theme.type_scale.base as f32, body_w);
    text::draw(scene, font, body_x, y + pad + 14.0, &title, p.text_primary.color(), theme.type_scale.base as f32);

    text::draw_wrapped(
        scene,
        font,
        body_x,
        y + pad + 34.0,
        body_w,
        17.0,
        Some(2),
        &result.description,
        p.text_secondary.color(),
        theme.type_size(-1) as f32,
    );

    let meta = format!(
        "{} • {} • {}",
        domain_from_url(&result.url),
        result.meta.source,
        result.meta.date
    );
    let meta_line = text::truncate_to_width(font, &meta, theme.type_size(-1) as f32, body_w);
    text::draw(
        scene,
        font,
        body_x,
        y + h - pad - 4.0,
        &meta_line,
        p.text_tertiary.color(),
        theme.type_size(-1) as f32,
    );
}

fn draw_copy_icon(scene: &mut Scene, theme: &ThemeTokens, r: Rect) {
    let c = theme.palette.text_secondary.color();
    let back = Rect::new(r.x0 + 7.0, r.y0 + 5.0, r.x1 - 9.0, r.y1 - 11.0);
    let front = Rect::new(r.x0 + 11.0, r.y0 + 9.0, r.x1 - 5.0, r.y1 - 7.0);
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &back);
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &front);
}

fn draw_regen_icon(scene: &mut Scene, theme: &ThemeTokens, r: Rect) {
    let c = theme.palette.text_secondary.color();
    let circle = Circle::new(r.center(), r.width() * 0.28);
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &circle);
    // Arrowhead on the loop.
    let tip = (r.center().x + r.width() * 0.28, r.center().y - 3.0);
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &Line::new(tip, (tip.0 - 4.0, tip.1 - 3.0)));
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &Line::new(tip, (tip.0 + 3.0, tip.1 - 4.0)));
}

fn draw_thumb_icon(scene: &mut Scene, theme: &ThemeTokens, r: Rect, up: bool) {
    let c = theme.palette.text_secondary.color();
    let cx = r.center().x;
    let cy = r.center().y;
    let s = r.width() * 0.22;
    let dir = if up { -1.0 } else { 1.0 };
    let palm = Rect::new(cx - s, cy - s * 0.4 * dir, cx + s, cy + s * 0.8 * dir);
    let palm = Rect::new(
        palm.x0,
        palm.y0.min(palm.y1),
        palm.x1,
        palm.y0.max(palm.y1),
    );
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &RoundedRect::from_rect(palm, 2.0));
    let thumb_tip = Line::new((cx - s, cy - s * 0.4 * dir), (cx - s * 0.3, cy - s * 1.1 * dir));
    scene.stroke(&Stroke::new(1.5), Affine::IDENTITY, c, None, &thumb_tip);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::model::search_time_for;

    #[test]
    fn view_borrows_compose() {
        // The view struct should be constructible straight from the mock
        // corpus and the reveal output without cloning.
        let summary = mock::summary();
        let results = mock::results();
        let bar = SearchBarState {
            query: "ai trends".into(),
            ..SearchBarState::default()
        };
        let view = ResultsView {
            bar: &bar,
            summary: &summary,
            revealed: &summary.text,
            loading: false,
            pulse: 0.0,
            results: &results,
            search_time: search_time_for("ai trends"),
            follow_up_input: "",
            follow_up_focused: false,
            search_focused: false,
            caret_on: false,
            copy_tip: None,
            feedback_tip: None,
            follow_up_tip: None,
        };
        assert_eq!(view.results.len(), 3);
        assert!(view.search_time >= 0.10);
    }
}
