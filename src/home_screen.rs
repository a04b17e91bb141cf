//! Home page: header with quick links, hero, the large search bar, and the
//! trending-topics section.

use std::time::Instant;

use vello::Scene;
use vello::kurbo::{Affine, Line, Rect, RoundedRect, Stroke};
use vello::peniko::{Fill, Gradient};

use crate::hit::{Action, HitMap};
use crate::model::{HotTopic, QuickLink};
use crate::search_bar::{self, BarSize, SearchBarState};
use crate::text::{self, Fonts};
use crate::theme::ThemeTokens;

/// How many topic cards the collapsed grid shows.
pub const COLLAPSED_TOPICS: usize = 4;

/// Everything the home page needs to draw one frame.
pub struct HomeView<'a> {
    pub bar: &'a SearchBarState,
    pub suggestions: &'a [String],
    pub topics: &'a [HotTopic],
    pub categories: &'a [String],
    pub selected_category: Option<usize>,
    pub show_all_topics: bool,
    pub quick_links: &'a [QuickLink],
    pub search_focused: bool,
    pub caret_on: bool,
}

/// Topics that pass the active category filter, clamped to the grid size.
pub fn visible_topics<'a>(
    topics: &'a [HotTopic],
    categories: &[String],
    selected: Option<usize>,
    show_all: bool,
) -> Vec<&'a HotTopic> {
    let limit = if show_all { topics.len() } else { COLLAPSED_TOPICS };
    topics
        .iter()
        .filter(|t| match selected {
            Some(i) => categories.get(i).is_some_and(|c| *c == t.category),
            None => true,
        })
        .take(limit)
        .collect()
}

/// Distinct categories in first-seen order.
pub fn category_list(topics: &[HotTopic]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in topics {
        if !out.contains(&t.category) {
            out.push(t.category.clone());
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
pub fn render(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    view: &HomeView<'_>,
    width: f64,
    height: f64,
    now: Instant,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();

    // Page background: soft vertical gradient.
    let bg = Gradient::new_linear((0.0, 0.0), (0.0, height))
        .with_stops([p.bg_top.color(), p.bg_bottom.color()]);
    scene.fill(Fill::NonZero, Affine::IDENTITY, &bg, None, &Rect::new(0.0, 0.0, width, height));

    render_header(scene, fonts, theme, hits, view.quick_links, width);

    // Hero.
    let center = width / 2.0;
    let hero_y = height * 0.22;
    text::draw_centered(
        scene,
        font,
        center,
        hero_y,
        "Glint Search",
        p.primary.color(),
        theme.type_size(4) as f32,
    );
    let underline_w = 120.0;
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        &Gradient::new_linear((center - underline_w / 2.0, 0.0), (center + underline_w / 2.0, 0.0))
            .with_stops([p.primary.color(), p.accent.color()]),
        None,
        &RoundedRect::new(center - underline_w / 2.0, hero_y + 12.0, center + underline_w / 2.0, hero_y + 16.0, 2.0),
    );
    text::draw_centered(
        scene,
        font,
        center,
        hero_y + 44.0,
        "Ask anything, get an answer that writes itself",
        p.text_secondary.color(),
        theme.type_scale.base as f32,
    );

    // Topics paint first so the search bar's suggestion dropdown can overlap
    // them, both visually and in the hit map.
    let bar_w = (width * 0.55).clamp(480.0, 680.0).min(width - 2.0 * theme.layout.margin);
    let bar_y = hero_y + 80.0;
    render_topics(scene, fonts, theme, hits, view, width, bar_y + 120.0, height);

    search_bar::render(
        scene,
        fonts,
        theme,
        hits,
        view.bar,
        view.suggestions,
        center - bar_w / 2.0,
        bar_y,
        bar_w,
        BarSize::Large,
        view.search_focused,
        view.caret_on,
        now,
    );

    // Footer.
    text::draw_centered(
        scene,
        font,
        center,
        height - 24.0,
        "Glint Search demo · all data is mocked locally",
        p.text_tertiary.color(),
        theme.type_size(-1) as f32,
    );
}

fn render_header(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    quick_links: &[QuickLink],
    width: f64,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();
    let h = theme.layout.header_height;
    let margin = theme.layout.margin;

    // Menu (hamburger) button opens the history sidebar.
    let menu = Rect::new(margin, h / 2.0 - 16.0, margin + 32.0, h / 2.0 + 16.0);
    let stroke = Stroke::new(2.0);
    for i in 0..3 {
        let y = menu.y0 + 10.0 + 6.0 * i as f64;
        scene.stroke(
            &stroke,
            Affine::IDENTITY,
            p.text_secondary.color(),
            None,
            &Line::new((menu.x0 + 6.0, y), (menu.x1 - 6.0, y)),
        );
    }
    hits.push(menu, Action::OpenHistory);

    // Quick-links pills, centered.
    let size = theme.type_size(-1) as f32;
    let pill_h = 28.0;
    let gap = 10.0;
    let widths: Vec<f64> = quick_links
        .iter()
        .map(|l| text::measure(font, l.title, size) + 24.0)
        .collect();
    let total: f64 = widths.iter().sum::<f64>() + gap * (widths.len().saturating_sub(1)) as f64;
    let mut x = width / 2.0 - total / 2.0;
    for (i, (link, w)) in quick_links.iter().zip(&widths).enumerate() {
        let pill = RoundedRect::new(x, h / 2.0 - pill_h / 2.0, x + w, h / 2.0 + pill_h / 2.0, pill_h / 2.0);
        scene.fill(Fill::NonZero, Affine::IDENTITY, p.surface.with_alpha(0.8), None, &pill);
        scene.stroke(&Stroke::new(1.0), Affine::IDENTITY, p.border.color(), None, &pill);
        text::draw_centered(
            scene,
            font,
            x + w / 2.0,
            h / 2.0 + size as f64 * 0.35,
            link.title,
            p.text_secondary.color(),
            size,
        );
        hits.push(pill.rect(), Action::QuickLink(i));
        x += w + gap;
    }

    // Inert Login / Settings labels on the right.
    let mut right = width - margin;
    for label in ["Settings", "Login"] {
        let w = text::measure(font, label, size);
        right -= w;
        text::draw(scene, font, right, h / 2.0 + size as f64 * 0.35, label, p.text_secondary.color(), size);
        right -= 20.0;
    }
}

#[allow(clippy::too_many_arguments)]
fn render_topics(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    hits: &mut HitMap,
    view: &HomeView<'_>,
    width: f64,
    top: f64,
    height: f64,
) {
    let p = &theme.palette;
    let font = fonts.ui.as_ref();
    let section_w = (width * 0.62).clamp(560.0, 820.0).min(width - 2.0 * theme.layout.margin);
    let left = width / 2.0 - section_w / 2.0;

    text::draw(
        scene,
        font,
        left,
        top,
        "Trending",
        p.text_primary.color(),
        theme.type_size(2) as f32,
    );

    // Show-all / collapse toggle on the right of the section title.
    let toggle_label = if view.show_all_topics { "Collapse" } else { "Show all" };
    let toggle_size = theme.type_size(-1) as f32;
    let toggle_w = text::measure(font, toggle_label, toggle_size);
    let toggle = Rect::new(left + section_w - toggle_w - 8.0, top - 16.0, left + section_w + 8.0, top + 6.0);
    text::draw(
        scene,
        font,
        toggle.x0 + 8.0,
        top,
        toggle_label,
        p.primary.color(),
        toggle_size,
    );
    hits.push(toggle, Action::ToggleAllTopics);

    // Category pills: "All" plus every distinct category.
    let pill_size = theme.type_size(-1) as f32;
    let pill_h = 30.0;
    let pill_y = top + 20.0;
    let mut x = left;
    let all_and_categories =
        std::iter::once(("All", None)).chain(view.categories.iter().enumerate().map(|(i, c)| (c.as_str(), Some(i))));
    for (label, index) in all_and_categories {
        let w = text::measure(font, label, pill_size) + 28.0;
        if x + w > left + section_w {
            break;
        }
        let pill = RoundedRect::new(x, pill_y, x + w, pill_y + pill_h, pill_h / 2.0);
        let active = view.selected_category == index;
        if active {
            scene.fill(Fill::NonZero, Affine::IDENTITY, p.primary.color(), None, &pill);
        } else {
            scene.fill(Fill::NonZero, Affine::IDENTITY, p.surface.color(), None, &pill);
            scene.stroke(&Stroke::new(1.0), Affine::IDENTITY, p.border.color(), None, &pill);
        }
        text::draw_centered(
            scene,
            font,
            x + w / 2.0,
            pill_y + pill_h / 2.0 + pill_size as f64 * 0.35,
            label,
            if active { p.surface.color() } else { p.text_secondary.color() },
            pill_size,
        );
        hits.push(pill.rect(), Action::CategoryPill(index));
        x += w + 10.0;
    }

    // Two-column card grid.
    let shown = visible_topics(view.topics, view.categories, view.selected_category, view.show_all_topics);
    let gap = theme.layout.card_gap;
    let card_w = (section_w - gap) / 2.0;
    let card_h = 92.0;
    let grid_top = pill_y + pill_h + 16.0;
    for (slot, topic) in shown.iter().enumerate() {
        let col = slot % 2;
        let row = slot / 2;
        let cx = left + col as f64 * (card_w + gap);
        let cy = grid_top + row as f64 * (card_h + gap);
        if cy + card_h > height - 48.0 {
            break;
        }
        render_topic_card(scene, fonts, theme, topic, slot, cx, cy, card_w, card_h);
        // The hit index is the topic's position in the full list so the
        // click handler resolves the right title after filtering.
        let full_index = view.topics.iter().position(|t| t.id == topic.id).unwrap_or(slot);
        hits.push(Rect::new(cx, cy, cx + card_w, cy + card_h), Action::TopicCard(full_index));
    }
}

#[allow(clippy::too_many_arguments)]
fn render_topic_card(
    scene: &mut Scene,
    fonts: &Fonts,
    theme: &ThemeTokens,
    topic: &HotTopic,
    rank: usize,
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

    let pad = theme.layout.card_padding;
    let rank_size = theme.type_size(1) as f32;
    // Top three ranks get the brand color, like a hot list.
    let rank_color = if rank < 3 { p.primary.color() } else { p.text_tertiary.color() };
    text::draw(scene, font, x + pad, y + pad + 8.0, &format!("{}", rank + 1), rank_color, rank_size);

    let body_x = x + pad + 28.0;
    let title = text::truncate_to_width(font, &topic.title, theme.type_scale.base as f32, w - pad * 2.0 - 28.0);
    text::draw(scene, font, body_x, y + pad + 6.0, &title, p.text_primary.color(), theme.type_scale.base as f32);

    let meta = format!("{} · {} reads", topic.category, topic.heat);
    text::draw(
        scene,
        font,
        body_x,
        y + pad + 26.0,
        &meta,
        p.text_tertiary.color(),
        theme.type_size(-1) as f32,
    );

    let desc = text::truncate_to_width(
        font,
        &topic.description,
        theme.type_size(-1) as f32,
        w - pad * 2.0 - 28.0,
    );
    text::draw(
        scene,
        font,
        body_x,
        y + pad + 46.0,
        &desc,
        p.text_secondary.color(),
        theme.type_size(-1) as f32,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let topics = mock::hot_topics();
        let cats = category_list(&topics);
        assert_eq!(cats.first().map(String::as_str), Some("Tech"));
        let mut dedup = cats.clone();
        dedup.dedup();
        assert_eq!(cats, dedup);
        // "Tech" appears twice in the corpus but once in the list.
        assert_eq!(cats.iter().filter(|c| *c == "Tech").count(), 1);
    }

    #[test]
    fn collapsed_grid_shows_four_cards() {
        let topics = mock::hot_topics();
        let cats = category_list(&topics);
        assert_eq!(visible_topics(&topics, &cats, None, false).len(), COLLAPSED_TOPICS);
        assert_eq!(visible_topics(&topics, &cats, None, true).len(), topics.len());
    }

    #[test]
    fn category_filter_limits_topics() {
        let topics = mock::hot_topics();
        let cats = category_list(&topics);
        let tech = cats.iter().position(|c| c == "Tech").map(Some).unwrap_or(None);
        let shown = visible_topics(&topics, &cats, tech, true);
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|t| t.category == "Tech"));
    }
}
