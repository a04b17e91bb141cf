//! Text rendering via vello `draw_glyphs` with skrifa metrics.
//!
//! Layout is advance-width based (no shaping/kerning): characters are mapped
//! to glyph ids and positioned sequentially, with word wrapping against a
//! width budget. Good enough for UI chrome and body copy in a demo.
//!
//! If no system font can be found, drawing degrades to ghost rule-lines of
//! the measured width so the layout remains inspectable.

use std::sync::Once;

use skrifa::MetadataProvider;
use vello::kurbo::{Affine, Rect};
use vello::peniko::{Color, Fill, FontData};
use vello::{Glyph, Scene};

/// Fonts loaded once at startup.
pub struct Fonts {
    pub ui: Option<FontData>,
}

impl Fonts {
    /// Load the best available UI font.
    /// Font stack: Helvetica > Arial > DejaVu Sans > Liberation Sans.
    pub fn load() -> Self {
        let ui = load_system_font(&[
            "Helvetica",
            "Arial",
            "DejaVuSans",
            "LiberationSans-Regular",
        ]);
        if ui.is_none() {
            static WARN_ONCE: Once = Once::new();
            WARN_ONCE.call_once(|| {
                tracing::warn!("no system font found; text renders as placeholder rules");
            });
        }
        Self { ui }
    }
}

/// Try to load a font from common system paths.
fn load_system_font(font_names: &[&str]) -> Option<FontData> {
    let dirs = [
        "/System/Library/Fonts/",
        "/System/Library/Fonts/Supplemental/",
        "/Library/Fonts/",
        "/usr/share/fonts/truetype/dejavu/",
        "/usr/share/fonts/truetype/",
        "/usr/share/fonts/opentype/",
    ];
    let extensions = ["ttf", "otf", "ttc"];

    for name in font_names {
        for dir in &dirs {
            for ext in &extensions {
                let path = format!("{dir}{name}.{ext}");
                if let Ok(data) = std::fs::read(&path) {
                    return Some(FontData::new(data.into(), 0));
                }
            }
        }
    }
    None
}

/// Width of `text` at `size`, in pixels.
pub fn measure(font: Option<&FontData>, text: &str, size: f32) -> f64 {
    match font {
        Some(font) => shaped_width(font, text, size),
        None => text.chars().count() as f64 * size as f64 * 0.52,
    }
}

/// Draw a single line with its left edge at `x` and baseline at `baseline`.
pub fn draw(
    scene: &mut Scene,
    font: Option<&FontData>,
    x: f64,
    baseline: f64,
    text: &str,
    color: Color,
    size: f32,
) {
    if text.is_empty() {
        return;
    }
    let Some(font) = font else {
        draw_placeholder(scene, x, baseline, measure(None, text, size), size, color);
        return;
    };

    let glyphs = shape_run(font, text, size, x, baseline);
    if glyphs.is_empty() {
        return;
    }
    scene
        .draw_glyphs(font)
        .font_size(size)
        .brush(&color)
        .draw(Fill::NonZero, glyphs.into_iter());
}

/// Draw a single line centered on `center_x`.
pub fn draw_centered(
    scene: &mut Scene,
    font: Option<&FontData>,
    center_x: f64,
    baseline: f64,
    text: &str,
    color: Color,
    size: f32,
) {
    let w = measure(font, text, size);
    draw(scene, font, center_x - w / 2.0, baseline, text, color, size);
}

/// Draw word-wrapped text.
///
/// The first line's baseline sits at `baseline`; each following line advances
/// by `line_height`. Paragraph breaks (`\n`) are honored. With
/// `max_lines = Some(n)` the text is clamped to `n` lines and the final line
/// is ellipsized. Returns the baseline y for the line *after* the last one
/// drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw_wrapped(
    scene: &mut Scene,
    font: Option<&FontData>,
    x: f64,
    baseline: f64,
    max_width: f64,
    line_height: f64,
    max_lines: Option<usize>,
    text: &str,
    color: Color,
    size: f32,
) -> f64 {
    let lines = wrap_lines(font, text, size, max_width);
    let clamp = max_lines.unwrap_or(usize::MAX).max(1);
    let shown = lines.len().min(clamp);

    let mut y = baseline;
    for (i, line) in lines.iter().take(shown).enumerate() {
        let truncated;
        let line = if i + 1 == clamp && lines.len() > clamp {
            truncated = truncate_to_width(font, line, size, max_width);
            &truncated
        } else {
            line
        };
        draw(scene, font, x, y, line, color, size);
        y += line_height;
    }
    y
}

/// Break `text` into lines that fit `max_width`. `\n` forces a break.
pub fn wrap_lines(font: Option<&FontData>, text: &str, size: f32, max_width: f64) -> Vec<String> {
    let space_w = measure(font, " ", size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_w = 0.0_f64;
        for word in paragraph.split_whitespace() {
            let word_w = measure(font, word, size);
            let needed = if line.is_empty() { word_w } else { space_w + word_w };
            if !line.is_empty() && line_w + needed > max_width {
                lines.push(std::mem::take(&mut line));
                line_w = 0.0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_w += space_w;
            }
            line.push_str(word);
            line_w += word_w;
        }
        // An empty paragraph is a deliberate blank line.
        lines.push(line);
    }
    lines
}

/// Shorten `text` with a trailing ellipsis so it fits `max_width`.
pub fn truncate_to_width(font: Option<&FontData>, text: &str, size: f32, max_width: f64) -> String {
    if measure(font, text, size) <= max_width {
        return text.to_owned();
    }
    let ellipsis_w = measure(font, "…", size);
    let mut out = String::new();
    let mut w = 0.0_f64;
    for c in text.chars() {
        let cw = measure(font, c.encode_utf8(&mut [0u8; 4]), size);
        if w + cw + ellipsis_w > max_width {
            break;
        }
        out.push(c);
        w += cw;
    }
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Shaping internals
// ---------------------------------------------------------------------------

fn shaped_width(font: &FontData, text: &str, size: f32) -> f64 {
    let Ok(font_ref) = skrifa::FontRef::from_index(font.data.as_ref(), font.index) else {
        return text.chars().count() as f64 * size as f64 * 0.52;
    };
    let charmap = font_ref.charmap();
    let metrics = font_ref.glyph_metrics(
        skrifa::instance::Size::new(size),
        skrifa::instance::LocationRef::default(),
    );
    text.chars()
        .map(|ch| {
            let gid = charmap.map(ch).unwrap_or_default();
            metrics.advance_width(gid).unwrap_or(size * 0.5) as f64
        })
        .sum()
}

fn shape_run(font: &FontData, text: &str, size: f32, x: f64, baseline: f64) -> Vec<Glyph> {
    let Ok(font_ref) = skrifa::FontRef::from_index(font.data.as_ref(), font.index) else {
        return Vec::new();
    };
    let charmap = font_ref.charmap();
    let metrics = font_ref.glyph_metrics(
        skrifa::instance::Size::new(size),
        skrifa::instance::LocationRef::default(),
    );

    let mut glyphs = Vec::with_capacity(text.len());
    let mut pen_x = x;
    for ch in text.chars() {
        let gid = charmap.map(ch).unwrap_or_default();
        let advance = metrics.advance_width(gid).unwrap_or(size * 0.5) as f64;
        glyphs.push(Glyph {
            id: gid.to_u32(),
            x: pen_x as f32,
            y: baseline as f32,
        });
        pen_x += advance;
    }
    glyphs
}

/// Fallback when no font is available: a ghost rule where the text would be.
fn draw_placeholder(scene: &mut Scene, x: f64, baseline: f64, width: f64, size: f32, color: Color) {
    let h = (size as f64 * 0.55).max(2.0);
    let rect = Rect::new(x, baseline - h, x + width, baseline);
    let ghost = color.with_alpha(color.components[3] * 0.25);
    scene.fill(Fill::NonZero, Affine::IDENTITY, ghost, None, &rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width_budget() {
        // No font in the test environment guarantee, so use the fallback
        // estimator: every char is size * 0.52 wide.
        let lines = wrap_lines(None, "aaa bbb ccc ddd", 10.0, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(None, line, 10.0) <= 41.0, "line too wide: {line:?}");
        }
    }

    #[test]
    fn wrap_keeps_paragraph_breaks() {
        let lines = wrap_lines(None, "one\n\ntwo", 10.0, 500.0);
        assert_eq!(lines, vec!["one".to_string(), String::new(), "two".to_string()]);
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_needed() {
        let short = truncate_to_width(None, "hi", 10.0, 500.0);
        assert_eq!(short, "hi");
        let long = truncate_to_width(None, "a very long line of text", 10.0, 30.0);
        assert!(long.ends_with('…'));
        assert!(measure(None, &long, 10.0) <= 36.0);
    }
}
