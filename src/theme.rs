//! Design tokens for the glint-search visual system.
//!
//! All visual constants (palette, type scale, spacing, animation timing) are
//! gathered into a single `ThemeTokens` struct that can be serialized to/from
//! TOML. A partial `theme.toml` in the config directory overrides individual
//! values; everything else keeps its default.
//!
//! The reveal duration and chunk threshold live here too: they are
//! presentation tuning constants, not behavior.

use std::path::Path;
use std::time::Duration;

use tracing::warn;
use vello::peniko::Color;

pub const THEME_FILE: &str = "theme.toml";

/// Root token container. Every visual constant lives here.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ThemeTokens {
    pub palette: PaletteTokens,
    pub type_scale: TypeScaleTokens,
    pub spacing: SpacingTokens,
    pub layout: LayoutTokens,
    pub reveal: RevealTokens,
    pub tooltip: TooltipTokens,
    pub motion: MotionTokens,
}

/// An sRGB color as three floats in `[0, 1]`.
#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn color(self) -> Color {
        self.with_alpha(1.0)
    }

    pub fn with_alpha(self, alpha: f64) -> Color {
        Color::new([self.r as f32, self.g as f32, self.b as f32, alpha as f32])
    }
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PaletteTokens {
    /// Brand blue: buttons, links, active pills.
    pub primary: Rgb,
    /// Washed-out brand tint: icon wells, chips, summary panel fill.
    pub primary_light: Rgb,
    /// Gradient partner for the brand color in the hero title.
    pub accent: Rgb,
    /// Page background gradient, top and bottom stops.
    pub bg_top: Rgb,
    pub bg_bottom: Rgb,
    /// Card surface and its border.
    pub surface: Rgb,
    pub border: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
    pub text_tertiary: Rgb,
    /// Dark bubble behind tooltips.
    pub tooltip_bg: Rgb,
    /// Skeleton bars in the loading state.
    pub skeleton: Rgb,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct TypeScaleTokens {
    pub base: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SpacingTokens {
    pub baseline: f64,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct LayoutTokens {
    pub margin: f64,
    pub header_height: f64,
    pub corner_radius: f64,
    pub card_padding: f64,
    pub card_gap: f64,
    /// Width of the AI summary column on the results page.
    pub summary_column: f64,
    /// Width of the history sidebar panel.
    pub sidebar_width: f64,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct RevealTokens {
    /// Total reveal animation duration.
    pub duration_ms: u64,
    /// Chunk length threshold, in characters.
    pub chunk_threshold: usize,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct TooltipTokens {
    /// Auto-dismiss delay for transient tips.
    pub dismiss_ms: u64,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MotionTokens {
    /// History sidebar slide-in/out duration.
    pub sidebar_slide_ms: u64,
    /// Mock "backend" latency before the AI card appears.
    pub loading_ms: u64,
    /// One full cycle of the loading-skeleton pulse.
    pub skeleton_pulse_ms: u64,
    /// Text caret blink period.
    pub cursor_blink_ms: u64,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            palette: PaletteTokens::default(),
            type_scale: TypeScaleTokens::default(),
            spacing: SpacingTokens::default(),
            layout: LayoutTokens::default(),
            reveal: RevealTokens::default(),
            tooltip: TooltipTokens::default(),
            motion: MotionTokens::default(),
        }
    }
}

impl Default for PaletteTokens {
    fn default() -> Self {
        Self {
            primary: Rgb::new(0.247, 0.404, 0.875),
            primary_light: Rgb::new(0.898, 0.925, 0.992),
            accent: Rgb::new(0.486, 0.302, 0.875),
            bg_top: Rgb::new(0.949, 0.961, 0.996),
            bg_bottom: Rgb::new(1.0, 1.0, 1.0),
            surface: Rgb::new(1.0, 1.0, 1.0),
            border: Rgb::new(0.886, 0.894, 0.918),
            text_primary: Rgb::new(0.122, 0.137, 0.169),
            text_secondary: Rgb::new(0.357, 0.384, 0.435),
            text_tertiary: Rgb::new(0.573, 0.596, 0.639),
            tooltip_bg: Rgb::new(0.122, 0.137, 0.169),
            skeleton: Rgb::new(0.898, 0.906, 0.925),
        }
    }
}

impl Default for TypeScaleTokens {
    fn default() -> Self {
        Self {
            base: 16.0,
            ratio: 1.25,
        }
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self { baseline: 24.0 }
    }
}

impl Default for LayoutTokens {
    fn default() -> Self {
        Self {
            margin: 24.0,
            header_height: 56.0,
            corner_radius: 12.0,
            card_padding: 20.0,
            card_gap: 16.0,
            summary_column: 600.0,
            sidebar_width: 384.0,
        }
    }
}

impl Default for RevealTokens {
    fn default() -> Self {
        Self {
            duration_ms: 1500,
            chunk_threshold: 60,
        }
    }
}

impl Default for TooltipTokens {
    fn default() -> Self {
        Self { dismiss_ms: 2000 }
    }
}

impl Default for MotionTokens {
    fn default() -> Self {
        Self {
            sidebar_slide_ms: 500,
            loading_ms: 1000,
            skeleton_pulse_ms: 1600,
            cursor_blink_ms: 500,
        }
    }
}

// ---------------------------------------------------------------------------
// Helper methods
// ---------------------------------------------------------------------------

impl ThemeTokens {
    /// Compute a type size from the modular scale.
    ///
    /// `step = 0` returns `base`, `step = 1` returns `base * ratio`, etc.
    pub fn type_size(&self, step: i32) -> f64 {
        self.type_scale.base * self.type_scale.ratio.powi(step)
    }

    /// Spacing helper: returns `baseline * multiple`.
    pub fn space(&self, multiple: f64) -> f64 {
        self.spacing.baseline * multiple
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal.duration_ms)
    }

    pub fn tooltip_ttl(&self) -> Duration {
        Duration::from_millis(self.tooltip.dismiss_ms)
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.motion.loading_ms)
    }

    pub fn sidebar_slide(&self) -> Duration {
        Duration::from_millis(self.motion.sidebar_slide_ms)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialize from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load `theme.toml` from the config directory.
    ///
    /// A missing file is normal (defaults apply). A malformed file is
    /// reported and ignored rather than aborting startup.
    pub fn load_or_default(config_dir: &Path) -> Self {
        let path = config_dir.join(THEME_FILE);
        match std::fs::read_to_string(&path) {
            Ok(text) => match Self::from_toml(&text) {
                Ok(tokens) => tokens,
                Err(e) => {
                    warn!("ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_constants() {
        let t = ThemeTokens::default();
        assert_eq!(t.reveal.duration_ms, 1500);
        assert_eq!(t.reveal.chunk_threshold, 60);
        assert_eq!(t.tooltip.dismiss_ms, 2000);
        assert_eq!(t.motion.loading_ms, 1000);
        assert_eq!(t.motion.sidebar_slide_ms, 500);
        assert!((t.type_scale.base - 16.0).abs() < f64::EPSILON);
        assert!((t.layout.summary_column - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn toml_roundtrip() {
        let original = ThemeTokens::default();
        let toml_str = original.to_toml();
        let parsed = ThemeTokens::from_toml(&toml_str).expect("roundtrip parse failed");

        assert_eq!(parsed.reveal.duration_ms, original.reveal.duration_ms);
        assert_eq!(parsed.reveal.chunk_threshold, original.reveal.chunk_threshold);
        assert!((parsed.palette.primary.r - original.palette.primary.r).abs() < f64::EPSILON);
        assert!((parsed.type_scale.ratio - original.type_scale.ratio).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_overrides() {
        let partial = r#"
[reveal]
duration_ms = 800

[palette.primary]
r = 0.1
g = 0.2
b = 0.3
"#;
        let tokens = ThemeTokens::from_toml(partial).expect("partial parse failed");
        assert_eq!(tokens.reveal.duration_ms, 800);
        assert!((tokens.palette.primary.g - 0.2).abs() < f64::EPSILON);
        // Everything else keeps defaults.
        assert_eq!(tokens.reveal.chunk_threshold, 60);
        assert_eq!(tokens.tooltip.dismiss_ms, 2000);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(ThemeTokens::from_toml("this is not [[ valid toml").is_err());
    }

    #[test]
    fn type_size_scale() {
        let t = ThemeTokens::default();
        assert!((t.type_size(0) - 16.0).abs() < f64::EPSILON);
        assert!((t.type_size(1) - 20.0).abs() < 1e-9);
        assert!((t.type_size(-1) - 12.8).abs() < 1e-9);
    }
}
