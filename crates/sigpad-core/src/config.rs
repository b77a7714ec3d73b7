//! Widget configuration and the user-adjustable drawing settings.
//!
//! `SurfaceConfig` is fixed for the life of a mounted widget and is handed to
//! the WASM constructor as JSON. `DrawConfig` is what the sibling controls
//! (swatch, slider, brush picker, background picker) read and write.

use crate::brush::BrushKind;
use crate::color::Color;
use crate::error::{Result, SurfaceError};
use serde::{Deserialize, Serialize};
use winnow::ascii::digit1;
use winnow::combinator::opt;
use winnow::prelude::*;

// ─── Config ───────────────────────────────────────────────────────────────

/// Static configuration for a drawing surface.
///
/// Every field has a default, so `{}` (or an empty string handed to
/// `from_json`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
    /// Canvas width as a fraction of the window's inner width. Default: **0.92**.
    pub width_fraction: f64,
    /// Canvas height as a fraction of the window's inner height. Default: **0.7**.
    pub height_fraction: f64,
    pub min_stroke_width: u32,
    pub max_stroke_width: u32,
    pub default_stroke_width: u32,
    pub default_stroke_color: Color,
    pub default_background_color: Color,
    /// Undo entries kept before the oldest is dropped.
    pub max_history: usize,
    pub spray_density: usize,
    pub spray_radius: f64,
    /// Seed for the spray brush. `None` means the host picks one.
    pub spray_seed: Option<u64>,
    /// Composite ink over the background color on export.
    pub flatten_background: bool,
    pub export_file_name: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.92,
            height_fraction: 0.7,
            min_stroke_width: 1,
            max_stroke_width: 80,
            default_stroke_width: 4,
            default_stroke_color: Color::BLACK,
            default_background_color: Color::WHITE,
            max_history: 200,
            spray_density: 50,
            spray_radius: 10.0,
            spray_seed: None,
            flatten_background: false,
            export_file_name: "signature.png".to_string(),
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a JSON configuration. Blank input yields defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the surface cannot work with.
    pub fn validate(&self) -> Result<()> {
        let fraction_ok = |f: f64| f > 0.0 && f <= 1.0;
        if !fraction_ok(self.width_fraction) || !fraction_ok(self.height_fraction) {
            return Err(SurfaceError::InvalidConfig(format!(
                "viewport fractions must be in (0, 1], got {} x {}",
                self.width_fraction, self.height_fraction
            )));
        }
        if self.min_stroke_width == 0 || self.min_stroke_width > self.max_stroke_width {
            return Err(SurfaceError::InvalidConfig(format!(
                "stroke width range {}..={} is empty",
                self.min_stroke_width, self.max_stroke_width
            )));
        }
        if self.max_history == 0 {
            return Err(SurfaceError::InvalidConfig(
                "maxHistory must be at least 1".to_string(),
            ));
        }
        if !self.spray_radius.is_finite() || self.spray_radius < 0.0 {
            return Err(SurfaceError::InvalidConfig(format!(
                "sprayRadius must be a non-negative number, got {}",
                self.spray_radius
            )));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(SurfaceError::InvalidConfig(
                "exportFileName must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn stroke_width(&self, value: i64) -> StrokeWidth {
        StrokeWidth::clamped(value, self.min_stroke_width, self.max_stroke_width)
    }

    /// Initial drawing settings for a freshly mounted surface.
    pub fn initial_draw_config(&self) -> DrawConfig {
        DrawConfig {
            stroke_color: self.default_stroke_color,
            stroke_width: self.stroke_width(self.default_stroke_width as i64),
            background_color: self.default_background_color,
            brush: BrushKind::default(),
        }
    }
}

// ─── Stroke width ─────────────────────────────────────────────────────────

/// Stroke width in device pixels, always within the configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeWidth(u32);

impl StrokeWidth {
    pub fn clamped(value: i64, min: u32, max: u32) -> Self {
        Self(value.clamp(min as i64, max as i64) as u32)
    }

    /// Parse a range-slider value the way `parseInt` reads it: leading
    /// whitespace, optional sign, then digits; anything after is ignored.
    pub fn parse_slider(text: &str, min: u32, max: u32) -> Result<Self> {
        let mut input = text.trim_start();
        let value = parse_leading_int
            .parse_next(&mut input)
            .map_err(|_| SurfaceError::InvalidStrokeWidth(text.to_string()))?;
        Ok(Self::clamped(value, min, max))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

fn parse_leading_int(input: &mut &str) -> ModalResult<i64> {
    (opt('-'), digit1)
        .map(|(sign, digits): (Option<char>, &str)| {
            // Overlong digit runs saturate.
            let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
            if sign.is_some() { -magnitude } else { magnitude }
        })
        .parse_next(input)
}

// ─── Draw config ──────────────────────────────────────────────────────────

/// Drawing settings shared with the sibling controls.
///
/// Changes take effect on the next stroke; ink already on the canvas is
/// never recolored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawConfig {
    pub stroke_color: Color,
    pub stroke_width: StrokeWidth,
    pub background_color: Color,
    pub brush: BrushKind,
}
