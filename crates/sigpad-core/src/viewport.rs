//! Window → canvas sizing.

use crate::config::SurfaceConfig;
use kurbo::{Point, Vec2};

/// The browser window's inner dimensions, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Canvas pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Size the canvas as a fraction of the window, floored, never below 1 px.
    pub fn canvas_size(&self, config: &SurfaceConfig) -> CanvasSize {
        let scale = |extent: f64, fraction: f64| {
            let px = (extent.max(0.0) * fraction).floor();
            if px.is_finite() { (px as u32).max(1) } else { 1 }
        };
        CanvasSize {
            width: scale(self.width, config.width_fraction),
            height: scale(self.height, config.height_fraction),
        }
    }
}

/// Translate client (window) coordinates into canvas-local coordinates by
/// subtracting the canvas element's on-screen offset.
pub fn to_canvas_local(client: Point, canvas_offset: Vec2) -> Point {
    client - canvas_offset
}
