//! The pixel buffer strokes are painted into.
//!
//! Straight RGBA, row-major, top-left origin. All paint operations blend
//! source-over and are clipped to the buffer bounds, so renderers can hand
//! in coordinates that fall outside the canvas.

use crate::color::Color;
use image::{Rgba, RgbaImage};

#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// A fully transparent raster. Zero dimensions are bumped to 1 px.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, suitable for `ImageData`.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Reset every channel of every pixel to zero.
    pub fn clear(&mut self) {
        self.image.fill(0);
    }

    /// `true` when every channel of every pixel is zero.
    pub fn is_blank(&self) -> bool {
        self.image.as_raw().iter().all(|&channel| channel == 0)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Some(Color::rgba(r, g, b, a))
    }

    /// Blend `color` over the pixel at integer coordinates.
    /// Returns `false` when the pixel lies outside the raster.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return false;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        *dst = Rgba(source_over(color, dst.0));
        true
    }

    /// Paint `src` at the origin, replacing whatever is underneath.
    /// Pixels of `src` beyond this raster's bounds are dropped.
    pub fn draw_at_origin(&mut self, src: &Raster) {
        let w = self.width().min(src.width());
        let h = self.height().min(src.height());
        for y in 0..h {
            for x in 0..w {
                self.image.put_pixel(x, y, *src.image.get_pixel(x, y));
            }
        }
    }

    /// A copy of this raster composited over a solid background.
    pub fn flattened_over(&self, background: Color) -> Raster {
        let mut out = RgbaImage::from_pixel(self.width(), self.height(), Rgba(background.to_array()));
        for (dst, src) in out.pixels_mut().zip(self.image.pixels()) {
            let Rgba([r, g, b, a]) = *src;
            *dst = Rgba(source_over(Color::rgba(r, g, b, a), dst.0));
        }
        Raster { image: out }
    }

    /// Number of pixels with a non-zero alpha channel.
    pub fn painted_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] != 0).count()
    }
}

/// Straight-alpha source-over compositing.
fn source_over(src: Color, dst: [u8; 4]) -> [u8; 4] {
    if src.a == 255 {
        return src.to_array();
    }
    if src.a == 0 {
        return dst;
    }
    let sa = src.a as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= f32::EPSILON {
        return [0, 0, 0, 0];
    }
    let blend = |s: u8, d: u8| {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    [
        blend(src.r, dst[0]),
        blend(src.g, dst[1]),
        blend(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}
