//! Encoded raster captures used by undo/redo and export.

use crate::error::{Result, SurfaceError};
use crate::raster::Raster;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use std::sync::Arc;

/// A full PNG capture of the raster at one point in time.
///
/// Cloning shares the encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
    width: u32,
    height: u32,
    /// Whether the captured content contains user ink.
    inked: bool,
}

impl Snapshot {
    pub fn capture(raster: &Raster, inked: bool) -> Result<Self> {
        let png = encode_png(raster)?;
        Ok(Self {
            png: png.into(),
            width: raster.width(),
            height: raster.height(),
            inked,
        })
    }

    /// Decode back into pixels. This is the slow half of a repaint.
    pub fn decode(&self) -> Result<Raster> {
        decode_png(&self.png)
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn inked(&self) -> bool {
        self.inked
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            raster.as_bytes(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(SurfaceError::Encode)?;
    log::trace!(
        "encoded {}x{} raster into {} PNG bytes",
        raster.width(),
        raster.height(),
        out.len()
    );
    Ok(out)
}

pub fn decode_png(bytes: &[u8]) -> Result<Raster> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(SurfaceError::Decode)?;
    Ok(Raster::from_image(image.into_rgba8()))
}
