//! WASM bridge for the signature pad — binds the Rust drawing surface to a
//! browser `<canvas>`.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM
//! listeners and forwards them here:
//!
//! | DOM event | Call |
//! |-----------|------|
//! | `pointerdown` / `touchstart` | `handle_pointer_down` |
//! | `pointermove` / `touchmove` | `handle_pointer_move` |
//! | `pointerup` / `touchend` | `handle_pointer_up` |
//! | `pointerleave` | `handle_pointer_leave` |
//! | `resize` | `resize` |
//! | `requestAnimationFrame` | `render` |
//!
//! Pointer handlers return `true` when the page must call
//! `preventDefault()` on the event.

pub mod console;
mod download;

use sigpad_core::{CanvasSize, Point, SurfaceConfig, Vec2, Viewport, to_canvas_local};
use sigpad_editor::{DrawingSurface, EventOutcome, InputEvent, PointerKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// The main WASM-facing signature pad controller.
///
/// Holds the drawing surface and the canvas element it is mounted on. All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct SignaturePad {
    surface: DrawingSurface,
    canvas: Option<HtmlCanvasElement>,
    /// Raster changed since the last blit.
    dirty: bool,
}

#[wasm_bindgen]
impl SignaturePad {
    /// Create a controller from a JSON configuration (`""` for defaults).
    /// An invalid configuration is logged and replaced by the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        // Set up panic hook for better error messages in console
        console::console_error_panic_hook_setup();
        console::init(log::LevelFilter::Warn);

        let mut config = match SurfaceConfig::from_json(config_json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default configuration");
                SurfaceConfig::default()
            }
        };
        if config.spray_seed.is_none() {
            config.spray_seed = Some(host_seed());
        }
        let size = window_viewport().unwrap_or_default().canvas_size(&config);

        Self {
            surface: DrawingSurface::new(config, size),
            canvas: None,
            dirty: true,
        }
    }

    /// Mount onto a canvas element: size it to the window and paint.
    pub fn attach(&mut self, canvas: HtmlCanvasElement) {
        self.canvas = Some(canvas);
        self.apply_background();
        match window_viewport() {
            Some(viewport) => self.resize(viewport.width, viewport.height),
            None => self.sync_canvas_size(),
        }
    }

    /// Unmount. Further drawing calls no-op until `attach` is called again.
    pub fn detach(&mut self) {
        self.canvas = None;
    }

    /// Window resized: recompute the canvas size. Drawn content is lost.
    pub fn resize(&mut self, inner_width: f64, inner_height: f64) {
        self.surface.resize_to_viewport(Viewport {
            width: inner_width,
            height: inner_height,
        });
        self.sync_canvas_size();
        self.dirty = true;
    }

    /// Blit the raster if anything changed. Call once per animation frame;
    /// outstanding undo/redo repaints land here. Returns `true` if painted.
    pub fn render(&mut self) -> bool {
        if self.surface.flush_repaints() {
            self.dirty = true;
        }
        if !self.dirty {
            return false;
        }
        let Some(ctx) = self.context() else {
            return false;
        };
        let raster = self.surface.raster();
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(raster.as_bytes()),
            raster.width(),
            raster.height(),
        );
        match image.and_then(|image| ctx.put_image_data(&image, 0.0, 0.0)) {
            Ok(()) => {
                self.dirty = false;
                true
            }
            Err(e) => {
                log::error!("blit failed: {e:?}");
                false
            }
        }
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Returns `true` if the page should call `preventDefault()`.
    pub fn handle_pointer_down(&mut self, client_x: f64, client_y: f64, pointer_type: &str) -> bool {
        let Some(local) = self.to_local(client_x, client_y) else {
            return false;
        };
        let kind = PointerKind::from_dom(pointer_type);
        self.dispatch(InputEvent::from_pointer_down(local.x, local.y, kind))
    }

    /// Returns `true` if the page should call `preventDefault()`.
    pub fn handle_pointer_move(&mut self, client_x: f64, client_y: f64, pointer_type: &str) -> bool {
        let Some(local) = self.to_local(client_x, client_y) else {
            return false;
        };
        let kind = PointerKind::from_dom(pointer_type);
        self.dispatch(InputEvent::from_pointer_move(local.x, local.y, kind))
    }

    /// Returns `true` if the page should call `preventDefault()`.
    pub fn handle_pointer_up(&mut self, pointer_type: &str) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        let kind = PointerKind::from_dom(pointer_type);
        self.dispatch(InputEvent::from_pointer_up(kind))
    }

    /// Returns `true` if the page should call `preventDefault()`.
    pub fn handle_pointer_leave(&mut self, pointer_type: &str) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        let kind = PointerKind::from_dom(pointer_type);
        self.dispatch(InputEvent::from_pointer_leave(kind))
    }

    pub fn is_drawing(&self) -> bool {
        self.surface.is_drawing()
    }

    // ─── History / clear / export ────────────────────────────────────────

    /// Undo the last stroke (or clear).
    pub fn undo(&mut self) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        let stepped = self.surface.undo();
        self.dirty |= stepped;
        stepped
    }

    /// Redo the last undone stroke (or clear).
    pub fn redo(&mut self) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        let stepped = self.surface.redo();
        self.dirty |= stepped;
        stepped
    }

    pub fn can_undo(&self) -> bool {
        self.surface.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.surface.can_redo()
    }

    /// Erase the canvas.
    pub fn clear(&mut self) {
        if self.canvas.is_none() {
            return;
        }
        self.surface.clear();
        self.dirty = true;
    }

    /// Whether anything has been drawn on the visible content.
    pub fn has_ink(&self) -> bool {
        self.surface.has_ink()
    }

    /// Download the drawing as PNG. Returns `true` if a download started;
    /// otherwise a notice explains why.
    pub fn download(&mut self) -> bool {
        if self.canvas.is_none() {
            return false;
        }
        let Some(export) = self.surface.export() else {
            return false;
        };
        self.dirty = true;
        match download::trigger_download(&export) {
            Ok(()) => true,
            Err(e) => {
                log::error!("download failed: {e:?}");
                false
            }
        }
    }

    // ─── Settings ────────────────────────────────────────────────────────

    /// Set the stroke color from the swatch selector. Returns `false` if the
    /// color could not be parsed.
    pub fn set_stroke_color(&mut self, color: &str) -> bool {
        report(self.surface.set_stroke_color(color))
    }

    /// Set the stroke width from the slider's text value.
    pub fn set_stroke_width(&mut self, value: &str) -> bool {
        report(self.surface.set_stroke_width(value))
    }

    /// Set the background color. Applied as the canvas element's CSS
    /// background; the raster is not touched.
    pub fn set_background_color(&mut self, color: &str) -> bool {
        let ok = report(self.surface.set_background_color(color));
        if ok {
            self.apply_background();
        }
        ok
    }

    /// Set the brush: `brush`, `spray`, `dotted`, `circle`, `square` or
    /// `rectangle`.
    pub fn set_brush(&mut self, name: &str) -> bool {
        report(self.surface.set_brush(name))
    }

    /// Current drawing settings as JSON:
    /// `{"strokeColor":"#000000","strokeWidth":4,"backgroundColor":"#ffffff","brush":"brush"}`
    pub fn get_draw_config(&self) -> String {
        serde_json::to_string(&self.surface.draw_config()).unwrap_or_else(|e| {
            log::error!("draw config serialization failed: {e}");
            "{}".to_string()
        })
    }

    /// Drain pending toast messages as JSON:
    /// `[{"level":"success","message":"Undo successful"}]`
    pub fn take_notices(&mut self) -> String {
        let notices = self.surface.sink_mut().drain();
        serde_json::to_string(&notices).unwrap_or_else(|e| {
            log::error!("notice serialization failed: {e}");
            "[]".to_string()
        })
    }

    /// Adjust console log verbosity (`"off"`, `"error"` … `"trace"`).
    pub fn set_log_level(&self, level: &str) {
        console::init(console::parse_level(level));
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl SignaturePad {
    fn dispatch(&mut self, event: InputEvent) -> bool {
        let EventOutcome {
            changed,
            prevent_default,
        } = self.surface.handle(&event);
        self.dirty |= changed;
        prevent_default
    }

    /// Client coordinates → canvas-local, or `None` when not mounted.
    fn to_local(&self, client_x: f64, client_y: f64) -> Option<Point> {
        let canvas = self.canvas.as_ref()?;
        let offset = Vec2::new(canvas.offset_left() as f64, canvas.offset_top() as f64);
        Some(to_canvas_local(Point::new(client_x, client_y), offset))
    }

    /// The 2D context, or `None` when unmounted or unavailable.
    fn context(&self) -> Option<CanvasRenderingContext2d> {
        let canvas = self.canvas.as_ref()?;
        match canvas.get_context("2d") {
            Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
            Ok(None) => {
                log::debug!("canvas has no 2d context");
                None
            }
            Err(e) => {
                log::debug!("getContext failed: {e:?}");
                None
            }
        }
    }

    fn sync_canvas_size(&self) {
        let Some(canvas) = self.canvas.as_ref() else {
            return;
        };
        let CanvasSize { width, height } = self.surface.size();
        canvas.set_width(width);
        canvas.set_height(height);
    }

    fn apply_background(&self) {
        let Some(canvas) = self.canvas.as_ref() else {
            return;
        };
        let color = self.surface.draw_config().background_color.to_hex();
        if let Err(e) = canvas.style().set_property("background-color", &color) {
            log::warn!("could not set canvas background: {e:?}");
        }
    }
}

fn report<T>(result: sigpad_core::Result<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            log::warn!("{e}");
            false
        }
    }
}

fn window_viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport { width, height })
}

/// Spray seed from the page's `Math.random`.
fn host_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        sigpad_editor::surface::FALLBACK_SPRAY_SEED
    }
}
