//! The drawing surface: stroke lifecycle, history, clear and export.
//!
//! `DrawingSurface` owns the raster, the drawing settings and the undo/redo
//! stacks. Hosts feed it canvas-local input events and blit `raster()` to
//! the screen after anything reports a change.
//!
//! ## Stroke lifecycle
//!
//! | Event | Not drawing | Drawing |
//! |-------|-------------|---------|
//! | **Down** | start stroke if inside the canvas | ignored |
//! | **Move** | ignored | render segment with the latched brush |
//! | **Up / Leave** | ignored | commit snapshot, clear redo |

use crate::history::{History, Restore};
use crate::input::{InputEvent, PointerKind};
use crate::notify::{Notice, NoticeQueue, NotificationSink};
use crate::repaint::{RepaintQueue, RepaintRequest, RepaintTicket};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sigpad_core::snapshot::encode_png;
use sigpad_core::{
    BrushKind, CanvasSize, Color, DrawConfig, Point, Raster, Result, Snapshot, StrokeStyle,
    StrokeWidth, SurfaceConfig, Viewport,
};

/// Seed used for the spray brush when the configuration leaves it open.
pub const FALLBACK_SPRAY_SEED: u64 = 0x5167_7061_6421;

pub const MSG_UNDO: &str = "Undo successful";
pub const MSG_REDO: &str = "Redo successful";
pub const MSG_CLEARED: &str = "Canvas cleared successfully!";
pub const MSG_EXPORTED: &str = "Signature downloaded successfully!";
pub const MSG_NOTHING_DRAWN: &str = "Please draw something first!";

/// What an input event did, for the host's event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The raster changed and should be blitted.
    pub changed: bool,
    /// The host should call `preventDefault()` (touch scrolling/zooming).
    pub prevent_default: bool,
}

/// An encoded image ready to be saved by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// A stroke in progress. Settings are latched at pointer-down.
#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    last: Point,
    brush: BrushKind,
    style: StrokeStyle,
    painted: usize,
}

pub struct DrawingSurface<N: NotificationSink = NoticeQueue> {
    config: SurfaceConfig,
    draw: DrawConfig,
    raster: Raster,
    history: History,
    repaint: RepaintQueue,
    stroke: Option<ActiveStroke>,
    /// Whether the visible content contains user ink.
    inked: bool,
    rng: StdRng,
    sink: N,
}

impl DrawingSurface<NoticeQueue> {
    pub fn new(config: SurfaceConfig, size: CanvasSize) -> Self {
        Self::with_sink(config, size, NoticeQueue::new())
    }
}

impl<N: NotificationSink> DrawingSurface<N> {
    pub fn with_sink(config: SurfaceConfig, size: CanvasSize, sink: N) -> Self {
        let seed = config.spray_seed.unwrap_or(FALLBACK_SPRAY_SEED);
        log::debug!(
            "surface {}x{} (history depth {}, spray seed {seed})",
            size.width,
            size.height,
            config.max_history
        );
        Self {
            draw: config.initial_draw_config(),
            raster: Raster::new(size.width, size.height),
            history: History::new(config.max_history),
            repaint: RepaintQueue::new(),
            stroke: None,
            inked: false,
            rng: StdRng::seed_from_u64(seed),
            sink,
            config,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.raster.width(),
            height: self.raster.height(),
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn draw_config(&self) -> DrawConfig {
        self.draw
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Whether the visible content contains user ink. Export is gated on this.
    pub fn has_ink(&self) -> bool {
        self.inked
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Dispatch a normalized input event.
    pub fn handle(&mut self, event: &InputEvent) -> EventOutcome {
        let changed = match event {
            InputEvent::PointerDown { x, y, .. } => self.pointer_down(Point::new(*x, *y)),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => self.pointer_up(),
        };
        // Touch gestures must not scroll the page while a stroke is live,
        // including the touchend that finishes it.
        let prevent_default = event.kind() == PointerKind::Touch && (self.is_drawing() || changed);
        EventOutcome {
            changed,
            prevent_default,
        }
    }

    /// Begin a stroke at a canvas-local point. Returns `true` if a stroke
    /// started.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        if self.stroke.is_some() {
            return false;
        }
        if !self.contains(at) {
            log::trace!("pointer down outside canvas at ({:.1}, {:.1})", at.x, at.y);
            return false;
        }
        // A new stroke paints over whatever is visible now.
        self.flush_repaints();
        self.repaint.invalidate();

        self.stroke = Some(ActiveStroke {
            last: at,
            brush: self.draw.brush,
            style: self.stroke_style(),
            painted: 0,
        });
        log::debug!(
            "stroke start ({:.1}, {:.1}) brush={} width={}",
            at.x,
            at.y,
            self.draw.brush,
            self.draw.stroke_width.get()
        );
        true
    }

    /// Extend the active stroke to `to`. Returns `true` if pixels changed.
    pub fn pointer_move(&mut self, to: Point) -> bool {
        let Some(stroke) = self.stroke.as_mut() else {
            return false;
        };
        let painted = stroke.brush.render_segment(
            &mut self.raster,
            stroke.last,
            to,
            &stroke.style,
            &mut self.rng,
        );
        stroke.last = to;
        stroke.painted += painted;
        if painted > 0 {
            self.inked = true;
        }
        painted > 0
    }

    /// Finish the active stroke and record it. Returns `true` if a stroke
    /// was committed.
    pub fn pointer_up(&mut self) -> bool {
        let Some(stroke) = self.stroke.take() else {
            return false;
        };
        log::debug!("stroke end: {} px painted", stroke.painted);
        self.record_snapshot();
        true
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Step back one snapshot. Returns `false` (and changes nothing) when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(restore) = self.history.undo() else {
            log::debug!("undo: nothing to undo");
            return false;
        };
        self.apply_restore(restore);
        self.sink.notify(Notice::success(MSG_UNDO));
        true
    }

    /// Step forward one snapshot. Returns `false` (and changes nothing) when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(restore) = self.history.redo() else {
            log::debug!("redo: nothing to redo");
            return false;
        };
        self.apply_restore(restore);
        self.sink.notify(Notice::success(MSG_REDO));
        true
    }

    /// Clear the raster and queue a decode of `snapshot`. The pixels land
    /// when the request is completed.
    pub fn request_repaint(&mut self, snapshot: Snapshot) -> RepaintRequest {
        self.raster.clear();
        self.repaint.request(snapshot)
    }

    /// Take the outstanding repaint so the host can decode it elsewhere and
    /// report back through `complete_repaint`.
    pub fn take_pending_repaint(&mut self) -> Option<RepaintRequest> {
        self.repaint.take_pending()
    }

    pub fn has_pending_repaint(&self) -> bool {
        self.repaint.has_pending()
    }

    /// Paint a decoded snapshot at the origin. Completions for superseded
    /// tickets are discarded. Returns `true` if the raster changed.
    pub fn complete_repaint(&mut self, ticket: RepaintTicket, decoded: &Raster) -> bool {
        if !self.repaint.complete(ticket) {
            return false;
        }
        self.raster.clear();
        self.raster.draw_at_origin(decoded);
        log::debug!("repaint #{} landed", ticket.id());
        true
    }

    /// Decode and paint the outstanding repaint, if any, right now. This
    /// includes a request the host has taken but not completed; its late
    /// completion is then discarded as stale. Returns `true` if the raster
    /// changed.
    pub fn flush_repaints(&mut self) -> bool {
        let Some(request) = self.repaint.outstanding().cloned() else {
            return false;
        };
        match request.snapshot.decode() {
            Ok(decoded) => self.complete_repaint(request.ticket, &decoded),
            Err(e) => {
                log::error!("repaint #{} failed: {e}", request.ticket.id());
                self.repaint.complete(request.ticket);
                self.sink
                    .notify(Notice::error("Could not restore the previous drawing"));
                false
            }
        }
    }

    // ─── Clear / resize ──────────────────────────────────────────────────

    /// Erase everything. Clearing inked content is recorded in history, so
    /// undo brings it back.
    pub fn clear(&mut self) {
        self.stroke = None;
        self.repaint.invalidate();
        self.raster.clear();
        let had_ink = std::mem::replace(&mut self.inked, false);
        if had_ink {
            self.record_snapshot();
        }
        self.sink.notify(Notice::success(MSG_CLEARED));
    }

    /// Re-size the raster. Content does not survive a resize.
    pub fn resize(&mut self, size: CanvasSize) {
        log::debug!(
            "resize {}x{} -> {}x{}",
            self.raster.width(),
            self.raster.height(),
            size.width,
            size.height
        );
        self.stroke = None;
        self.repaint.invalidate();
        self.raster = Raster::new(size.width, size.height);
        self.inked = false;
    }

    /// Re-size to the configured fraction of the window.
    pub fn resize_to_viewport(&mut self, viewport: Viewport) -> CanvasSize {
        let size = viewport.canvas_size(&self.config);
        self.resize(size);
        size
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Encode the canvas as PNG. With nothing drawn, emits an error notice
    /// and returns `None`.
    pub fn export(&mut self) -> Option<Export> {
        self.flush_repaints();
        if !self.inked {
            log::debug!("export refused: nothing drawn");
            self.sink.notify(Notice::error(MSG_NOTHING_DRAWN));
            return None;
        }

        let encoded = if self.config.flatten_background {
            encode_png(&self.raster.flattened_over(self.draw.background_color))
        } else {
            encode_png(&self.raster)
        };
        match encoded {
            Ok(png) => {
                log::debug!("exported {} bytes as {}", png.len(), self.config.export_file_name);
                self.sink.notify(Notice::success(MSG_EXPORTED));
                Some(Export {
                    file_name: self.config.export_file_name.clone(),
                    png,
                })
            }
            Err(e) => {
                log::error!("export failed: {e}");
                self.sink.notify(Notice::error(format!("Export failed: {e}")));
                None
            }
        }
    }

    // ─── Settings ────────────────────────────────────────────────────────

    pub fn set_stroke_color(&mut self, color: &str) -> Result<Color> {
        let color: Color = color.parse()?;
        self.draw.stroke_color = color;
        Ok(color)
    }

    /// Apply a range-slider value. Out-of-range values clamp.
    pub fn set_stroke_width(&mut self, value: &str) -> Result<StrokeWidth> {
        let width = StrokeWidth::parse_slider(
            value,
            self.config.min_stroke_width,
            self.config.max_stroke_width,
        )?;
        self.draw.stroke_width = width;
        Ok(width)
    }

    /// Background color is presentation only; the raster is not touched.
    pub fn set_background_color(&mut self, color: &str) -> Result<Color> {
        let color: Color = color.parse()?;
        self.draw.background_color = color;
        Ok(color)
    }

    pub fn set_brush(&mut self, name: &str) -> Result<BrushKind> {
        let brush: BrushKind = name.parse()?;
        self.draw.brush = brush;
        Ok(brush)
    }

    // ─── Private helpers ─────────────────────────────────────────────────

    fn contains(&self, p: Point) -> bool {
        p.x >= 0.0
            && p.y >= 0.0
            && p.x < self.raster.width() as f64
            && p.y < self.raster.height() as f64
    }

    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.draw.stroke_color,
            width: self.draw.stroke_width.get() as f64,
            spray_density: self.config.spray_density,
            spray_radius: self.config.spray_radius,
        }
    }

    fn apply_restore(&mut self, restore: Restore) {
        self.stroke = None;
        match restore {
            Restore::Snapshot(snapshot) => {
                self.inked = snapshot.inked();
                self.request_repaint(snapshot);
            }
            Restore::Blank => {
                self.repaint.invalidate();
                self.raster.clear();
                self.inked = false;
            }
        }
    }

    fn record_snapshot(&mut self) {
        match Snapshot::capture(&self.raster, self.inked) {
            Ok(snapshot) => self.history.commit(snapshot),
            Err(e) => {
                log::error!("could not capture snapshot: {e}");
                self.sink
                    .notify(Notice::error("This change cannot be undone"));
            }
        }
    }
}
