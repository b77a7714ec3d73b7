//! Integration tests: strokes, undo/redo history and repaint sequencing.
//!
//! Drives a `DrawingSurface` the way the browser bridge does and checks the
//! raster after every history step.

use pretty_assertions::assert_eq;
use sigpad_core::{CanvasSize, Point, Raster, SurfaceConfig, Viewport};
use sigpad_editor::{DrawingSurface, InputEvent, PointerKind};

const SIZE: CanvasSize = CanvasSize {
    width: 240,
    height: 200,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_surface() -> DrawingSurface {
    init_logging();
    let config = SurfaceConfig {
        spray_seed: Some(99),
        ..SurfaceConfig::default()
    };
    DrawingSurface::new(config, SIZE)
}

fn draw_stroke(surface: &mut DrawingSurface, points: &[(f64, f64)]) {
    let (&(x, y), rest) = points.split_first().expect("stroke needs a point");
    surface.handle(&InputEvent::from_pointer_down(x, y, PointerKind::Mouse));
    for &(x, y) in rest {
        surface.handle(&InputEvent::from_pointer_move(x, y, PointerKind::Mouse));
    }
    surface.handle(&InputEvent::from_pointer_up(PointerKind::Mouse));
}

fn undo_now(surface: &mut DrawingSurface) -> bool {
    let stepped = surface.undo();
    surface.flush_repaints();
    stepped
}

fn redo_now(surface: &mut DrawingSurface) -> bool {
    let stepped = surface.redo();
    surface.flush_repaints();
    stepped
}

// ─── Symmetry ───────────────────────────────────────────────────────────

#[test]
fn undo_all_then_redo_all_is_pixel_identical() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (80.0, 60.0), (120.0, 20.0)]);
    surface.set_brush("dotted").unwrap();
    surface.set_stroke_width("12").unwrap();
    draw_stroke(&mut surface, &[(30.0, 150.0), (60.0, 150.0), (90.0, 160.0)]);
    surface.set_brush("spray").unwrap();
    surface.set_stroke_color("rgba(200, 20, 20, 0.5)").unwrap();
    draw_stroke(&mut surface, &[(180.0, 100.0), (190.0, 110.0), (200.0, 120.0)]);

    let final_state: Raster = surface.raster().clone();

    for _ in 0..3 {
        assert!(undo_now(&mut surface));
    }
    assert!(surface.raster().is_blank());
    for _ in 0..3 {
        assert!(redo_now(&mut surface));
    }
    assert_eq!(surface.raster(), &final_state);
}

#[test]
fn each_undo_shows_the_previous_stroke_state() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);
    let after_first = surface.raster().clone();
    draw_stroke(&mut surface, &[(10.0, 100.0), (100.0, 100.0)]);

    assert!(undo_now(&mut surface));
    assert_eq!(surface.raster(), &after_first);
    assert!(surface.has_ink());
}

#[test]
fn undo_past_first_stroke_blanks_the_canvas() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);

    assert!(undo_now(&mut surface));
    assert!(surface.raster().is_blank());
    assert!(!surface.has_ink());
    assert!(surface.can_redo());
}

// ─── Redo invalidation ─────────────────────────────────────────────────

#[test]
fn new_stroke_discards_redo_history() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);
    draw_stroke(&mut surface, &[(10.0, 50.0), (100.0, 50.0)]);
    assert!(undo_now(&mut surface));
    assert!(surface.can_redo());

    draw_stroke(&mut surface, &[(10.0, 90.0), (100.0, 90.0)]);
    assert!(!surface.can_redo());

    let before = surface.raster().clone();
    assert!(!redo_now(&mut surface));
    assert_eq!(surface.raster(), &before);
}

// ─── No-op bounds ──────────────────────────────────────────────────────

#[test]
fn undo_and_redo_on_empty_stacks_change_nothing() {
    let mut surface = make_surface();
    assert!(!surface.undo());
    assert!(!surface.redo());
    assert!(!surface.has_pending_repaint());
    assert!(surface.sink().is_empty());

    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);
    let before = surface.raster().clone();
    assert!(!surface.redo());
    assert!(!surface.has_pending_repaint());
    assert_eq!(surface.raster(), &before);
    assert_eq!(surface.history().undo_len(), 1);
}

// ─── Repaint sequencing ────────────────────────────────────────────────

#[test]
fn repaint_is_not_visible_until_completed() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);
    let after_first = surface.raster().clone();
    draw_stroke(&mut surface, &[(10.0, 50.0), (100.0, 50.0)]);

    assert!(surface.undo());
    assert!(surface.raster().is_blank(), "raster is cleared before decode");

    let request = surface.take_pending_repaint().expect("undo queues a repaint");
    let decoded = request.snapshot.decode().unwrap();
    assert!(surface.complete_repaint(request.ticket, &decoded));
    assert_eq!(surface.raster(), &after_first);
}

#[test]
fn stale_repaint_completion_is_discarded() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);
    let after_first = surface.raster().clone();
    draw_stroke(&mut surface, &[(10.0, 50.0), (100.0, 50.0)]);
    draw_stroke(&mut surface, &[(10.0, 90.0), (100.0, 90.0)]);

    // First undo asks for the two-stroke state; decode it "slowly".
    assert!(surface.undo());
    let slow = surface.take_pending_repaint().unwrap();
    // Second undo supersedes it before it lands.
    assert!(surface.undo());

    let late = slow.snapshot.decode().unwrap();
    assert!(!surface.complete_repaint(slow.ticket, &late));
    assert!(surface.raster().is_blank());

    assert!(surface.flush_repaints());
    assert_eq!(surface.raster(), &after_first);
}

#[test]
fn new_stroke_lands_in_flight_repaint_first() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);
    draw_stroke(&mut surface, &[(10.0, 50.0), (100.0, 50.0)]);
    assert!(surface.undo());
    let in_flight = surface.take_pending_repaint().unwrap();

    draw_stroke(&mut surface, &[(10.0, 150.0), (100.0, 150.0)]);
    assert!(surface.raster().pixel(50, 10).unwrap().a > 0, "restored stroke kept");
    assert_eq!(surface.raster().pixel(50, 50).unwrap().a, 0);
    assert!(surface.raster().pixel(50, 150).unwrap().a > 0);

    // The host's late completion no longer applies.
    let decoded = in_flight.snapshot.decode().unwrap();
    assert!(!surface.complete_repaint(in_flight.ticket, &decoded));
    assert!(surface.raster().pixel(50, 150).unwrap().a > 0);

    // The committed snapshot carries both strokes.
    let committed = surface.history().top().unwrap().decode().unwrap();
    assert!(committed.pixel(50, 10).unwrap().a > 0);
    assert!(committed.pixel(50, 150).unwrap().a > 0);
}

// ─── History depth ─────────────────────────────────────────────────────

#[test]
fn history_depth_is_bounded() {
    init_logging();
    let config = SurfaceConfig {
        max_history: 3,
        ..SurfaceConfig::default()
    };
    let mut surface = DrawingSurface::new(config, SIZE);
    for i in 0..6 {
        let y = 10.0 + 20.0 * i as f64;
        draw_stroke(&mut surface, &[(10.0, y), (100.0, y)]);
    }
    assert_eq!(surface.history().undo_len(), 3);

    let mut undo_count = 0;
    while undo_now(&mut surface) {
        undo_count += 1;
    }
    assert_eq!(undo_count, 3);
}

// ─── Clear ─────────────────────────────────────────────────────────────

#[test]
fn clear_is_undoable() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);
    let drawn = surface.raster().clone();

    surface.clear();
    assert!(surface.raster().is_blank());
    assert!(!surface.has_ink());
    assert_eq!(surface.history().undo_len(), 2);

    assert!(undo_now(&mut surface));
    assert_eq!(surface.raster(), &drawn);
    assert!(surface.has_ink());

    assert!(redo_now(&mut surface));
    assert!(surface.raster().is_blank());
}

#[test]
fn clearing_blank_canvas_records_nothing() {
    let mut surface = make_surface();
    surface.clear();
    assert!(!surface.can_undo());
    assert_eq!(
        surface.sink().last().map(|n| n.message.as_str()),
        Some("Canvas cleared successfully!")
    );
}

// ─── Shapes ────────────────────────────────────────────────────────────

#[test]
fn circle_brush_is_independent_of_prior_strokes() {
    let ring = |surface: &DrawingSurface| -> Vec<bool> {
        (0..360)
            .step_by(15)
            .map(|deg: u32| {
                let rad = (deg as f64).to_radians();
                let x = (100.0 + 50.0 * rad.cos()).floor() as u32;
                let y = (100.0 + 50.0 * rad.sin()).floor() as u32;
                surface.raster().pixel(x, y).unwrap().a > 0
            })
            .collect()
    };

    let mut fresh = make_surface();
    fresh.set_brush("circle").unwrap();
    draw_stroke(&mut fresh, &[(100.0, 100.0), (100.0, 100.0)]);

    let mut busy = make_surface();
    draw_stroke(&mut busy, &[(200.0, 10.0), (230.0, 190.0)]);
    busy.set_brush("circle").unwrap();
    draw_stroke(&mut busy, &[(100.0, 100.0), (100.0, 100.0)]);

    assert!(ring(&fresh).iter().all(|&hit| hit));
    assert_eq!(ring(&fresh), ring(&busy));
    assert_eq!(fresh.raster().pixel(100, 100).unwrap().a, 0);
}

// ─── Resize ────────────────────────────────────────────────────────────

#[test]
fn resize_clears_content() {
    let mut surface = make_surface();
    draw_stroke(&mut surface, &[(10.0, 10.0), (100.0, 10.0)]);

    let size = surface.resize_to_viewport(Viewport {
        width: 1000.0,
        height: 800.0,
    });
    assert_eq!(size, CanvasSize { width: 920, height: 560 });
    assert_eq!(surface.size(), size);
    assert!(surface.raster().is_blank());
    assert!(!surface.has_ink());
    // History survives; undo still works against it.
    assert!(surface.can_undo());
}

#[test]
fn resize_mid_stroke_drops_the_stroke() {
    let mut surface = make_surface();
    assert!(surface.pointer_down(Point::new(10.0, 10.0)));
    surface.resize(CanvasSize {
        width: 50,
        height: 50,
    });
    assert!(!surface.is_drawing());
    assert!(!surface.pointer_up());
    assert!(!surface.can_undo());
}
