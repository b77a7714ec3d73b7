//! Brush shapes and their stroke-segment renderers.
//!
//! A stroke is rendered one pointer-move at a time: each move hands the
//! previous and current canvas-local points to the active brush. Freehand
//! brushes connect or stamp along the path, shape brushes stamp a fixed-size
//! outline at the current point.
//!
//! Coverage is decided per pixel center (`x + 0.5, y + 0.5`).

use crate::color::Color;
use crate::error::SurfaceError;
use crate::raster::Raster;
use kurbo::{Circle, Line, ParamCurveNearest, Point, Rect, Shape, Size};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Radius of the `circle` shape brush.
pub const CIRCLE_RADIUS: f64 = 50.0;
/// Side of the `square` shape brush.
pub const SQUARE_SIDE: f64 = 100.0;
/// Width × height of the `rectangle` shape brush.
pub const RECTANGLE_SIZE: Size = Size::new(150.0, 100.0);

/// The rendering rule applied to pointer movement during a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    /// Freehand line from the previous point to the current one.
    #[default]
    Brush,
    /// Airbrush: scattered single-pixel marks around the current point.
    Spray,
    /// Filled dot of diameter `width` at the current point.
    Dotted,
    Circle,
    Square,
    Rectangle,
}

impl BrushKind {
    pub fn all() -> &'static [BrushKind] {
        &[
            BrushKind::Brush,
            BrushKind::Spray,
            BrushKind::Dotted,
            BrushKind::Circle,
            BrushKind::Square,
            BrushKind::Rectangle,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Brush => "brush",
            BrushKind::Spray => "spray",
            BrushKind::Dotted => "dotted",
            BrushKind::Circle => "circle",
            BrushKind::Square => "square",
            BrushKind::Rectangle => "rectangle",
        }
    }

    /// Shape brushes stamp a fixed-size outline instead of tracing the path.
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            BrushKind::Circle | BrushKind::Square | BrushKind::Rectangle
        )
    }

    /// Render one segment of a stroke. Returns the number of pixels painted.
    pub fn render_segment<R: Rng + ?Sized>(
        self,
        raster: &mut Raster,
        from: Point,
        to: Point,
        style: &StrokeStyle,
        rng: &mut R,
    ) -> usize {
        let painted = match self {
            BrushKind::Brush => stroke_line(raster, Line::new(from, to), style.width, style.color),
            BrushKind::Spray => spray(raster, to, style, rng),
            BrushKind::Dotted => fill_disc(raster, Circle::new(to, style.width / 2.0), style.color),
            BrushKind::Circle => stroke_circle(
                raster,
                Circle::new(to, CIRCLE_RADIUS),
                style.width,
                style.color,
            ),
            BrushKind::Square => stroke_rect(
                raster,
                Rect::from_center_size(to, (SQUARE_SIDE, SQUARE_SIDE)),
                style.width,
                style.color,
            ),
            BrushKind::Rectangle => stroke_rect(
                raster,
                Rect::from_center_size(to, RECTANGLE_SIZE),
                style.width,
                style.color,
            ),
        };
        log::trace!(
            "{} segment ({:.1}, {:.1}) -> ({:.1}, {:.1}) painted {painted} px",
            self.name(),
            from.x,
            from.y,
            to.x,
            to.y
        );
        painted
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrushKind {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BrushKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SurfaceError::UnknownBrush(s.to_string()))
    }
}

/// Paint parameters latched at the start of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Marks scattered per spray segment.
    pub spray_density: usize,
    /// Half-extent of the square the spray marks fall in.
    pub spray_radius: f64,
}

// ─── Renderers ───────────────────────────────────────────────────────────

fn stroke_line(raster: &mut Raster, line: Line, width: f64, color: Color) -> usize {
    let half = width / 2.0;
    if (line.p1 - line.p0).hypot2() < 1e-12 {
        return fill_disc(raster, Circle::new(line.p0, half), color);
    }
    let limit = half * half;
    let bounds = line.bounding_box().inflate(half, half);
    paint_where(raster, bounds, color, |p| line.nearest(p, 1e-6).distance_sq <= limit)
}

fn fill_disc(raster: &mut Raster, disc: Circle, color: Color) -> usize {
    let painted = paint_where(raster, disc.bounding_box(), color, |p| disc.contains(p));
    if painted > 0 {
        return painted;
    }
    // Discs narrower than a pixel still leave a mark.
    usize::from(raster.blend_pixel(
        disc.center.x.floor() as i64,
        disc.center.y.floor() as i64,
        color,
    ))
}

fn stroke_circle(raster: &mut Raster, circle: Circle, width: f64, color: Color) -> usize {
    let half = width / 2.0;
    let bounds = circle.bounding_box().inflate(half, half);
    paint_where(raster, bounds, color, |p| {
        ((p - circle.center).hypot() - circle.radius).abs() <= half
    })
}

fn stroke_rect(raster: &mut Raster, rect: Rect, width: f64, color: Color) -> usize {
    let half = width / 2.0;
    let outer = rect.inflate(half, half);
    let inner = rect.inflate(-half, -half);
    paint_where(raster, outer, color, |p| {
        outer.contains(p) && !inner.contains(p)
    })
}

fn spray<R: Rng + ?Sized>(
    raster: &mut Raster,
    center: Point,
    style: &StrokeStyle,
    rng: &mut R,
) -> usize {
    let radius = style.spray_radius.max(0.0);
    (0..style.spray_density)
        .filter(|_| {
            let dx = rng.random_range(-radius..=radius);
            let dy = rng.random_range(-radius..=radius);
            raster.blend_pixel(
                (center.x + dx).floor() as i64,
                (center.y + dy).floor() as i64,
                style.color,
            )
        })
        .count()
}

/// Blend `color` into every pixel inside `bounds` whose center satisfies
/// `covers`. The scan is clipped to the raster.
fn paint_where(
    raster: &mut Raster,
    bounds: Rect,
    color: Color,
    covers: impl Fn(Point) -> bool,
) -> usize {
    let x0 = bounds.x0.floor().max(0.0) as i64;
    let y0 = bounds.y0.floor().max(0.0) as i64;
    let x1 = bounds.x1.ceil().min(raster.width() as f64) as i64;
    let y1 = bounds.y1.ceil().min(raster.height() as f64) as i64;

    let mut painted = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if covers(center) && raster.blend_pixel(x, y, color) {
                painted += 1;
            }
        }
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn style(width: f64) -> StrokeStyle {
        StrokeStyle {
            color: Color::BLACK,
            width,
            spray_density: 50,
            spray_radius: 10.0,
        }
    }

    fn render(kind: BrushKind, raster: &mut Raster, from: (f64, f64), to: (f64, f64), width: f64) -> usize {
        let mut rng = StdRng::seed_from_u64(7);
        kind.render_segment(raster, from.into(), to.into(), &style(width), &mut rng)
    }

    #[test]
    fn brush_connects_points() {
        let mut raster = Raster::new(50, 50);
        render(BrushKind::Brush, &mut raster, (5.0, 10.0), (40.0, 10.0), 4.0);
        for x in 5..40 {
            assert!(raster.pixel(x, 10).unwrap().a > 0, "gap at x={x}");
        }
        assert!(raster.pixel(20, 20).unwrap().a == 0);
    }

    #[test]
    fn brush_without_motion_leaves_a_dot() {
        let mut raster = Raster::new(20, 20);
        let painted = render(BrushKind::Brush, &mut raster, (10.0, 10.0), (10.0, 10.0), 4.0);
        assert!(painted > 0);
        assert!(raster.pixel(10, 10).unwrap().a > 0);
    }

    #[test]
    fn dotted_fills_radius_half_width() {
        let mut raster = Raster::new(40, 40);
        render(BrushKind::Dotted, &mut raster, (0.0, 0.0), (20.0, 20.0), 10.0);
        assert!(raster.pixel(20, 20).unwrap().a > 0);
        assert!(raster.pixel(23, 20).unwrap().a > 0);
        assert_eq!(raster.pixel(27, 20).unwrap().a, 0);
        // Only the current point is stamped.
        assert_eq!(raster.pixel(0, 0).unwrap().a, 0);
    }

    #[test]
    fn thin_dot_still_marks() {
        let mut raster = Raster::new(5, 5);
        let painted = render(BrushKind::Dotted, &mut raster, (2.0, 2.0), (2.0, 2.0), 1.0);
        assert_eq!(painted, 1);
        assert!(raster.pixel(2, 2).unwrap().a > 0);
    }

    #[test]
    fn circle_is_outline_of_radius_fifty() {
        let mut raster = Raster::new(200, 200);
        render(BrushKind::Circle, &mut raster, (0.0, 0.0), (100.0, 100.0), 2.0);
        assert!(raster.pixel(150, 100).unwrap().a > 0);
        assert!(raster.pixel(49, 100).unwrap().a > 0);
        assert!(raster.pixel(100, 150).unwrap().a > 0);
        assert_eq!(raster.pixel(100, 100).unwrap().a, 0, "outline only");
        assert_eq!(raster.pixel(160, 100).unwrap().a, 0);
    }

    #[test]
    fn square_and_rectangle_sizes() {
        let mut raster = Raster::new(300, 300);
        render(BrushKind::Square, &mut raster, (0.0, 0.0), (100.0, 100.0), 2.0);
        // Edges at 50 and 150.
        assert!(raster.pixel(50, 100).unwrap().a > 0);
        assert!(raster.pixel(149, 100).unwrap().a > 0);
        assert_eq!(raster.pixel(100, 100).unwrap().a, 0);

        let mut raster = Raster::new(300, 300);
        render(BrushKind::Rectangle, &mut raster, (0.0, 0.0), (150.0, 150.0), 2.0);
        // Horizontal extent 75..225, vertical 100..200.
        assert!(raster.pixel(75, 150).unwrap().a > 0);
        assert!(raster.pixel(224, 150).unwrap().a > 0);
        assert!(raster.pixel(150, 100).unwrap().a > 0);
        assert!(raster.pixel(150, 199).unwrap().a > 0);
        assert_eq!(raster.pixel(150, 150).unwrap().a, 0);
        assert_eq!(raster.pixel(150, 80).unwrap().a, 0);
    }

    #[test]
    fn spray_stays_within_radius() {
        let mut raster = Raster::new(100, 100);
        let painted = render(BrushKind::Spray, &mut raster, (0.0, 0.0), (50.0, 50.0), 4.0);
        assert!(painted > 0 && painted <= 50);
        for y in 0..100 {
            for x in 0..100 {
                if raster.pixel(x, y).unwrap().a > 0 {
                    assert!((39..=60).contains(&x) && (39..=60).contains(&y), "({x}, {y}) outside spray square");
                }
            }
        }
    }

    #[test]
    fn spray_is_deterministic_for_a_seed() {
        let mut a = Raster::new(60, 60);
        let mut b = Raster::new(60, 60);
        render(BrushKind::Spray, &mut a, (30.0, 30.0), (30.0, 30.0), 1.0);
        render(BrushKind::Spray, &mut b, (30.0, 30.0), (30.0, 30.0), 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn shapes_clip_at_canvas_edge() {
        let mut raster = Raster::new(20, 20);
        let painted = render(BrushKind::Circle, &mut raster, (0.0, 0.0), (0.0, 0.0), 4.0);
        assert_eq!(painted, 0);
        assert!(raster.is_blank());
    }

    #[test]
    fn brush_names_roundtrip() {
        for kind in BrushKind::all() {
            assert_eq!(kind.name().parse::<BrushKind>().unwrap(), *kind);
        }
        assert_eq!(" Spray ".parse::<BrushKind>().unwrap(), BrushKind::Spray);
        assert!("marker".parse::<BrushKind>().is_err());
        assert!(BrushKind::Circle.is_shape());
        assert!(!BrushKind::Dotted.is_shape());
    }
}
