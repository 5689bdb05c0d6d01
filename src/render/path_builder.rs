//! Closed outline construction.
//!
//! Three builders share one small command model:
//!
//! - [`round_rect`]: four straight edges joined by quadratic corners, each
//!   corner with its own radius
//! - [`cut_corner_rect`]: an eight-point polygon with one diagonal chamfer
//!   per corner
//! - [`sample_formula`]: a 360-gon traced by stepping a [`ShapeFormula`] one
//!   degree at a time
//!
//! The rect builders start on the left edge just below the top-left corner
//! and walk clockwise (in y-down screen space). Corner magnitudes are not
//! validated. A radius larger than half a side makes the adjacent segments
//! overlap, and the resulting path self-intersects.

use glam::{DVec2, dvec2};

use super::defaults;
use super::formula::ShapeFormula;
use crate::types::{CornerSet, Rect};

/// A single drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Quadratic Bézier from the current point through `ctrl` to `to`
    QuadTo { ctrl: DVec2, to: DVec2 },
    Close,
}

impl PathCommand {
    /// The point this command ends on, if any.
    pub fn end_point(&self) -> Option<DVec2> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
            PathCommand::QuadTo { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }
}

/// An outline made of move/line/quad commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// End points of every command, in order. Control points are skipped.
    pub fn vertices(&self) -> Vec<DVec2> {
        self.commands.iter().filter_map(PathCommand::end_point).collect()
    }

    /// Approximate the outline as a polyline, splitting each quadratic
    /// segment into `segments_per_curve` straight pieces.
    pub fn flatten(&self, segments_per_curve: usize) -> Vec<DVec2> {
        let steps = segments_per_curve.max(1);
        let mut points = Vec::with_capacity(self.commands.len() * steps);
        let mut current = DVec2::ZERO;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    points.push(p);
                    current = p;
                }
                PathCommand::QuadTo { ctrl, to } => {
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        points.push(quad_point(current, ctrl, to, t));
                    }
                    current = to;
                }
                PathCommand::Close => {}
            }
        }

        points
    }

    /// Bounding box of all end and control points.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(self.commands.iter().flat_map(|c| match *c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::QuadTo { ctrl, to } => vec![ctrl, to],
            PathCommand::Close => Vec::new(),
        }))
    }
}

/// Point at parameter `t` on the quadratic Bézier `p0 → ctrl → p1`.
pub fn quad_point(p0: DVec2, ctrl: DVec2, p1: DVec2, t: f64) -> DVec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt) + ctrl * (2.0 * mt * t) + p1 * (t * t)
}

/// Incremental builder for a single closed outline.
///
/// A builder always has a start point, so the path it produces is never
/// empty.
///
/// # Example
///
/// ```
/// use glam::dvec2;
/// use shaped_image::render::path_builder::PathBuilder;
///
/// let mut builder = PathBuilder::new(dvec2(0.0, 0.0));
/// builder.line_to(dvec2(10.0, 0.0));
/// builder.line_to(dvec2(10.0, 10.0));
/// let path = builder.build();
/// assert_eq!(path.len(), 4); // move, line, line, close
/// ```
#[derive(Debug)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    start: DVec2,
    current: DVec2,
}

impl PathBuilder {
    /// Start a new outline at `start`.
    pub fn new(start: DVec2) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(start)],
            start,
            current: start,
        }
    }

    pub fn line_to(&mut self, to: DVec2) {
        self.commands.push(PathCommand::LineTo(to));
        self.current = to;
    }

    pub fn quad_to(&mut self, ctrl: DVec2, to: DVec2) {
        self.commands.push(PathCommand::QuadTo { ctrl, to });
        self.current = to;
    }

    pub fn start(&self) -> DVec2 {
        self.start
    }

    pub fn current(&self) -> DVec2 {
        self.current
    }

    /// Close the outline and return it.
    pub fn build(mut self) -> Path {
        self.commands.push(PathCommand::Close);
        Path { commands: self.commands }
    }
}

/// Plain rectangle, same start point and winding as [`round_rect`].
pub fn rect_path(rect: Rect) -> Path {
    round_rect(rect, &CornerSet::ZERO)
}

/// Rounded rectangle with an independent radius per corner.
///
/// Produces `move, quad, line, quad, line, quad, line, quad, line, close`.
/// A zero radius collapses that corner's curve onto the corner point.
pub fn round_rect(rect: Rect, radii: &CornerSet) -> Path {
    let Rect { left, top, right, bottom } = rect;
    let CornerSet { top_left: tl, top_right: tr, bottom_right: br, bottom_left: bl } = *radii;

    let mut b = PathBuilder::new(dvec2(left, top + tl));
    b.quad_to(dvec2(left, top), dvec2(left + tl, top));
    b.line_to(dvec2(right - tr, top));
    b.quad_to(dvec2(right, top), dvec2(right, top + tr));
    b.line_to(dvec2(right, bottom - br));
    b.quad_to(dvec2(right, bottom), dvec2(right - br, bottom));
    b.line_to(dvec2(left + bl, bottom));
    b.quad_to(dvec2(left, bottom), dvec2(left, bottom - bl));
    b.line_to(dvec2(left, top + tl));
    b.build()
}

/// Rectangle with each corner replaced by a straight chamfer.
///
/// Same traversal as [`round_rect`] but with straight lines only.
pub fn cut_corner_rect(rect: Rect, cuts: &CornerSet) -> Path {
    let Rect { left, top, right, bottom } = rect;
    let CornerSet { top_left: tl, top_right: tr, bottom_right: br, bottom_left: bl } = *cuts;

    let mut b = PathBuilder::new(dvec2(left, top + tl));
    b.line_to(dvec2(left + tl, top));
    b.line_to(dvec2(right - tr, top));
    b.line_to(dvec2(right, top + tr));
    b.line_to(dvec2(right, bottom - br));
    b.line_to(dvec2(right - br, bottom));
    b.line_to(dvec2(left + bl, bottom));
    b.line_to(dvec2(left, bottom - bl));
    b.line_to(dvec2(left, top + tl));
    b.build()
}

/// Trace `formula` over `rect` at one-degree steps.
///
/// The formula's rect is set first, then its angle is stepped from 0 to 360
/// inclusive, giving a move plus 360 lines. The sampling rate is fixed; very
/// large outlines will show the facets.
pub fn sample_formula<F: ShapeFormula + ?Sized>(formula: &mut F, rect: Rect) -> Path {
    formula.set_rect(rect);
    formula.set_degree(0.0);

    let mut b = PathBuilder::new(dvec2(formula.x(), formula.y()));
    for degree in 1..=defaults::FORMULA_SAMPLES {
        formula.set_degree(degree as f64);
        b.line_to(dvec2(formula.x(), formula.y()));
    }
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::formula::{EllipseFormula, SuperEllipseFormula};

    const EPSILON: f64 = 1e-9;

    fn assert_point_eq(actual: DVec2, expected: DVec2) {
        assert!(
            (actual - expected).length() < EPSILON,
            "point mismatch: {actual} != {expected}"
        );
    }

    fn square(size: f64) -> Rect {
        Rect::new(0.0, 0.0, size, size)
    }

    fn distinct(points: &[DVec2]) -> Vec<DVec2> {
        let mut out: Vec<DVec2> = Vec::new();
        for p in points {
            if !out.iter().any(|q| (*q - *p).length() < EPSILON) {
                out.push(*p);
            }
        }
        out
    }

    #[test]
    fn round_rect_command_sequence() {
        let path = round_rect(square(100.0), &CornerSet::uniform(10.0));
        let kinds: Vec<&str> = path
            .commands()
            .iter()
            .map(|c| match c {
                PathCommand::MoveTo(_) => "M",
                PathCommand::LineTo(_) => "L",
                PathCommand::QuadTo { .. } => "Q",
                PathCommand::Close => "Z",
            })
            .collect();
        assert_eq!(kinds, ["M", "Q", "L", "Q", "L", "Q", "L", "Q", "L", "Z"]);
        assert!(path.is_closed());
    }

    #[test]
    fn round_rect_zero_radii_is_plain_rect() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        let corners = distinct(&round_rect(rect, &CornerSet::ZERO).flatten(4));
        assert_eq!(corners.len(), 4);
        for expected in [
            dvec2(10.0, 20.0),
            dvec2(110.0, 20.0),
            dvec2(110.0, 70.0),
            dvec2(10.0, 70.0),
        ] {
            assert!(corners.iter().any(|p| (*p - expected).length() < EPSILON), "missing corner {expected}");
        }
    }

    #[test]
    fn round_rect_per_corner_scenario() {
        let path = round_rect(square(200.0), &CornerSet::new(8.0, 12.0, 16.0, 24.0));
        let cmds = path.commands();
        assert_eq!(cmds[0], PathCommand::MoveTo(dvec2(0.0, 8.0)));

        // Straight segments span the side minus the two adjacent radii.
        let straight: Vec<f64> = cmds
            .windows(2)
            .filter_map(|w| match (w[0].end_point(), w[1]) {
                (Some(from), PathCommand::LineTo(to)) => Some((to - from).length()),
                _ => None,
            })
            .collect();
        assert_eq!(straight[0], 200.0 - 8.0 - 12.0);
        assert_eq!(straight[1], 200.0 - 12.0 - 16.0);
        assert_eq!(straight[2], 200.0 - 16.0 - 24.0);
        assert_eq!(straight[3], 200.0 - 24.0 - 8.0);
    }

    #[test]
    fn round_rect_full_radius_approximates_circle() {
        let r = 50.0;
        let path = round_rect(square(2.0 * r), &CornerSet::uniform(r));
        let center = dvec2(r, r);
        for p in path.flatten(16) {
            let d = (p - center).length();
            // A quadratic corner bulges out by at most ~6% of the radius.
            assert!((d - r).abs() <= 0.08 * r, "point {p} is {d} from center");
        }
    }

    #[test]
    fn round_rect_oversized_radii_overlap() {
        // Radii bigger than half the side are not clamped: the top edge runs backwards.
        let path = round_rect(square(100.0), &CornerSet::uniform(80.0));
        let v = path.vertices();
        assert_point_eq(v[1], dvec2(80.0, 0.0));
        assert_point_eq(v[2], dvec2(20.0, 0.0));
        assert!(v[2].x < v[1].x);
    }

    #[test]
    fn cut_corner_zero_is_plain_rect() {
        let rect = Rect::new(0.0, 0.0, 40.0, 30.0);
        let corners = distinct(&cut_corner_rect(rect, &CornerSet::ZERO).vertices());
        assert_eq!(
            corners,
            vec![dvec2(0.0, 0.0), dvec2(40.0, 0.0), dvec2(40.0, 30.0), dvec2(0.0, 30.0)]
        );
    }

    #[test]
    fn cut_corner_vertices() {
        let path = cut_corner_rect(square(100.0), &CornerSet::new(10.0, 20.0, 30.0, 40.0));
        assert!(path.commands().iter().all(|c| !matches!(c, PathCommand::QuadTo { .. })));
        assert_eq!(
            path.vertices(),
            vec![
                dvec2(0.0, 10.0),
                dvec2(10.0, 0.0),
                dvec2(80.0, 0.0),
                dvec2(100.0, 20.0),
                dvec2(100.0, 70.0),
                dvec2(70.0, 100.0),
                dvec2(40.0, 100.0),
                dvec2(0.0, 60.0),
                dvec2(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn sampled_formula_is_closed_360_gon() {
        let mut formula = EllipseFormula::default();
        let path = sample_formula(&mut formula, Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(path.len(), 1 + 360 + 1);
        assert!(path.is_closed());

        let v = path.vertices();
        // Sample 360 wraps back onto sample 0.
        assert_point_eq(v[0], v[360]);
        assert_eq!(formula.rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn sampled_superellipse_stays_in_rect() {
        let rect = Rect::new(10.0, 10.0, 110.0, 60.0);
        let mut formula = SuperEllipseFormula::default();
        let bounds = sample_formula(&mut formula, rect).bounds().unwrap();
        assert!(bounds.left >= rect.left - EPSILON && bounds.right <= rect.right + EPSILON);
        assert!(bounds.top >= rect.top - EPSILON && bounds.bottom <= rect.bottom + EPSILON);
    }

    #[test]
    fn degenerate_rect_does_not_panic() {
        let rect = Rect::new(50.0, 50.0, 40.0, 40.0);
        assert!(round_rect(rect, &CornerSet::uniform(5.0)).is_closed());
        assert!(cut_corner_rect(rect, &CornerSet::uniform(5.0)).is_closed());
        let mut formula = SuperEllipseFormula::default();
        assert!(sample_formula(&mut formula, Rect::new(0.0, 0.0, 0.0, 0.0)).is_closed());
    }
}
