use glam::dvec2;
use shaped_image::render::{
    EllipseFormula, PathCommand, SuperEllipseFormula, cut_corner_rect, round_rect, sample_formula,
};
use shaped_image::types::{CornerSet, Rect};

fn square(side: f64) -> Rect {
    Rect::new(0.0, 0.0, side, side)
}

fn m(x: f64, y: f64) -> PathCommand {
    PathCommand::MoveTo(dvec2(x, y))
}

fn l(x: f64, y: f64) -> PathCommand {
    PathCommand::LineTo(dvec2(x, y))
}

fn q(cx: f64, cy: f64, x: f64, y: f64) -> PathCommand {
    PathCommand::QuadTo {
        ctrl: dvec2(cx, cy),
        to: dvec2(x, y),
    }
}

#[test]
fn round_rect_with_independent_radii() {
    let path = round_rect(square(200.0), &CornerSet::new(8.0, 12.0, 16.0, 24.0));
    assert_eq!(
        path.commands(),
        [
            m(0.0, 8.0),
            q(0.0, 0.0, 8.0, 0.0),
            l(188.0, 0.0),
            q(200.0, 0.0, 200.0, 12.0),
            l(200.0, 184.0),
            q(200.0, 200.0, 184.0, 200.0),
            l(24.0, 200.0),
            q(0.0, 200.0, 0.0, 176.0),
            l(0.0, 8.0),
            PathCommand::Close,
        ]
    );
}

#[test]
fn round_rect_half_side_radii_make_a_circle() {
    let r = 50.0;
    let path = round_rect(square(2.0 * r), &CornerSet::uniform(r));
    let center = dvec2(r, r);
    for p in path.flatten(32) {
        let d = (p - center).length();
        // Quadratic corners bulge a little past the true arc.
        assert!((d - r).abs() <= 0.08 * r, "{p} is {d} from the center");
    }
}

#[test]
fn cut_corner_with_independent_sizes() {
    let path = cut_corner_rect(Rect::new(10.0, 10.0, 110.0, 60.0), &CornerSet::new(5.0, 10.0, 0.0, 20.0));
    assert_eq!(
        path.commands(),
        [
            m(10.0, 15.0),
            l(15.0, 10.0),
            l(100.0, 10.0),
            l(110.0, 20.0),
            l(110.0, 60.0),
            l(110.0, 60.0),
            l(30.0, 60.0),
            l(10.0, 40.0),
            l(10.0, 15.0),
            PathCommand::Close,
        ]
    );
}

#[test]
fn formula_outlines_close_on_themselves() {
    let rect = Rect::new(0.0, 0.0, 120.0, 80.0);
    for path in [
        sample_formula(&mut EllipseFormula::new(), rect),
        sample_formula(&mut SuperEllipseFormula::try_new(5.0).unwrap(), rect),
    ] {
        let v = path.vertices();
        assert_eq!(v.len(), 361);
        assert_eq!(v.first(), v.last());
        assert!(path.is_closed());
    }
}

#[test]
fn degenerate_rects_do_not_panic() {
    let point = Rect::new(5.0, 5.0, 5.0, 5.0);
    let inverted = Rect::new(10.0, 10.0, 0.0, 0.0);
    for rect in [point, inverted] {
        assert!(round_rect(rect, &CornerSet::uniform(4.0)).is_closed());
        assert!(cut_corner_rect(rect, &CornerSet::uniform(4.0)).is_closed());
        let sampled = sample_formula(&mut SuperEllipseFormula::default(), rect);
        assert!(sampled.vertices().iter().all(|p| p.is_finite()));
    }
}
