//! Outlines: the closed shapes layers are clipped to

use glam::{DVec2, dvec2};

use super::formula::EllipseFormula;
use super::path_builder::{Path, rect_path, sample_formula};
use crate::types::Rect;

/// A closed outline.
///
/// Circles and ovals are kept symbolic so backends can use their native
/// primitives; everything else is a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Rect(Rect),
    Circle { center: DVec2, radius: f64 },
    Oval(Rect),
    Path(Path),
}

impl Outline {
    /// Bounding rect. Empty paths report a zero rect at the origin.
    pub fn bounds(&self) -> Rect {
        match self {
            Outline::Rect(r) | Outline::Oval(r) => *r,
            Outline::Circle { center, radius } => {
                Rect::new(center.x - radius, center.y - radius, center.x + radius, center.y + radius)
            }
            Outline::Path(p) => p.bounds().unwrap_or_default(),
        }
    }

    /// The outline as a path. Circles and ovals become 360-gons.
    pub fn to_path(&self) -> Path {
        match self {
            Outline::Rect(r) => rect_path(*r),
            Outline::Oval(r) => sample_formula(&mut EllipseFormula::new(), *r),
            Outline::Circle { .. } => sample_formula(&mut EllipseFormula::new(), self.bounds()),
            Outline::Path(p) => p.clone(),
        }
    }
}

/// Largest circle centered in `rect`.
pub fn inscribed_circle(rect: Rect) -> Outline {
    Outline::Circle {
        center: dvec2(rect.center_x(), rect.center_y()),
        radius: rect.width().min(rect.height()) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inscribed_circle_uses_short_side() {
        let c = inscribed_circle(Rect::new(10.0, 0.0, 110.0, 60.0));
        assert_eq!(
            c,
            Outline::Circle {
                center: dvec2(60.0, 30.0),
                radius: 30.0
            }
        );
        assert_eq!(c.bounds(), Rect::new(30.0, 0.0, 90.0, 60.0));
    }

    #[test]
    fn curved_outlines_flatten_inside_their_bounds() {
        let oval = Outline::Oval(Rect::new(0.0, 0.0, 80.0, 40.0));
        let path = oval.to_path();
        assert_eq!(path.len(), 362);
        let b = path.bounds().unwrap();
        assert!(b.left >= -1e-9 && b.right <= 80.0 + 1e-9);
        assert!(b.top >= -1e-9 && b.bottom <= 40.0 + 1e-9);
    }

    #[test]
    fn rect_outline_path_has_four_corners() {
        let path = Outline::Rect(Rect::new(0.0, 0.0, 4.0, 3.0)).to_path();
        assert_eq!(path.bounds(), Some(Rect::new(0.0, 0.0, 4.0, 3.0)));
    }
}
