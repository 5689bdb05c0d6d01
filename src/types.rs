//! Numeric and geometric primitives shared by the geometry engine.
//!
//! Everything here is in device pixels (`f64`) unless stated otherwise.
//! Rectangles follow screen convention: y grows downward.

use std::fmt;
use std::ops::Add;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a finite, non-negative value (widths, sizes).
#[inline]
pub fn try_non_negative(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Validate a finite, strictly positive value (curvatures, ratios).
#[inline]
pub fn try_positive(val: f64) -> Result<f64, NumericError> {
    let val = try_non_negative(val)?;
    if val == 0.0 { Err(NumericError::Zero) } else { Ok(val) }
}

/// Angle in degrees.
///
/// Setting an angle through [`Angle::wrapped`] folds it into `[0, 360)`, so
/// `360` becomes `0` and `-90` becomes `270`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Fold `degrees` into `[0, 360)`.
    #[inline]
    pub fn wrapped(degrees: f64) -> Angle {
        let d = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if d >= 360.0 { Angle(0.0) } else { Angle(d) }
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Packed ARGB color, as handed over by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const TRANSPARENT: Color = Color(0);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Color {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::argb(0xFF, r, g, b)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
        } else {
            write!(
                f,
                "rgba({},{},{},{:.3})",
                self.red(),
                self.green(),
                self.blue(),
                self.alpha() as f64 / 255.0
            )
        }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> Size<T> {
    pub fn new(w: T, h: T) -> Self {
        Size { w, h }
    }
}

impl Size<u32> {
    /// Widen to floating point for geometry.
    pub fn to_f64(self) -> Size<f64> {
        Size { w: self.w as f64, h: self.h as f64 }
    }
}

/// Per-side distances (padding, insets)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets::uniform(0.0);

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Insets { left, top, right, bottom }
    }

    pub const fn uniform(v: f64) -> Self {
        Insets { left: v, top: v, right: v, bottom: v }
    }

    /// Grow every side by `amount`.
    pub fn grow(self, amount: f64) -> Self {
        self + Insets::uniform(amount)
    }
}

impl Add for Insets {
    type Output = Insets;
    fn add(self, rhs: Insets) -> Insets {
        Insets {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

/// Axis-aligned rectangle in left/top/right/bottom form.
///
/// Zero-sized and inverted rects are representable; nothing here clamps them.
/// Use [`Rect::is_degenerate`] before drawing.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Rect { left, top, right, bottom }
    }

    /// Rect at the origin covering `size`.
    pub fn from_size(size: Size<f64>) -> Self {
        Rect::new(0.0, 0.0, size.w, size.h)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size<f64> {
        Size { w: self.width(), h: self.height() }
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) * 0.5
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) * 0.5
    }

    pub fn center(&self) -> DVec2 {
        dvec2(self.center_x(), self.center_y())
    }

    pub fn origin(&self) -> DVec2 {
        dvec2(self.left, self.top)
    }

    /// Move each edge inward by the matching inset. Never clamps.
    pub fn inset(&self, insets: Insets) -> Rect {
        Rect {
            left: self.left + insets.left,
            top: self.top + insets.top,
            right: self.right - insets.right,
            bottom: self.bottom - insets.bottom,
        }
    }

    /// True when the rect has negative extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() < 0.0 || self.height() < 0.0
    }

    /// True when the rect covers no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Smallest rect containing every point, `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Rect> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Rect::new(min.x, min.y, max.x, max.y))
    }
}

/// Four per-corner magnitudes, clockwise from the top-left.
///
/// Used for round-rect radii and for cut-corner sizes. Values are not
/// validated: negative or oversized entries produce malformed outlines.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CornerSet {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerSet {
    pub const ZERO: CornerSet = CornerSet::uniform(0.0);

    pub const fn new(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        CornerSet { top_left, top_right, bottom_right, bottom_left }
    }

    pub const fn uniform(v: f64) -> Self {
        CornerSet::new(v, v, v, v)
    }

    /// Add `amount` to every corner.
    pub fn expanded(self, amount: f64) -> Self {
        CornerSet {
            top_left: self.top_left + amount,
            top_right: self.top_right + amount,
            bottom_right: self.bottom_right + amount,
            bottom_left: self.bottom_left + amount,
        }
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn to_array(self) -> [f64; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}
