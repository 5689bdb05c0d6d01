//! Parametric shape formulas.
//!
//! A formula maps an angle (degrees) and a bounding rect to a point on a
//! closed curve. The outline builder drives it by setting the rect once and
//! then stepping the angle, so the interface is a small piece of mutable
//! state plus two accessors.
//!
//! The built-ins do not share an angle convention:
//!
//! - [`EllipseFormula`] pairs `sin` with x and `cos` with y. Angle 0 sits at
//!   `(cx, cy + rv)`, the bottom of the rect in y-down space, and the curve is
//!   traced counter-clockwise on screen.
//! - [`SuperEllipseFormula`] pairs `cos` with x and `sin` with y. Angle 0 sits
//!   at the right-center point and the curve is traced clockwise on screen.
//!
//! Both are kept as they are; callers relying on a start point must check
//! which formula they hold.

use std::collections::BTreeMap;
use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};
use miette::NamedSource;

use super::defaults;
use crate::errors::ConfigError;
use crate::parse::parse_formula_descriptor;
use crate::types::{Angle, NumericError, Rect, try_positive};

/// Interface every shape formula implements.
#[enum_dispatch]
pub trait ShapeFormula: fmt::Debug {
    /// Current angle, always in `[0, 360)`.
    fn degree(&self) -> Angle;

    /// Set the current angle; values outside `[0, 360)` are wrapped.
    fn set_degree(&mut self, degrees: f64);

    /// The rect currently being traced.
    fn rect(&self) -> Rect;

    fn set_rect(&mut self, rect: Rect);

    /// X position at the current angle.
    fn x(&self) -> f64;

    /// Y position at the current angle.
    fn y(&self) -> f64;

    /// Set rect and angle, then read the point.
    fn sample(&mut self, rect: Rect, degrees: f64) -> DVec2 {
        self.set_rect(rect);
        self.set_degree(degrees);
        dvec2(self.x(), self.y())
    }
}

/// Sign function that returns exactly 0 for 0.
fn sgn(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

// ============================================================================
// Ellipse
// ============================================================================

/// Ellipse inscribed in the rect.
///
/// `x(θ) = rh·sin θ + cx`, `y(θ) = rv·cos θ + cy`
///
/// Note that `x(90°)` is `cx + rh`, not the `cx` some reference tables list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EllipseFormula {
    degree: Angle,
    rect: Rect,
}

impl EllipseFormula {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stateless evaluation, safe to call from anywhere.
    pub fn point_at(rect: Rect, degree: Angle) -> DVec2 {
        let t = degree.radians();
        let rh = rect.width() / 2.0;
        let rv = rect.height() / 2.0;
        dvec2(rh * t.sin() + rect.center_x(), rv * t.cos() + rect.center_y())
    }
}

impl ShapeFormula for EllipseFormula {
    fn degree(&self) -> Angle {
        self.degree
    }

    fn set_degree(&mut self, degrees: f64) {
        self.degree = Angle::wrapped(degrees);
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn x(&self) -> f64 {
        Self::point_at(self.rect, self.degree).x
    }

    fn y(&self) -> f64 {
        Self::point_at(self.rect, self.degree).y
    }
}

// ============================================================================
// Superellipse
// ============================================================================

/// [Superellipse](https://en.wikipedia.org/wiki/Superellipse) inscribed in the rect.
///
/// `x(θ) = sgn(cos θ)·|cos θ|^(2/n)·rh + cx`
/// `y(θ) = sgn(sin θ)·|sin θ|^(2/n)·rv + cy`
///
/// The curvature `n` picks the family member:
///
/// - `0 < n < 1`: astroid-like, concave sides
/// - `n = 1`: diamond
/// - `n = 2`: ellipse
/// - `n > 2`: rounded rectangle ("squircle" around 3 to 5), approaching a
///   rectangle as `n` grows
#[derive(Debug, Clone, PartialEq)]
pub struct SuperEllipseFormula {
    curvature: f64,
    degree: Angle,
    rect: Rect,
}

impl Default for SuperEllipseFormula {
    fn default() -> Self {
        Self {
            curvature: defaults::SUPERELLIPSE_CURVATURE,
            degree: Angle::ZERO,
            rect: Rect::default(),
        }
    }
}

impl SuperEllipseFormula {
    /// Create a superellipse; the curvature must be finite and positive.
    pub fn try_new(curvature: f64) -> Result<Self, NumericError> {
        Ok(Self {
            curvature: try_positive(curvature)?,
            ..Self::default()
        })
    }

    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    /// Stateless evaluation, safe to call from anywhere.
    pub fn point_at(curvature: f64, rect: Rect, degree: Angle) -> DVec2 {
        let t = degree.radians();
        let exponent = 2.0 / curvature;
        let rh = rect.width() / 2.0;
        let rv = rect.height() / 2.0;
        dvec2(
            term(t.cos(), exponent) * rh + rect.center_x(),
            term(t.sin(), exponent) * rv + rect.center_y(),
        )
    }
}

/// `sgn(w)·|w|^e`, exactly 0 when `w` is 0 so `0^e` is never evaluated.
fn term(w: f64, exponent: f64) -> f64 {
    let sign = sgn(w);
    if sign == 0.0 { 0.0 } else { sign * w.abs().powf(exponent) }
}

impl ShapeFormula for SuperEllipseFormula {
    fn degree(&self) -> Angle {
        self.degree
    }

    fn set_degree(&mut self, degrees: f64) {
        self.degree = Angle::wrapped(degrees);
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn x(&self) -> f64 {
        Self::point_at(self.curvature, self.rect, self.degree).x
    }

    fn y(&self) -> f64 {
        Self::point_at(self.curvature, self.rect, self.degree).y
    }
}

// ============================================================================
// Formula enum and registry
// ============================================================================

/// A caller-supplied formula.
#[derive(Debug)]
pub struct CustomFormula(pub Box<dyn ShapeFormula>);

impl ShapeFormula for CustomFormula {
    fn degree(&self) -> Angle {
        self.0.degree()
    }

    fn set_degree(&mut self, degrees: f64) {
        self.0.set_degree(degrees)
    }

    fn rect(&self) -> Rect {
        self.0.rect()
    }

    fn set_rect(&mut self, rect: Rect) {
        self.0.set_rect(rect)
    }

    fn x(&self) -> f64 {
        self.0.x()
    }

    fn y(&self) -> f64 {
        self.0.y()
    }
}

/// Any formula a shaped image can be configured with.
#[enum_dispatch(ShapeFormula)]
#[derive(Debug)]
pub enum Formula {
    Ellipse(EllipseFormula),
    SuperEllipse(SuperEllipseFormula),
    Custom(CustomFormula),
}

impl Formula {
    /// Wrap a user formula.
    pub fn custom(formula: impl ShapeFormula + 'static) -> Self {
        Formula::Custom(CustomFormula(Box::new(formula)))
    }
}

/// Builds a formula from descriptor arguments; the error string is shown to the user.
pub type FormulaCtor = fn(&[f64]) -> Result<Formula, String>;

/// Name → constructor table for formulas selected by descriptor.
///
/// Resolution happens at configuration time and fails loudly, so a typo never
/// turns into a silently blank image.
#[derive(Clone)]
pub struct FormulaRegistry {
    ctors: BTreeMap<String, FormulaCtor>,
}

impl fmt::Debug for FormulaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ctors.keys()).finish()
    }
}

impl Default for FormulaRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("ellipse", ellipse_ctor);
        registry.register("superellipse", superellipse_ctor);
        registry.register("squircle", squircle_ctor);
        registry
    }
}

impl FormulaRegistry {
    /// A registry with the built-in formulas.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self { ctors: BTreeMap::new() }
    }

    /// Register or replace a constructor. Names are matched case-insensitively.
    pub fn register(&mut self, name: &str, ctor: FormulaCtor) {
        self.ctors.insert(name.to_ascii_lowercase(), ctor);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ctors.keys().map(String::as_str)
    }

    /// Parse `descriptor` and build the formula it names.
    pub fn resolve(&self, descriptor: &str) -> Result<Formula, ConfigError> {
        let parsed = parse_formula_descriptor(descriptor)?;
        let key = parsed.name.to_ascii_lowercase();

        let Some(ctor) = self.ctors.get(&key) else {
            let known: Vec<&str> = self.names().collect();
            return Err(ConfigError::UnknownFormula {
                name: parsed.name.to_string(),
                src: NamedSource::new("formula descriptor", descriptor.to_string()),
                span: parsed.name_span,
                suggestion: if known.is_empty() {
                    None
                } else {
                    Some(format!("registered formulas: {}", known.join(", ")))
                },
            });
        };

        crate::log::debug!(name = %key, args = ?parsed.args, "resolving formula");

        ctor(&parsed.args).map_err(|message| ConfigError::InvalidFormulaArgument {
            name: parsed.name.to_string(),
            message,
            src: NamedSource::new("formula descriptor", descriptor.to_string()),
            span: parsed.args_span,
        })
    }
}

fn ellipse_ctor(args: &[f64]) -> Result<Formula, String> {
    match args {
        [] => Ok(EllipseFormula::new().into()),
        _ => Err(format!("expected no arguments, got {}", args.len())),
    }
}

fn superellipse_ctor(args: &[f64]) -> Result<Formula, String> {
    let curvature = match args {
        [] => defaults::SUPERELLIPSE_CURVATURE,
        [n] => *n,
        _ => return Err(format!("expected at most one argument (curvature), got {}", args.len())),
    };
    SuperEllipseFormula::try_new(curvature)
        .map(Formula::from)
        .map_err(|e| format!("curvature {curvature}: {e}"))
}

fn squircle_ctor(args: &[f64]) -> Result<Formula, String> {
    match args {
        [] => superellipse_ctor(&[defaults::SQUIRCLE_CURVATURE]),
        _ => Err(format!("expected no arguments, got {}", args.len())),
    }
}
