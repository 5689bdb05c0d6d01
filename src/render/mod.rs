//! Shape geometry and image placement
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `types`: Decoration settings and the `Frame` handed to the host
//! - `bounds`: Layer rectangles from size, padding, border and shadow
//! - `path_builder`: Round-rect, cut-corner and formula outlines
//! - `formula`: Parametric shape formulas and their registry
//! - `fit`: Image-to-rect matrices per fit policy
//! - `geometry`: The `Outline` sum type
//! - `measure`: Layout measurement
//! - `cache`: Single-slot source image cache
//! - `svg`: SVG output for previews
//!
//! [`ShapedImage`] ties these together: configure it once, lay it out, then
//! call [`ShapedImage::render`] per frame.

pub mod bounds;
pub mod cache;
pub mod defaults;
pub mod fit;
pub mod formula;
pub mod geometry;
pub mod measure;
pub mod path_builder;
pub mod svg;
pub mod types;

pub use bounds::{Bounds, compute_bounds};
pub use cache::{ImageSlot, RasterImage};
pub use fit::{FitMatrix, FitPolicy, PolicySupport, compute_matrix};
pub use formula::{CustomFormula, EllipseFormula, Formula, FormulaRegistry, ShapeFormula, SuperEllipseFormula};
pub use geometry::{Outline, inscribed_circle};
pub use measure::{MeasureMode, MeasureSpec, measure};
pub use path_builder::{Path, PathBuilder, PathCommand, cut_corner_rect, round_rect, sample_formula};
pub use types::*;

use std::sync::Arc;

use glam::dvec2;

use crate::errors::ConfigError;
use crate::parse::parse_aspect_ratio;
use crate::types::{CornerSet, Insets, Rect, Size, try_non_negative, try_positive};

/// Which outline the image is clipped to.
#[derive(Debug)]
pub enum ShapeKind {
    /// Circle inscribed in the layer rect.
    Circle,
    /// Ellipse filling the layer rect.
    Oval,
    /// The layer rect itself.
    Square,
    /// Rounded rect with per-corner radii.
    RoundRect(CornerSet),
    /// Rect with per-corner chamfers.
    CutCorner(CornerSet),
    /// Any parametric formula, sampled at one-degree steps.
    Formula(Formula),
}

impl ShapeKind {
    /// Round rect with the default corner radius at `density` pixels per dp.
    pub fn default_round_rect(density: f64) -> Self {
        ShapeKind::RoundRect(CornerSet::uniform(defaults::corner_size(density)))
    }

    /// Cut-corner rect with the default cut size at `density` pixels per dp.
    pub fn default_cut_corner(density: f64) -> Self {
        ShapeKind::CutCorner(CornerSet::uniform(defaults::corner_size(density)))
    }

    /// Circles and squares are laid out square unless told otherwise.
    pub fn is_square_by_default(&self) -> bool {
        matches!(self, ShapeKind::Circle | ShapeKind::Square)
    }

    fn outline(&mut self, rect: Rect, kind: LayerKind, border_width: f64) -> Outline {
        let decoration = kind != LayerKind::Image;
        match self {
            ShapeKind::Circle => inscribed_circle(rect),
            ShapeKind::Oval => Outline::Oval(rect),
            ShapeKind::Square => Outline::Rect(rect),
            ShapeKind::RoundRect(radii) => {
                let radii = if decoration { radii.expanded(border_width) } else { *radii };
                Outline::Path(round_rect(rect, &radii))
            }
            ShapeKind::CutCorner(cuts) => {
                let cuts = if decoration { cuts.expanded(border_width / 2.0) } else { *cuts };
                Outline::Path(cut_corner_rect(rect, &cuts))
            }
            ShapeKind::Formula(formula) => Outline::Path(sample_formula(formula, rect)),
        }
    }
}

impl From<Formula> for ShapeKind {
    fn from(formula: Formula) -> Self {
        ShapeKind::Formula(formula)
    }
}

/// A configured shaped image.
///
/// Holds the shape, decorations, fit policy, the last laid-out size and the
/// most recent source image. Rendering is synchronous and needs `&mut self`
/// because formula outlines are traced by mutating the formula.
#[derive(Debug)]
pub struct ShapedImage<I> {
    shape: ShapeKind,
    force_square: bool,
    aspect_ratio: Option<f64>,
    padding: Insets,
    border: Border,
    shadow: Shadow,
    fit: FitPolicy,
    support: PolicySupport,
    image: ImageSlot<I>,
    size: Size<f64>,
}

impl<I: RasterImage> ShapedImage<I> {
    pub fn new(shape: impl Into<ShapeKind>) -> Self {
        let shape = shape.into();
        Self {
            force_square: shape.is_square_by_default(),
            shape,
            aspect_ratio: None,
            padding: Insets::ZERO,
            border: Border::default(),
            shadow: Shadow::default(),
            fit: FitPolicy::default(),
            support: PolicySupport::default(),
            image: ImageSlot::new(),
            size: Size::default(),
        }
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_force_square(mut self, force_square: bool) -> Self {
        self.force_square = force_square;
        self
    }

    pub fn with_size(mut self, size: Size<f64>) -> Self {
        self.set_size(size);
        self
    }

    pub fn with_support(mut self, support: PolicySupport) -> Result<Self, ConfigError> {
        self.set_support(support)?;
        Ok(self)
    }

    pub fn with_fit_policy(mut self, policy: FitPolicy) -> Result<Self, ConfigError> {
        self.set_fit_policy(policy)?;
        Ok(self)
    }

    pub fn with_aspect_ratio(mut self, ratio: &str) -> Result<Self, ConfigError> {
        self.set_aspect_ratio_str(ratio)?;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    pub fn set_shape(&mut self, shape: impl Into<ShapeKind>) {
        self.shape = shape.into();
    }

    /// Replace the shape with the formula `descriptor` names.
    pub fn set_formula(&mut self, registry: &FormulaRegistry, descriptor: &str) -> Result<(), ConfigError> {
        self.shape = ShapeKind::Formula(registry.resolve(descriptor)?);
        Ok(())
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn set_border_width(&mut self, width: f64) -> Result<(), ConfigError> {
        self.border.width = try_non_negative(width).map_err(ConfigError::number("border width"))?;
        Ok(())
    }

    pub fn set_border_enabled(&mut self, enabled: bool) {
        self.border.enabled = enabled;
    }

    pub fn set_shadow_width(&mut self, width: f64) -> Result<(), ConfigError> {
        self.shadow.width = try_non_negative(width).map_err(ConfigError::number("shadow width"))?;
        Ok(())
    }

    pub fn set_shadow_enabled(&mut self, enabled: bool) {
        self.shadow.enabled = enabled;
    }

    /// Set the fit policy, rejecting it if the support level does not allow it.
    pub fn set_fit_policy(&mut self, policy: FitPolicy) -> Result<(), ConfigError> {
        self.fit = self.support.check(policy)?;
        Ok(())
    }

    /// Change the support level. Fails, leaving everything unchanged, when the
    /// current fit policy is not allowed at the new level.
    pub fn set_support(&mut self, support: PolicySupport) -> Result<(), ConfigError> {
        support.check(self.fit)?;
        self.support = support;
        Ok(())
    }

    /// Set a `width / height` ratio, or `None` to follow the parent's size.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> Result<(), ConfigError> {
        self.aspect_ratio = ratio
            .map(try_positive)
            .transpose()
            .map_err(ConfigError::number("aspect ratio"))?;
        Ok(())
    }

    /// Set the aspect ratio from `"W:H"`; blank clears it.
    pub fn set_aspect_ratio_str(&mut self, ratio: &str) -> Result<(), ConfigError> {
        self.aspect_ratio = parse_aspect_ratio(ratio)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn force_square(&self) -> bool {
        self.force_square
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn border(&self) -> &Border {
        &self.border
    }

    pub fn shadow(&self) -> &Shadow {
        &self.shadow
    }

    pub fn fit_policy(&self) -> FitPolicy {
        self.fit
    }

    pub fn support(&self) -> PolicySupport {
        self.support
    }

    pub fn size(&self) -> Size<f64> {
        self.size
    }

    /// The cached source image, if one was ever supplied.
    pub fn image(&self) -> Option<&Arc<I>> {
        self.image.get()
    }

    // ------------------------------------------------------------------
    // Layout and drawing
    // ------------------------------------------------------------------

    /// Preferred size under the parent's constraints.
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size<u32> {
        measure(width, height, self.force_square, self.aspect_ratio)
    }

    /// Record the laid-out size.
    pub fn set_size(&mut self, size: Size<f64>) {
        self.size = size;
    }

    /// Layer rects for the current size and decorations.
    pub fn bounds(&self) -> Bounds {
        compute_bounds(self.size, self.padding, &self.border, &self.shadow)
    }

    /// Build the draw list for one frame.
    ///
    /// `image` refreshes the cached source image; `None` keeps the previous
    /// one. Layers are shadow, border, image, each present only when enabled
    /// and when its rect has non-negative extent. No image layer is emitted
    /// until an image has been supplied.
    pub fn render(&mut self, image: Option<&Arc<I>>) -> Frame {
        self.image.refresh(image);

        let bounds = self.bounds();
        let border_width = self.border.effective_width();
        let mut layers = Vec::with_capacity(3);

        if let Some(rect) = bounds.shadow() {
            if let Some(rect) = drawable(rect, LayerKind::Shadow) {
                layers.push(Layer {
                    kind: LayerKind::Shadow,
                    outline: self.shape.outline(rect, LayerKind::Shadow, border_width),
                    paint: Paint::Shadow {
                        color: self.shadow.color,
                        blur: self.shadow.width,
                        offset: dvec2(0.0, self.shadow.width / 2.0),
                    },
                });
            }
        }

        if let Some(rect) = bounds.border() {
            if let Some(rect) = drawable(rect, LayerKind::Border) {
                layers.push(Layer {
                    kind: LayerKind::Border,
                    outline: self.shape.outline(rect, LayerKind::Border, border_width),
                    paint: Paint::Fill(self.border.color),
                });
            }
        }

        let image_size = self.image.get().map(|image| image.size());
        if let Some(image_size) = image_size {
            if let Some(rect) = drawable(bounds.image_rect, LayerKind::Image) {
                layers.push(Layer {
                    kind: LayerKind::Image,
                    outline: self.shape.outline(rect, LayerKind::Image, border_width),
                    paint: Paint::Image {
                        matrix: compute_matrix(image_size, rect, self.fit),
                        image_size,
                    },
                });
            }
        }

        Frame { layers }
    }
}

fn drawable(rect: Rect, kind: LayerKind) -> Option<Rect> {
    if rect.is_degenerate() {
        crate::log::warn!(?kind, ?rect, "layer rect has negative extent, skipping");
        None
    } else {
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[derive(Debug)]
    struct Img(u32, u32);

    impl RasterImage for Img {
        fn size(&self) -> Size<u32> {
            Size::new(self.0, self.1)
        }
    }

    fn decorated(shape: ShapeKind) -> ShapedImage<Img> {
        ShapedImage::new(shape)
            .with_border(Border::try_new(10.0, Color::rgb(0x11, 0x22, 0x33)).unwrap())
            .with_shadow(Shadow::try_new(5.0, Color::rgb(0x88, 0x88, 0x88)).unwrap())
            .with_size(Size::new(200.0, 200.0))
    }

    #[test]
    fn layers_draw_back_to_front() {
        let mut view = decorated(ShapeKind::Circle);
        let frame = view.render(Some(&Arc::new(Img(400, 200))));
        let kinds: Vec<_> = frame.layers.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, [LayerKind::Shadow, LayerKind::Border, LayerKind::Image]);

        let shadow = frame.layer(LayerKind::Shadow).unwrap();
        assert_eq!(
            shadow.paint,
            Paint::Shadow {
                color: Color::rgb(0x88, 0x88, 0x88),
                blur: 5.0,
                offset: dvec2(0.0, 2.5)
            }
        );

        let image = frame.layer(LayerKind::Image).unwrap();
        assert_eq!(image.outline.bounds(), Rect::new(15.0, 15.0, 185.0, 185.0));
        match image.paint {
            Paint::Image { matrix, image_size } => {
                assert_eq!(image_size, Size::new(400, 200));
                // Landscape into square: scaled by height, cropped left and right.
                assert_eq!(matrix, FitMatrix::uniform(0.85, -70.0, 15.0));
            }
            other => panic!("unexpected paint {other:?}"),
        }
    }

    #[test]
    fn no_image_layer_until_an_image_arrives() {
        let mut view = decorated(ShapeKind::Oval);
        let frame = view.render(None);
        assert!(frame.layer(LayerKind::Image).is_none());
        assert_eq!(frame.layers.len(), 2);

        view.render(Some(&Arc::new(Img(10, 10))));
        let frame = view.render(None);
        assert!(frame.layer(LayerKind::Image).is_some());
    }

    #[test]
    fn disabled_decorations_are_skipped() {
        let mut view = decorated(ShapeKind::Square);
        view.set_border_enabled(false);
        view.set_shadow_enabled(false);
        let frame = view.render(Some(&Arc::new(Img(1, 1))));
        assert_eq!(frame.layers.len(), 1);
        assert_eq!(frame.layers[0].outline, Outline::Rect(Rect::new(0.0, 0.0, 200.0, 200.0)));
    }

    #[test]
    fn degenerate_layers_are_skipped() {
        let mut view = decorated(ShapeKind::Circle).with_size(Size::new(24.0, 24.0));
        let frame = view.render(Some(&Arc::new(Img(8, 8))));
        // 24 - 2 * 15 < 0 for the image, the decorations still fit.
        let kinds: Vec<_> = frame.layers.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, [LayerKind::Shadow, LayerKind::Border]);
    }

    #[test]
    fn round_rect_decorations_grow_their_radii() {
        let mut view = decorated(ShapeKind::RoundRect(CornerSet::new(8.0, 12.0, 16.0, 24.0)));
        let frame = view.render(Some(&Arc::new(Img(4, 4))));

        let Outline::Path(border) = &frame.layer(LayerKind::Border).unwrap().outline else {
            panic!("round rect border should be a path");
        };
        let Outline::Path(image) = &frame.layer(LayerKind::Image).unwrap().outline else {
            panic!("round rect image should be a path");
        };

        // Border rect starts at (5, 5) with top-left radius 8 + 10.
        assert_eq!(border.commands()[0], PathCommand::MoveTo(dvec2(5.0, 23.0)));
        // Image rect starts at (15, 15) with the configured radius.
        assert_eq!(image.commands()[0], PathCommand::MoveTo(dvec2(15.0, 23.0)));
        assert_eq!(frame.layer(LayerKind::Shadow).unwrap().outline, frame.layer(LayerKind::Border).unwrap().outline);
    }

    #[test]
    fn cut_corner_decorations_grow_by_half_the_border() {
        let mut view = decorated(ShapeKind::CutCorner(CornerSet::uniform(6.0)));
        let frame = view.render(None);
        let Outline::Path(border) = &frame.layer(LayerKind::Border).unwrap().outline else {
            panic!("cut corner border should be a path");
        };
        assert_eq!(border.commands()[0], PathCommand::MoveTo(dvec2(5.0, 16.0)));
    }

    #[test]
    fn formula_shapes_trace_every_layer() {
        let registry = FormulaRegistry::new();
        let mut view = decorated(ShapeKind::Square);
        view.set_formula(&registry, "superellipse(4)").unwrap();
        let frame = view.render(Some(&Arc::new(Img(3, 2))));
        for layer in &frame.layers {
            let Outline::Path(path) = &layer.outline else {
                panic!("formula layers are paths");
            };
            assert_eq!(path.len(), 362);
        }
    }

    #[test]
    fn basic_support_restricts_fit_policies() {
        let mut view = decorated(ShapeKind::Circle);
        view.set_fit_policy(FitPolicy::FitCenter).unwrap();

        // Lowering the support level re-checks the current policy.
        assert!(matches!(
            view.set_support(PolicySupport::Basic),
            Err(ConfigError::UnsupportedFitPolicy { policy: FitPolicy::FitCenter, .. })
        ));
        assert_eq!(view.support(), PolicySupport::Full);

        view.set_fit_policy(FitPolicy::FitXy).unwrap();
        view.set_support(PolicySupport::Basic).unwrap();
        assert!(view.set_fit_policy(FitPolicy::CenterInside).is_err());
        assert_eq!(view.fit_policy(), FitPolicy::FitXy);
    }

    #[test]
    fn center_crop_only_shapes() {
        let mut view = decorated(ShapeKind::Oval);
        view.set_support(PolicySupport::CenterCropOnly).unwrap();

        for policy in FitPolicy::ALL {
            let result = view.set_fit_policy(policy);
            assert_eq!(result.is_ok(), policy == FitPolicy::CenterCrop, "{policy}");
        }
        assert_eq!(view.fit_policy(), FitPolicy::CenterCrop);

        // A view already using another policy cannot be narrowed.
        let mut fitted = decorated(ShapeKind::Oval);
        fitted.set_fit_policy(FitPolicy::FitXy).unwrap();
        assert!(fitted.set_support(PolicySupport::CenterCropOnly).is_err());
        assert_eq!(fitted.support(), PolicySupport::Full);
    }

    #[test]
    fn square_shapes_measure_square() {
        let circle: ShapedImage<Img> = ShapedImage::new(ShapeKind::Circle);
        assert!(circle.force_square());
        assert_eq!(
            circle.measure(MeasureSpec::exactly(300), MeasureSpec::exactly(200)),
            Size::new(200, 200)
        );

        let oval: ShapedImage<Img> = ShapedImage::new(ShapeKind::Oval).with_aspect_ratio("2:1").unwrap();
        assert!(!oval.force_square());
        assert_eq!(
            oval.measure(MeasureSpec::exactly(300), MeasureSpec::at_most(1000)),
            Size::new(300, 150)
        );
    }

    #[test]
    fn setters_validate_numbers() {
        let mut view: ShapedImage<Img> = ShapedImage::new(ShapeKind::Oval);
        assert!(view.set_border_width(-2.0).is_err());
        assert!(view.set_shadow_width(f64::INFINITY).is_err());
        assert!(view.set_aspect_ratio(Some(0.0)).is_err());
        view.set_aspect_ratio(Some(1.5)).unwrap();
        assert_eq!(view.aspect_ratio(), Some(1.5));
        view.set_aspect_ratio_str("").unwrap();
        assert_eq!(view.aspect_ratio(), None);
    }

    #[test]
    fn default_corner_sizes_scale_with_density() {
        match ShapeKind::default_round_rect(2.0) {
            ShapeKind::RoundRect(radii) => assert_eq!(radii, CornerSet::uniform(32.0)),
            other => panic!("unexpected shape {other:?}"),
        }
        assert!(matches!(ShapeKind::default_cut_corner(1.0), ShapeKind::CutCorner(c) if c == CornerSet::uniform(16.0)));
    }
}
