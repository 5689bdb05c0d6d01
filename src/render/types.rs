//! Value types for rendering: decoration settings and the frame handed to the host

use glam::DVec2;

use super::defaults;
use super::fit::FitMatrix;
use super::geometry::Outline;
use crate::errors::ConfigError;
use crate::types::{Color, Size, try_non_negative};

/// Border drawn as a filled shape behind the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f64,
    pub color: Color,
    pub enabled: bool,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            width: defaults::BORDER_WIDTH,
            color: defaults::BORDER_COLOR,
            enabled: defaults::BORDER_ENABLED,
        }
    }
}

impl Border {
    /// Enabled border of the given width, checked for NaN and negatives.
    pub fn try_new(width: f64, color: Color) -> Result<Self, ConfigError> {
        Ok(Self {
            width: try_non_negative(width).map_err(ConfigError::number("border width"))?,
            color,
            enabled: true,
        })
    }

    /// Width that actually takes up space: 0 when disabled.
    pub fn effective_width(&self) -> f64 {
        if self.enabled { self.width } else { 0.0 }
    }
}

/// Drop shadow behind the border and image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub width: f64,
    pub color: Color,
    pub enabled: bool,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            width: defaults::SHADOW_WIDTH,
            color: defaults::SHADOW_COLOR,
            enabled: defaults::SHADOW_ENABLED,
        }
    }
}

impl Shadow {
    pub fn try_new(width: f64, color: Color) -> Result<Self, ConfigError> {
        Ok(Self {
            width: try_non_negative(width).map_err(ConfigError::number("shadow width"))?,
            color,
            enabled: true,
        })
    }

    pub fn effective_width(&self) -> f64 {
        if self.enabled { self.width } else { 0.0 }
    }
}

/// How a layer's outline is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Solid color fill.
    Fill(Color),
    /// Shadow fill: the outline offset by `offset` and blurred by `blur`.
    Shadow { color: Color, blur: f64, offset: DVec2 },
    /// The source image, placed with `matrix` and clipped to the outline.
    Image { matrix: FitMatrix, image_size: Size<u32> },
}

/// Which part of the widget a layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Shadow,
    Border,
    Image,
}

/// One draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub outline: Outline,
    pub paint: Paint,
}

/// Everything needed to draw one frame, in back-to-front order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub layers: Vec<Layer>,
}

impl Frame {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    #[test]
    fn decoration_defaults() {
        let border = Border::default();
        assert_eq!(border.color.to_string(), "#444444");
        assert_eq!(border.width, 0.0);
        assert!(border.enabled);

        let shadow = Shadow::default();
        assert_eq!(shadow.color.to_string(), "#888888");
        assert!(shadow.enabled);
    }

    #[test]
    fn disabled_decorations_take_no_space() {
        let mut border = Border::try_new(6.0, Color::BLACK).unwrap();
        assert_eq!(border.effective_width(), 6.0);
        border.enabled = false;
        assert_eq!(border.effective_width(), 0.0);
    }

    #[test]
    fn widths_are_validated() {
        let err = Border::try_new(-1.0, Color::BLACK).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { field: "border width", source: NumericError::Negative }
        ));
        assert!(Shadow::try_new(f64::NAN, Color::BLACK).is_err());
    }
}
