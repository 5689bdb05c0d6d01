//! Default sizes and settings

use crate::types::Color;

pub const BORDER_WIDTH: f64 = 0.0;
pub const BORDER_COLOR: Color = Color::rgb(0x44, 0x44, 0x44);
pub const BORDER_ENABLED: bool = true;

pub const SHADOW_WIDTH: f64 = 0.0;
pub const SHADOW_COLOR: Color = Color::rgb(0x88, 0x88, 0x88);
pub const SHADOW_ENABLED: bool = true;

/// Corner radius or cut size in density-independent pixels.
pub const CORNER_SIZE_DP: f64 = 16.0;

pub const SUPERELLIPSE_CURVATURE: f64 = 3.0;
pub const SQUIRCLE_CURVATURE: f64 = SUPERELLIPSE_CURVATURE;

/// Points per closed formula outline, one per degree.
pub const FORMULA_SAMPLES: u32 = 360;

/// Default corner size in device pixels for a display `density` (pixels per dp).
pub fn corner_size(density: f64) -> f64 {
    CORNER_SIZE_DP * density
}
