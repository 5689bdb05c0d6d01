//! Layer rectangles for a laid-out view.

use super::types::{Border, Shadow};
use crate::types::{Insets, Rect, Size};

/// The three nested rects a frame is drawn into.
///
/// Recomputed whenever the size, padding, border or shadow changes. Rects are
/// not clamped: large insets on a small view yield rects with negative extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub shadow_rect: Rect,
    pub border_rect: Rect,
    pub image_rect: Rect,
    pub shadow_enabled: bool,
    pub border_enabled: bool,
}

impl Bounds {
    /// Shadow rect, when the shadow is drawn.
    pub fn shadow(&self) -> Option<Rect> {
        self.shadow_enabled.then_some(self.shadow_rect)
    }

    /// Border rect, when the border is drawn.
    pub fn border(&self) -> Option<Rect> {
        self.border_enabled.then_some(self.border_rect)
    }
}

/// Compute the layer rects for a view of `view` pixels.
///
/// The shadow and border rects share one inset (padding plus shadow width);
/// the image rect is further inset by the border width. Disabled decorations
/// contribute nothing.
pub fn compute_bounds(view: Size<f64>, padding: Insets, border: &Border, shadow: &Shadow) -> Bounds {
    let shadow_adj = shadow.effective_width();
    let border_adj = border.effective_width();

    let view_rect = Rect::from_size(view);
    let outer = view_rect.inset(padding.grow(shadow_adj));
    let image_rect = view_rect.inset(padding.grow(shadow_adj + border_adj));

    crate::log::debug!(
        view_w = view.w,
        view_h = view.h,
        shadow_adj,
        border_adj,
        ?image_rect,
        "bounds recomputed"
    );

    Bounds {
        shadow_rect: outer,
        border_rect: outer,
        image_rect,
        shadow_enabled: shadow.enabled,
        border_enabled: border.enabled,
    }
}
