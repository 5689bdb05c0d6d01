//! Layout measurement: how large a shaped image wants to be.

use crate::types::Size;

/// How a parent constrains one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureMode {
    /// The size is final.
    Exactly,
    /// The size is an upper bound.
    AtMost,
    /// No constraint; the size is a hint.
    #[default]
    Unspecified,
}

/// One axis of a layout constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasureSpec {
    pub size: u32,
    pub mode: MeasureMode,
}

impl MeasureSpec {
    pub const fn new(size: u32, mode: MeasureMode) -> Self {
        Self { size, mode }
    }

    pub const fn exactly(size: u32) -> Self {
        Self::new(size, MeasureMode::Exactly)
    }

    pub const fn at_most(size: u32) -> Self {
        Self::new(size, MeasureMode::AtMost)
    }
}

/// Resolve the measured size.
///
/// Square shapes take the smaller side on both axes and ignore the aspect
/// ratio. Otherwise, with a `width / height` ratio, the free axis is derived
/// from the constrained one. Derived sides are truncated.
pub fn measure(width: MeasureSpec, height: MeasureSpec, force_square: bool, aspect_ratio: Option<f64>) -> Size<u32> {
    let (w, h) = (width.size, height.size);

    if force_square {
        let s = w.min(h);
        return Size::new(s, s);
    }

    let Some(ratio) = aspect_ratio else {
        return Size::new(w, h);
    };

    let by_height = || Size::new((h as f64 * ratio) as u32, h);
    let by_width = || Size::new(w, (w as f64 / ratio) as u32);

    if w == 0 {
        by_height()
    } else if h == 0 {
        by_width()
    } else if width.mode == MeasureMode::Exactly {
        by_width()
    } else if height.mode == MeasureMode::Exactly {
        by_height()
    } else {
        by_width()
    }
}
