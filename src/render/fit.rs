//! Mapping a source image onto a destination rect.
//!
//! Every policy reduces to an axis-aligned scale plus a translation. The
//! translation already includes the destination rect's origin, so the matrix
//! can be handed to a drawing backend as-is.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};
use miette::{NamedSource, SourceSpan};

use crate::errors::ConfigError;
use crate::types::{Rect, Size};

/// Scale followed by translation: `p' = p * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitMatrix {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for FitMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FitMatrix {
    pub const IDENTITY: FitMatrix = FitMatrix {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Uniform scale with a translation.
    pub const fn uniform(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        FitMatrix {
            scale_x: scale,
            scale_y: scale,
            translate_x,
            translate_y,
        }
    }

    pub fn scale(&self) -> DVec2 {
        dvec2(self.scale_x, self.scale_y)
    }

    pub fn translation(&self) -> DVec2 {
        dvec2(self.translate_x, self.translate_y)
    }

    pub fn map_point(&self, p: DVec2) -> DVec2 {
        p * self.scale() + self.translation()
    }

    /// Where an image of `size` lands after mapping.
    pub fn map_rect(&self, size: Size<u32>) -> Rect {
        let size = size.to_f64();
        let a = self.map_point(DVec2::ZERO);
        let b = self.map_point(dvec2(size.w, size.h));
        Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }
}

/// How an image is placed in its destination rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FitPolicy {
    /// Use the given matrix unchanged.
    Matrix(FitMatrix),
    /// Stretch each axis independently to fill the rect.
    FitXy,
    /// Fit inside, aligned to the top/left.
    FitStart,
    /// Fit inside, centered.
    FitCenter,
    /// Fit inside, aligned to the bottom/right.
    FitEnd,
    /// No scaling, centered.
    Center,
    /// Cover the rect, centered on the overflowing axis.
    #[default]
    CenterCrop,
    /// Like `Center`, shrinking to fit when the image is too large.
    CenterInside,
}

impl FitPolicy {
    /// Every policy by name, in declaration order.
    pub const NAMES: [&'static str; 8] = [
        "matrix",
        "fit-xy",
        "fit-start",
        "fit-center",
        "fit-end",
        "center",
        "center-crop",
        "center-inside",
    ];

    /// One of each policy, `Matrix` carrying the identity.
    pub const ALL: [FitPolicy; 8] = [
        FitPolicy::Matrix(FitMatrix::IDENTITY),
        FitPolicy::FitXy,
        FitPolicy::FitStart,
        FitPolicy::FitCenter,
        FitPolicy::FitEnd,
        FitPolicy::Center,
        FitPolicy::CenterCrop,
        FitPolicy::CenterInside,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FitPolicy::Matrix(_) => "matrix",
            FitPolicy::FitXy => "fit-xy",
            FitPolicy::FitStart => "fit-start",
            FitPolicy::FitCenter => "fit-center",
            FitPolicy::FitEnd => "fit-end",
            FitPolicy::Center => "center",
            FitPolicy::CenterCrop => "center-crop",
            FitPolicy::CenterInside => "center-inside",
        }
    }
}

impl fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitPolicy {
    type Err = ConfigError;

    /// Case-insensitive; `_` and `-` are interchangeable. `matrix` yields the identity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let normalized = name.to_ascii_lowercase().replace('_', "-");
        FitPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == normalized)
            .ok_or_else(|| {
                let start = s.len() - s.trim_start().len();
                ConfigError::UnknownFitPolicy {
                    name: name.to_string(),
                    src: NamedSource::new("fit policy", s.to_string()),
                    span: (start, name.len()).into(),
                    accepted: Some(format!("expected one of: {}", FitPolicy::NAMES.join(", "))),
                }
            })
    }
}

/// Which fit policies a host or shape can honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicySupport {
    /// Every policy.
    #[default]
    Full,
    /// Only `Matrix`, `FitXy` and `CenterCrop`.
    Basic,
    /// Only `CenterCrop`, the one policy every shape can draw.
    CenterCropOnly,
}

impl PolicySupport {
    pub fn allows(self, policy: &FitPolicy) -> bool {
        match self {
            PolicySupport::Full => true,
            PolicySupport::Basic => matches!(
                policy,
                FitPolicy::Matrix(_) | FitPolicy::FitXy | FitPolicy::CenterCrop
            ),
            PolicySupport::CenterCropOnly => matches!(policy, FitPolicy::CenterCrop),
        }
    }

    /// Names of the policies this level allows, in declaration order.
    pub fn accepted_names(self) -> Vec<&'static str> {
        FitPolicy::ALL
            .iter()
            .filter(|policy| self.allows(policy))
            .map(FitPolicy::name)
            .collect()
    }

    /// Pass `policy` through, or reject it for this support level.
    pub fn check(self, policy: FitPolicy) -> Result<FitPolicy, ConfigError> {
        if self.allows(&policy) {
            Ok(policy)
        } else {
            crate::log::debug!(?self, %policy, "fit policy rejected");
            Err(ConfigError::UnsupportedFitPolicy {
                policy,
                support: self,
                accepted: Some(format!("this support level accepts: {}", self.accepted_names().join(", "))),
            })
        }
    }
}

/// Compute the matrix placing an `image`-sized raster into `dest`.
///
/// Pure: the same inputs always produce the same matrix. A zero-sized image
/// divides by zero; callers guarantee at least 1x1.
pub fn compute_matrix(image: Size<u32>, dest: Rect, policy: FitPolicy) -> FitMatrix {
    let img = image.to_f64();
    let (dw, dh) = (dest.width(), dest.height());

    // Translation relative to the dest origin, added at the end.
    let (sx, sy, tx, ty) = match policy {
        FitPolicy::Matrix(m) => return m,

        FitPolicy::FitXy => (dw / img.w, dh / img.h, 0.0, 0.0),

        FitPolicy::Center => (1.0, 1.0, (dw - img.w) / 2.0, (dh - img.h) / 2.0),

        FitPolicy::CenterCrop => {
            let by_width = scale_by_width(img, dw, dh);
            let (s, tx, ty) = if by_width {
                let s = dw / img.w;
                (s, 0.0, (dh - img.h * s) / 2.0)
            } else {
                let s = dh / img.h;
                (s, (dw - img.w * s) / 2.0, 0.0)
            };
            crate::log::debug!(
                image_w = img.w,
                image_h = img.h,
                dest_w = dw,
                dest_h = dh,
                by_width,
                scale = s,
                "center-crop"
            );
            (s, s, tx, ty)
        }

        FitPolicy::CenterInside => {
            let s = (dw / img.w).min(dh / img.h).min(1.0);
            (s, s, (dw - img.w * s) / 2.0, (dh - img.h * s) / 2.0)
        }

        FitPolicy::FitStart | FitPolicy::FitCenter | FitPolicy::FitEnd => {
            let s = (dw / img.w).min(dh / img.h);
            let slack_x = dw - img.w * s;
            let slack_y = dh - img.h * s;
            let share = match policy {
                FitPolicy::FitStart => 0.0,
                FitPolicy::FitCenter => 0.5,
                _ => 1.0,
            };
            (s, s, slack_x * share, slack_y * share)
        }
    };

    FitMatrix {
        scale_x: sx,
        scale_y: sy,
        translate_x: tx + dest.left,
        translate_y: ty + dest.top,
    }
}

/// Center-crop axis choice.
///
/// For a landscape image, scale by width when the destination is relatively
/// wider than the image. For portrait and square images the comparison is
/// inverted. This means portrait and square images can end up letterboxed
/// rather than cropped; the rule is kept as is because hosts rely on the
/// exact placement.
fn scale_by_width(img: Size<f64>, dw: f64, dh: f64) -> bool {
    let dest_ratio = dw / dh;
    let img_ratio = img.w / img.h;
    if img.w > img.h {
        dest_ratio > img_ratio
    } else {
        !(dest_ratio > img_ratio)
    }
}
