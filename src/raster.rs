//! Reference compositor on top of tiny-skia.
//!
//! Hosts normally draw a [`Frame`] with their own graphics stack. This module
//! does the same in software so frames can be checked pixel by pixel.

use tiny_skia::{
    Color as SkColor, FillRule, FilterQuality, Paint as SkPaint, Pattern, Pixmap, SpreadMode, Transform,
};

use crate::render::geometry::Outline;
use crate::render::path_builder::{Path, PathCommand};
use crate::render::{Frame, Paint, RasterImage};
use crate::types::{Color, Size};

impl RasterImage for Pixmap {
    fn size(&self) -> Size<u32> {
        Size::new(self.width(), self.height())
    }
}

/// Composite `frame` into a new `size` pixmap.
///
/// Shadows are filled at their offset without blur. Image layers are skipped
/// when `image` is `None`. Returns `None` for a zero-sized target.
pub fn rasterize(frame: &Frame, size: Size<u32>, image: Option<&Pixmap>) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(size.w, size.h)?;

    for layer in &frame.layers {
        let Some(path) = to_skia_path(&layer.outline) else {
            crate::log::debug!(kind = ?layer.kind, "outline has no area, not drawn");
            continue;
        };

        match layer.paint {
            Paint::Fill(color) => {
                let paint = solid(color);
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
            Paint::Shadow { color, offset, .. } => {
                let paint = solid(color);
                let shift = Transform::from_translate(offset.x as f32, offset.y as f32);
                pixmap.fill_path(&path, &paint, FillRule::Winding, shift, None);
            }
            Paint::Image { matrix, .. } => {
                let Some(source) = image else {
                    continue;
                };
                let placement = Transform::from_row(
                    matrix.scale_x as f32,
                    0.0,
                    0.0,
                    matrix.scale_y as f32,
                    matrix.translate_x as f32,
                    matrix.translate_y as f32,
                );
                let paint = SkPaint {
                    shader: Pattern::new(
                        source.as_ref(),
                        SpreadMode::Pad,
                        FilterQuality::Bilinear,
                        1.0,
                        placement,
                    ),
                    anti_alias: true,
                    ..SkPaint::default()
                };
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }

    Some(pixmap)
}

fn solid(color: Color) -> SkPaint<'static> {
    let mut paint = SkPaint::default();
    paint.set_color(SkColor::from_rgba8(color.red(), color.green(), color.blue(), color.alpha()));
    paint.anti_alias = true;
    paint
}

fn to_skia_path(outline: &Outline) -> Option<tiny_skia::Path> {
    match outline {
        Outline::Rect(r) => {
            let rect = tiny_skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)?;
            Some(tiny_skia::PathBuilder::from_rect(rect))
        }
        Outline::Circle { center, radius } => {
            tiny_skia::PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32)
        }
        Outline::Oval(r) => {
            let rect = tiny_skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)?;
            tiny_skia::PathBuilder::from_oval(rect)
        }
        Outline::Path(p) => convert_path(p),
    }
}

fn convert_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathCommand::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathCommand::QuadTo { ctrl, to } => builder.quad_to(ctrl.x as f32, ctrl.y as f32, to.x as f32, to.y as f32),
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}
