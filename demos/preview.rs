//! Print an SVG preview of a shaped image.
//!
//! ```text
//! cargo run --example preview --features tracing -- "superellipse(4)" fit-center
//! RUST_LOG=preview=info,shaped_image=debug cargo run --example preview --features tracing -- circle
//! ```

use std::sync::Arc;

use shaped_image::render::{Border, FormulaRegistry, RasterImage, Shadow, ShapeKind, ShapedImage};
use shaped_image::types::{Color, CornerSet, Insets, Size};
use tracing_subscriber::EnvFilter;

struct Placeholder(Size<u32>);

impl RasterImage for Placeholder {
    fn size(&self) -> Size<u32> {
        self.0
    }
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let shape = args.next().unwrap_or_else(|| "round-rect".to_string());
    let fit = args.next().unwrap_or_else(|| "center-crop".to_string());

    let kind = match shape.as_str() {
        "circle" => ShapeKind::Circle,
        "oval" => ShapeKind::Oval,
        "square" => ShapeKind::Square,
        "round-rect" => ShapeKind::RoundRect(CornerSet::new(8.0, 12.0, 16.0, 24.0)),
        "cut-corner" => ShapeKind::default_cut_corner(1.5),
        descriptor => ShapeKind::Formula(FormulaRegistry::new().resolve(descriptor)?),
    };

    let mut view = ShapedImage::new(kind)
        .with_padding(Insets::uniform(4.0))
        .with_border(Border::try_new(6.0, Color::rgb(0x44, 0x44, 0x44))?)
        .with_shadow(Shadow::try_new(4.0, Color::argb(0x80, 0, 0, 0))?)
        .with_force_square(false)
        .with_fit_policy(fit.parse()?)?
        .with_size(Size::new(240.0, 160.0));

    let image = Arc::new(Placeholder(Size::new(320, 200)));
    let frame = view.render(Some(&image));
    tracing::info!(shape = %shape, fit = %view.fit_policy(), layers = frame.layers.len(), "rendered preview");

    println!("{}", frame.to_svg(view.size())?);
    Ok(())
}
