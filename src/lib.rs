//! Geometry for images clipped to non-rectangular shapes.
//!
//! Given a view size, decorations and a source image size, this crate works
//! out the outlines (circle, oval, square, rounded or cut-corner rect, or any
//! parametric formula such as a superellipse) and the matrix that places the
//! image inside them. The host draws the resulting [`render::Frame`] with its
//! own graphics stack; the optional `raster` feature provides a reference
//! compositor built on tiny-skia.
//!
//! ```
//! use std::sync::Arc;
//! use shaped_image::render::{LayerKind, RasterImage, ShapeKind, ShapedImage};
//! use shaped_image::types::Size;
//!
//! struct Photo;
//! impl RasterImage for Photo {
//!     fn size(&self) -> Size<u32> {
//!         Size::new(640, 480)
//!     }
//! }
//!
//! let mut view = ShapedImage::new(ShapeKind::Circle).with_size(Size::new(96.0, 96.0));
//! let frame = view.render(Some(&Arc::new(Photo)));
//! assert!(frame.layer(LayerKind::Image).is_some());
//! ```

use pest_derive::Parser;

pub mod errors;
pub mod log;
pub mod parse;
#[cfg(feature = "raster")]
pub mod raster;
pub mod render;
pub mod types;

pub use errors::ConfigError;
pub use parse::{parse_aspect_ratio, parse_formula_descriptor};
pub use render::{FitPolicy, Frame, ShapeKind, ShapedImage};

#[derive(Parser)]
#[grammar = "shaped.pest"]
pub struct ShapeParser;
