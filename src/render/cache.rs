//! Single-slot source image cache.

use std::sync::Arc;

use crate::types::Size;

/// A decoded raster the engine can place. Only its pixel size matters here.
pub trait RasterImage {
    /// Pixel dimensions, each at least 1.
    fn size(&self) -> Size<u32>;
}

impl<I: RasterImage + ?Sized> RasterImage for Arc<I> {
    fn size(&self) -> Size<u32> {
        (**self).size()
    }
}

/// Holds the most recently supplied image.
///
/// Identity is pointer equality on the `Arc`, so handing the same handle in
/// every frame is free. There is no eviction: the slot is overwritten on change
/// and dropped with its owner.
#[derive(Debug)]
pub struct ImageSlot<I> {
    current: Option<Arc<I>>,
}

impl<I> Default for ImageSlot<I> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<I> ImageSlot<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an image for this frame. Returns true when the slot changed.
    ///
    /// `None` keeps whatever image was stored before.
    pub fn refresh(&mut self, image: Option<&Arc<I>>) -> bool {
        let Some(image) = image else {
            return false;
        };
        if self.current.as_ref().is_some_and(|cur| Arc::ptr_eq(cur, image)) {
            return false;
        }
        crate::log::debug!(replaced = self.current.is_some(), "image slot refreshed");
        self.current = Some(Arc::clone(image));
        true
    }

    pub fn get(&self) -> Option<&Arc<I>> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
