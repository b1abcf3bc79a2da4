use crate::geometry::{Point, Size};

/// Capability interface the rendering layer exposes to the viewer.
///
/// Every getter reads live geometry; the viewer never caches it across
/// calls. `None` means the element is not mounted or not laid out yet.
pub trait ViewSurface {
    /// Current scroll offset of the main container.
    fn scroll_offset(&self) -> Point;

    /// Write the main container's scroll offset. Implementations clamp to
    /// their own scrollable range the way a scroll container does.
    fn set_scroll_offset(&mut self, offset: Point);

    /// Client size of the main container.
    fn viewport_size(&self) -> Option<Size>;

    /// Scrollable content size (the image at the current display scale).
    fn content_size(&self) -> Option<Size>;

    /// Resize the displayed image to `scale` times its intrinsic size.
    fn apply_scale(&mut self, scale: f64);

    /// Displayed size of the minimap's copy of the image.
    fn minimap_image_size(&self) -> Option<Size>;
}

/// In-memory surface with scroll-container semantics.
///
/// Content size is `intrinsic * scale`, and scroll writes are clamped to
/// `[0, content - viewport]`. Used for headless tests and benches, and as
/// the reference for what a host surface must do.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    viewport: Option<Size>,
    intrinsic: Option<Size>,
    minimap_width: Option<f64>,
    scale: f64,
    scroll: Point,
}

impl HeadlessSurface {
    /// A surface with a mounted viewport but no image loaded yet.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport: Some(viewport),
            intrinsic: None,
            minimap_width: None,
            scale: 1.0,
            scroll: Point::ZERO,
        }
    }

    /// A surface that has not been mounted at all.
    pub fn unmounted() -> Self {
        Self {
            viewport: None,
            intrinsic: None,
            minimap_width: None,
            scale: 1.0,
            scroll: Point::ZERO,
        }
    }

    /// Builder: lay out an image with the given intrinsic size.
    pub fn with_image(mut self, intrinsic: Size) -> Self {
        self.load_image(intrinsic);
        self
    }

    /// Builder: mount a minimap that shows the image `width` pixels wide.
    pub fn with_minimap_width(mut self, width: f64) -> Self {
        self.minimap_width = Some(width);
        self
    }

    /// Replace the displayed image. The scroll position is re-clamped to
    /// the new content, as a browser does after layout.
    pub fn load_image(&mut self, intrinsic: Size) {
        self.intrinsic = Some(intrinsic);
        self.scroll = self.clamped(self.scroll);
    }

    /// Drop the current image, as between a switch and the next layout.
    pub fn unload_image(&mut self) {
        self.intrinsic = None;
    }

    pub fn resize_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
        self.scroll = self.clamped(self.scroll);
    }

    pub fn display_scale(&self) -> f64 {
        self.scale
    }

    fn max_scroll(&self) -> Point {
        match (self.content_size(), self.viewport) {
            (Some(content), Some(viewport)) => content.overflow(viewport),
            _ => Point::ZERO,
        }
    }

    fn clamped(&self, offset: Point) -> Point {
        offset.clamp_to(self.max_scroll())
    }
}

impl ViewSurface for HeadlessSurface {
    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: Point) {
        self.scroll = self.clamped(offset);
    }

    fn viewport_size(&self) -> Option<Size> {
        self.viewport
    }

    fn content_size(&self) -> Option<Size> {
        self.intrinsic.map(|s| s * self.scale)
    }

    fn apply_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.scroll = self.clamped(self.scroll);
    }

    /// Minimap keeps the image's aspect ratio at a fixed display width.
    fn minimap_image_size(&self) -> Option<Size> {
        let width = self.minimap_width?;
        let intrinsic = self.intrinsic?;
        if intrinsic.width <= 0.0 {
            return None;
        }
        Some(Size::new(width, width * intrinsic.height / intrinsic.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_writes_self_clamp() {
        let mut s = HeadlessSurface::new(Size::new(800.0, 600.0)).with_image(Size::new(1600.0, 1200.0));
        s.set_scroll_offset(Point::new(5000.0, -20.0));
        assert_eq!(s.scroll_offset(), Point::new(800.0, 0.0));
    }

    #[test]
    fn content_follows_scale() {
        let mut s = HeadlessSurface::new(Size::new(800.0, 600.0)).with_image(Size::new(1600.0, 1200.0));
        s.apply_scale(2.0);
        assert_eq!(s.content_size(), Some(Size::new(3200.0, 2400.0)));
        s.set_scroll_offset(Point::new(2400.0, 1800.0));
        assert_eq!(s.scroll_offset(), Point::new(2400.0, 1800.0));
        s.apply_scale(1.0);
        assert_eq!(s.scroll_offset(), Point::new(800.0, 600.0));
    }

    #[test]
    fn no_image_means_no_scroll() {
        let mut s = HeadlessSurface::new(Size::new(800.0, 600.0));
        s.set_scroll_offset(Point::new(10.0, 10.0));
        assert_eq!(s.scroll_offset(), Point::ZERO);
        assert!(s.content_size().is_none());
    }

    #[test]
    fn minimap_keeps_aspect_ratio() {
        let s = HeadlessSurface::new(Size::new(800.0, 600.0))
            .with_image(Size::new(1600.0, 1200.0))
            .with_minimap_width(200.0);
        assert_eq!(s.minimap_image_size(), Some(Size::new(200.0, 150.0)));
        assert!(HeadlessSurface::unmounted().minimap_image_size().is_none());
    }
}
