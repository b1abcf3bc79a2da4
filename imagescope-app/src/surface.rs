use imagescope_core::{Point, Size, ViewSurface};

/// The egui canvas as seen by the viewer.
///
/// egui is immediate mode, so there is no retained scroll container to
/// query. This struct plays that role: the app feeds it the laid-out
/// canvas size and the decoded image size every frame, and paints the
/// image at `-scroll` with `intrinsic * scale` as its size.
#[derive(Debug, Clone)]
pub(crate) struct CanvasSurface {
    viewport: Option<Size>,
    intrinsic: Option<Size>,
    scale: f64,
    scroll: Point,
    /// Side of the square box the minimap image is fitted into, or `None`
    /// while the minimap is hidden.
    minimap_box: Option<f64>,
}

impl CanvasSurface {
    pub(crate) fn new() -> Self {
        Self {
            viewport: None,
            intrinsic: None,
            scale: 1.0,
            scroll: Point::ZERO,
            minimap_box: None,
        }
    }

    /// Record the canvas size from this frame's layout.
    pub(crate) fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != Some(viewport) {
            self.viewport = Some(viewport);
            self.scroll = self.clamped(self.scroll);
        }
    }

    /// Show an image of the given intrinsic size, or nothing.
    pub(crate) fn set_image(&mut self, intrinsic: Option<Size>) {
        self.intrinsic = intrinsic;
        self.scroll = self.clamped(self.scroll);
    }

    pub(crate) fn has_image(&self) -> bool {
        self.intrinsic.is_some()
    }

    pub(crate) fn set_minimap_box(&mut self, side: Option<f64>) {
        self.minimap_box = side;
    }

    pub(crate) fn scale(&self) -> f64 {
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

impl ViewSurface for CanvasSurface {
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

    fn minimap_image_size(&self) -> Option<Size> {
        let side = self.minimap_box?;
        let img = self.intrinsic?;
        if img.is_degenerate() {
            return None;
        }
        if img.width >= img.height {
            Some(Size::new(side, side * img.height / img.width))
        } else {
            Some(Size::new(side * img.width / img.height, side))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out() -> CanvasSurface {
        let mut s = CanvasSurface::new();
        s.set_viewport(Size::new(800.0, 600.0));
        s.set_image(Some(Size::new(1600.0, 1200.0)));
        s
    }

    #[test]
    fn scroll_is_clamped_to_overflow() {
        let mut s = laid_out();
        s.set_scroll_offset(Point::new(5000.0, -20.0));
        assert_eq!(s.scroll_offset(), Point::new(800.0, 0.0));

        s.apply_scale(2.0);
        s.set_scroll_offset(Point::new(5000.0, 5000.0));
        assert_eq!(s.scroll_offset(), Point::new(2400.0, 1800.0));
    }

    #[test]
    fn resize_reclamps() {
        let mut s = laid_out();
        s.set_scroll_offset(Point::new(800.0, 600.0));
        s.set_viewport(Size::new(1000.0, 1000.0));
        assert_eq!(s.scroll_offset(), Point::new(600.0, 200.0));
    }

    #[test]
    fn minimap_fits_box_keeping_aspect() {
        let mut s = laid_out();
        assert!(s.minimap_image_size().is_none());
        s.set_minimap_box(Some(160.0));
        assert_eq!(s.minimap_image_size(), Some(Size::new(160.0, 120.0)));

        s.set_image(Some(Size::new(600.0, 1200.0)));
        assert_eq!(s.minimap_image_size(), Some(Size::new(80.0, 160.0)));
    }

    #[test]
    fn no_image_means_no_content() {
        let mut s = laid_out();
        s.set_image(None);
        assert!(s.content_size().is_none());
        assert!(!s.has_image());
        s.set_scroll_offset(Point::new(10.0, 10.0));
        assert_eq!(s.scroll_offset(), Point::ZERO);
    }
}
