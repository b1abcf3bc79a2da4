use crate::geometry::{Point, Rect, Size};
use crate::surface::ViewSurface;

/// Maps between main-container scroll space and minimap screen space.
///
/// Built fresh from live geometry every time it is needed; holds a
/// snapshot only for the duration of one computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjector {
    viewport: Size,
    content: Size,
    minimap: Size,
}

impl MinimapProjector {
    /// Snapshot the surface geometry. `None` if the container, the image or
    /// the minimap is not laid out, or if any of them has zero size.
    pub fn from_surface<S: ViewSurface + ?Sized>(surface: &S) -> Option<Self> {
        Self::new(
            surface.viewport_size()?,
            surface.content_size()?,
            surface.minimap_image_size()?,
        )
    }

    pub fn new(viewport: Size, content: Size, minimap: Size) -> Option<Self> {
        if content.is_degenerate() || minimap.is_degenerate() {
            return None;
        }
        Some(Self {
            viewport,
            content,
            minimap,
        })
    }

    /// Minimap pixels per content pixel on each axis.
    #[inline]
    pub fn scale(&self) -> Point {
        Point::new(
            self.minimap.width / self.content.width,
            self.minimap.height / self.content.height,
        )
    }

    /// Largest valid main scroll offset.
    #[inline]
    pub fn max_scroll(&self) -> Point {
        self.content.overflow(self.viewport)
    }

    /// Indicator rectangle, in minimap coordinates, for a main scroll offset.
    pub fn indicator(&self, scroll: Point) -> Rect {
        let s = self.scale();
        Rect::new(
            scroll.x * s.x,
            scroll.y * s.y,
            self.viewport.width * s.x,
            self.viewport.height * s.y,
        )
    }

    /// Main scroll offset whose indicator starts at `indicator_min`. Unclamped.
    pub fn scroll_at(&self, indicator_min: Point) -> Point {
        let s = self.scale();
        Point::new(indicator_min.x / s.x, indicator_min.y / s.y)
    }

    /// Main scroll after dragging the indicator by `delta` minimap pixels
    /// from a drag that began at `origin_scroll`, clamped to the content.
    pub fn drag_target(&self, origin_scroll: Point, delta: Point) -> Point {
        let s = self.scale();
        let main_delta = Point::new(delta.x / s.x, delta.y / s.y);
        (origin_scroll + main_delta).clamp_to(self.max_scroll())
    }
}
