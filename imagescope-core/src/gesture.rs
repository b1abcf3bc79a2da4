use tracing::debug;

use crate::geometry::Point;
use crate::minimap::MinimapProjector;
use crate::surface::ViewSurface;

/// Where a drag started and what the main scroll was at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Pointer position at pointer-down. Container-relative for a main
    /// drag, minimap screen coordinates for a minimap drag.
    pub start: Point,
    /// Main container scroll offset at pointer-down.
    pub origin_scroll: Point,
}

/// The single active gesture. Both drag kinds write the same scroll
/// offset, so they live in one enum and can never be active together.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Grab-and-pull on the main image.
    MainDrag(DragOrigin),
    /// Dragging the minimap's viewport indicator.
    MinimapDrag(DragOrigin),
}

impl GestureState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::MainDrag(_) => "main drag",
            Self::MinimapDrag(_) => "minimap drag",
        }
    }
}

/// Turns raw pointer events into scroll mutations.
///
/// Element-scope handlers (`main_*`, `minimap_pointer_down`) react to events
/// on a specific element. Outer-scope handlers (`outer_*`) receive events
/// from the whole window and are what guarantees a drag always ends, even
/// when the pointer is released far from where it started.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Pointer-down on the main container at container-relative `pos`.
    ///
    /// Ignored while a minimap drag owns the scroll position.
    pub fn main_pointer_down<S: ViewSurface + ?Sized>(&mut self, surface: &S, pos: Point) -> bool {
        if matches!(self.state, GestureState::MinimapDrag(_)) {
            debug!("Main pointer-down ignored during minimap drag");
            return false;
        }
        self.state = GestureState::MainDrag(DragOrigin {
            start: pos,
            origin_scroll: surface.scroll_offset(),
        });
        debug!(x = pos.x, y = pos.y, "Main drag started");
        true
    }

    /// Pointer-move over the main container. Writes `origin - delta` and
    /// relies on the surface to clamp. Returns whether anything moved.
    pub fn main_pointer_move<S: ViewSurface + ?Sized>(&mut self, surface: &mut S, pos: Point) -> bool {
        let GestureState::MainDrag(origin) = self.state else {
            return false;
        };
        let walk = pos - origin.start;
        surface.set_scroll_offset(origin.origin_scroll - walk);
        true
    }

    /// Pointer-up or pointer-leave on the main container. Returns whether a
    /// drag ended; the caller decides whether the final scroll is kept.
    pub fn main_pointer_release<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> bool {
        if !matches!(self.state, GestureState::MainDrag(_)) {
            return false;
        }
        self.finish(surface);
        true
    }

    /// Pointer-down on the minimap indicator at minimap screen position `pos`.
    ///
    /// Always takes over: an active main drag is cancelled first. The host
    /// must consume the event so the main container never sees it.
    pub fn minimap_pointer_down<S: ViewSurface + ?Sized>(&mut self, surface: &S, pos: Point) {
        if let GestureState::MainDrag(_) = self.state {
            debug!("Minimap drag cancels active main drag");
        }
        self.state = GestureState::MinimapDrag(DragOrigin {
            start: pos,
            origin_scroll: surface.scroll_offset(),
        });
        debug!(x = pos.x, y = pos.y, "Minimap drag started");
    }

    /// Pointer-move anywhere in the window. Drives the minimap drag only;
    /// the delta is converted to content pixels and clamped explicitly.
    pub fn outer_pointer_move<S: ViewSurface + ?Sized>(&mut self, surface: &mut S, pos: Point) -> bool {
        let GestureState::MinimapDrag(origin) = self.state else {
            return false;
        };
        let Some(projector) = MinimapProjector::from_surface(&*surface) else {
            return false;
        };
        let target = projector.drag_target(origin.origin_scroll, pos - origin.start);
        surface.set_scroll_offset(target);
        true
    }

    /// Pointer-up or pointer-leave at window scope. Ends whichever drag is
    /// active.
    pub fn outer_pointer_release<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> bool {
        if self.is_idle() {
            return false;
        }
        self.finish(surface);
        true
    }

    /// Restart an active main drag from `pos` at the current scroll, so the
    /// next move does not jump after the scroll was changed underneath it.
    pub fn rebase_main_drag<S: ViewSurface + ?Sized>(&mut self, surface: &S, pos: Point) {
        if let GestureState::MainDrag(origin) = &mut self.state {
            origin.start = pos;
            origin.origin_scroll = surface.scroll_offset();
        }
    }

    /// Drop any active drag.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!(gesture = self.state.label(), "Gesture cancelled");
        }
        self.state = GestureState::Idle;
    }

    fn finish<S: ViewSurface + ?Sized>(&mut self, surface: &S) {
        let scroll = surface.scroll_offset();
        debug!(
            gesture = self.state.label(),
            scroll_left = scroll.x,
            scroll_top = scroll.y,
            "Gesture ended"
        );
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::surface::HeadlessSurface;

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(Size::new(800.0, 600.0))
            .with_image(Size::new(2000.0, 1500.0))
            .with_minimap_width(200.0)
    }

    #[test]
    fn main_drag_grab_and_pull() {
        let mut s = surface();
        s.set_scroll_offset(Point::new(300.0, 200.0));
        let mut g = GestureController::new();

        assert!(g.main_pointer_down(&s, Point::new(400.0, 300.0)));
        assert!(g.main_pointer_move(&mut s, Point::new(350.0, 280.0)));
        assert_eq!(s.scroll_offset(), Point::new(350.0, 220.0));

        assert!(g.main_pointer_release(&s));
        assert!(g.is_idle());
        assert!(!g.main_pointer_move(&mut s, Point::new(0.0, 0.0)));
        assert_eq!(s.scroll_offset(), Point::new(350.0, 220.0));
    }

    #[test]
    fn main_drag_relies_on_surface_clamp() {
        let mut s = surface();
        let mut g = GestureController::new();
        g.main_pointer_down(&s, Point::new(100.0, 100.0));
        g.main_pointer_move(&mut s, Point::new(500.0, 500.0));
        assert_eq!(s.scroll_offset(), Point::ZERO);
        g.main_pointer_move(&mut s, Point::new(-5000.0, -5000.0));
        assert_eq!(s.scroll_offset(), Point::new(1200.0, 900.0));
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut s = surface();
        let mut g = GestureController::new();
        assert!(!g.main_pointer_move(&mut s, Point::new(10.0, 10.0)));
        assert!(!g.outer_pointer_move(&mut s, Point::new(10.0, 10.0)));
        assert_eq!(s.scroll_offset(), Point::ZERO);
    }

    #[test]
    fn minimap_drag_cancels_main_drag() {
        let mut s = surface();
        let mut g = GestureController::new();
        g.main_pointer_down(&s, Point::new(400.0, 300.0));
        g.minimap_pointer_down(&s, Point::new(20.0, 20.0));
        assert!(matches!(g.state(), GestureState::MinimapDrag(_)));

        // Main handlers are now inert.
        assert!(!g.main_pointer_move(&mut s, Point::new(0.0, 0.0)));
        assert!(!g.main_pointer_down(&s, Point::new(1.0, 1.0)));
        assert_eq!(s.scroll_offset(), Point::ZERO);
    }

    #[test]
    fn minimap_drag_converts_and_clamps() {
        let mut s = surface();
        let mut g = GestureController::new();
        g.minimap_pointer_down(&s, Point::new(50.0, 40.0));

        assert!(g.outer_pointer_move(&mut s, Point::new(60.0, 40.0)));
        assert_eq!(s.scroll_offset(), Point::new(100.0, 0.0));

        g.outer_pointer_move(&mut s, Point::new(900.0, 900.0));
        assert_eq!(s.scroll_offset(), Point::new(1200.0, 900.0));

        // Leaving the main element does not end a minimap drag.
        assert!(!g.main_pointer_release(&s));
        assert!(matches!(g.state(), GestureState::MinimapDrag(_)));

        assert!(g.outer_pointer_release(&s));
        assert!(g.is_idle());
        assert_eq!(s.scroll_offset(), Point::new(1200.0, 900.0));
    }

    #[test]
    fn outer_release_ends_main_drag() {
        let s = surface();
        let mut g = GestureController::new();
        g.main_pointer_down(&s, Point::new(1.0, 1.0));
        assert!(g.outer_pointer_release(&s));
        assert!(g.is_idle());
        assert!(!g.outer_pointer_release(&s));
    }

    #[test]
    fn minimap_drag_without_minimap_is_noop() {
        let mut s = HeadlessSurface::new(Size::new(800.0, 600.0)).with_image(Size::new(2000.0, 1500.0));
        let mut g = GestureController::new();
        g.minimap_pointer_down(&s, Point::ZERO);
        assert!(!g.outer_pointer_move(&mut s, Point::new(10.0, 10.0)));
        assert_eq!(s.scroll_offset(), Point::ZERO);
    }

    #[test]
    fn rebase_keeps_following_pointer() {
        let mut s = surface();
        let mut g = GestureController::new();
        g.main_pointer_down(&s, Point::new(100.0, 100.0));
        s.set_scroll_offset(Point::new(500.0, 500.0));
        g.rebase_main_drag(&s, Point::new(120.0, 90.0));
        g.main_pointer_move(&mut s, Point::new(110.0, 90.0));
        assert_eq!(s.scroll_offset(), Point::new(510.0, 500.0));
    }
}
