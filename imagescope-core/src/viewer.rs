use tracing::{debug, info};

use crate::geometry::{Point, Rect};
use crate::gesture::{GestureController, GestureState};
use crate::image_set::{ImageSet, ImageSource};
use crate::minimap::MinimapProjector;
use crate::surface::ViewSurface;
use crate::view_state::{ViewState, ZoomDirection, ZoomLimits};

/// A single wheel event over the main container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    /// Pointer position relative to the container's top-left corner.
    pub anchor: Point,
    /// Vertical wheel delta; negative zooms in.
    pub delta_y: f64,
}

/// The image viewer: one shared view state applied to whichever image of
/// the set is displayed.
///
/// The viewer never owns the rendering surface. Every operation that reads
/// or writes geometry takes it as an argument, so geometry is always read
/// fresh and the host stays free to rebuild its widgets every frame.
///
/// Switching images is two-phase. `next`/`prev`/`select_image` record the
/// switch and mark the view pending; the host calls
/// [`apply_stored_view`](Self::apply_stored_view) once the new image has
/// been laid out, which clamps and applies the stored scale and scroll.
#[derive(Debug, Clone)]
pub struct Viewer {
    images: ImageSet,
    view: ViewState,
    limits: ZoomLimits,
    gesture: GestureController,
    view_pending: bool,
    minimap_revision: u64,
}

impl Viewer {
    /// Create a viewer over `sources`. The initial view is pending until the
    /// host applies it after the first layout.
    pub fn new<I>(sources: I, limits: ZoomLimits) -> crate::Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<ImageSource>,
    {
        let images = ImageSet::new(sources.into_iter().map(Into::into).collect())?;
        info!(count = images.len(), "Viewer created");
        Ok(Self {
            images,
            view: ViewState::default(),
            limits,
            gesture: GestureController::new(),
            view_pending: true,
            minimap_revision: 0,
        })
    }

    // -- Accessors -----------------------------------------------------------

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn limits(&self) -> &ZoomLimits {
        &self.limits
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.images.current_index()
    }

    pub fn current_source(&self) -> &ImageSource {
        self.images.current()
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture.state()
    }

    /// True between an image switch and the matching `apply_stored_view`.
    pub fn is_view_pending(&self) -> bool {
        self.view_pending
    }

    /// Incremented whenever the minimap indicator must be recomputed.
    pub fn minimap_revision(&self) -> u64 {
        self.minimap_revision
    }

    // -- Image switching -----------------------------------------------------

    pub fn next<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> usize {
        self.begin_switch(surface);
        let index = self.images.advance();
        self.end_switch(index)
    }

    pub fn prev<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> usize {
        self.begin_switch(surface);
        let index = self.images.retreat();
        self.end_switch(index)
    }

    /// Switch to `index`. Out-of-range indices leave everything untouched.
    pub fn select_image<S: ViewSurface + ?Sized>(
        &mut self,
        surface: &S,
        index: usize,
    ) -> crate::Result<usize> {
        if self.images.get(index).is_none() {
            // Validate before persisting so a bad index has no side effects.
            return self.images.select(index);
        }
        self.begin_switch(surface);
        let index = self.images.select(index)?;
        Ok(self.end_switch(index))
    }

    fn begin_switch<S: ViewSurface + ?Sized>(&mut self, surface: &S) {
        self.gesture.cancel();
        self.persist_live_scroll(surface);
    }

    fn end_switch(&mut self, index: usize) -> usize {
        self.view_pending = true;
        info!(index, image = %self.images.current().label, "Switched image");
        index
    }

    /// Second phase of a switch: apply the stored scale and scroll to the
    /// newly laid-out image. Returns `false` (and stays pending) while the
    /// surface has no geometry yet.
    pub fn apply_stored_view<S: ViewSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.apply_view(surface) {
            debug!("Stored view not applied: surface not laid out");
            return false;
        }
        self.view_pending = false;
        debug!(
            scale = self.view.scale,
            scroll_left = self.view.scroll_left,
            scroll_top = self.view.scroll_top,
            "Stored view applied"
        );
        true
    }

    // -- Zoom ----------------------------------------------------------------

    pub fn zoom_in<S: ViewSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.zoom_step(surface, ZoomDirection::In)
    }

    pub fn zoom_out<S: ViewSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.zoom_step(surface, ZoomDirection::Out)
    }

    fn zoom_step<S: ViewSurface + ?Sized>(&mut self, surface: &mut S, direction: ZoomDirection) -> bool {
        self.persist_live_scroll(&*surface);
        let changed = self.view.zoom(&self.limits, direction);
        if !self.view_pending && !self.apply_view(surface) {
            self.view_pending = true;
        }
        debug!(scale = self.view.scale, changed, "Zoom step");
        changed
    }

    /// Anchor-preserving wheel zoom. The content point under the pointer
    /// stays under the pointer unless the new scroll had to be clamped.
    pub fn wheel<S: ViewSurface + ?Sized>(&mut self, surface: &mut S, input: WheelInput) -> bool {
        if self.view_pending || matches!(self.gesture.state(), GestureState::MinimapDrag(_)) {
            return false;
        }
        let (Some(content), Some(viewport)) = (surface.content_size(), surface.viewport_size())
        else {
            return false;
        };
        self.view.zoom_at_point(
            &self.limits,
            ZoomDirection::from_wheel_delta(input.delta_y),
            input.anchor,
            surface.scroll_offset(),
            content,
            viewport,
        );
        self.apply_view(surface);
        self.gesture.rebase_main_drag(&*surface, input.anchor);
        true
    }

    // -- Pointer input: main container ---------------------------------------

    /// Start a grab-and-pull drag. Ignored while a switch is pending, since
    /// the container does not show the stored view yet.
    pub fn pointer_down<S: ViewSurface + ?Sized>(&mut self, surface: &S, pos: Point) -> bool {
        if self.view_pending {
            debug!("Main pointer-down ignored while view is pending");
            return false;
        }
        self.gesture.main_pointer_down(surface, pos)
    }

    pub fn pointer_move<S: ViewSurface + ?Sized>(&mut self, surface: &mut S, pos: Point) -> bool {
        let moved = self.gesture.main_pointer_move(surface, pos);
        if moved {
            self.bump_minimap_revision();
        }
        moved
    }

    pub fn pointer_up<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> bool {
        let ended = self.gesture.main_pointer_release(surface);
        self.end_gesture(surface, ended)
    }

    pub fn pointer_leave<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> bool {
        let ended = self.gesture.main_pointer_release(surface);
        self.end_gesture(surface, ended)
    }

    // -- Pointer input: minimap and outer scope ------------------------------

    /// Start dragging the minimap indicator. Ignored while a switch is
    /// pending, like [`pointer_down`](Self::pointer_down).
    pub fn minimap_pointer_down<S: ViewSurface + ?Sized>(&mut self, surface: &S, pos: Point) -> bool {
        if self.view_pending {
            debug!("Minimap pointer-down ignored while view is pending");
            return false;
        }
        self.gesture.minimap_pointer_down(surface, pos);
        true
    }

    pub fn outer_pointer_move<S: ViewSurface + ?Sized>(&mut self, surface: &mut S, pos: Point) -> bool {
        let moved = self.gesture.outer_pointer_move(surface, pos);
        if moved {
            self.bump_minimap_revision();
        }
        moved
    }

    pub fn outer_pointer_up<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> bool {
        let ended = self.gesture.outer_pointer_release(surface);
        self.end_gesture(surface, ended)
    }

    pub fn outer_pointer_leave<S: ViewSurface + ?Sized>(&mut self, surface: &S) -> bool {
        let ended = self.gesture.outer_pointer_release(surface);
        self.end_gesture(surface, ended)
    }

    // -- Minimap -------------------------------------------------------------

    /// Indicator rectangle in minimap coordinates, or `None` before the
    /// container or minimap is laid out.
    pub fn preview_viewport_geometry<S: ViewSurface + ?Sized>(&self, surface: &S) -> Option<Rect> {
        let projector = MinimapProjector::from_surface(surface)?;
        Some(projector.indicator(surface.scroll_offset()))
    }

    // -- Internals -----------------------------------------------------------

    /// Read the container's live scroll into the view state. Skipped while a
    /// switch is pending: the container then shows an image the stored
    /// state has not been applied to.
    fn persist_live_scroll<S: ViewSurface + ?Sized>(&mut self, surface: &S) {
        if !self.view_pending {
            self.view.set_scroll(surface.scroll_offset());
        }
    }

    /// Keep the scroll a finished drag left behind, unless a switch made the
    /// container's scroll meaningless in the meantime.
    fn end_gesture<S: ViewSurface + ?Sized>(&mut self, surface: &S, ended: bool) -> bool {
        if ended {
            self.persist_live_scroll(surface);
        }
        ended
    }

    /// Size the image, clamp the stored scroll to the resulting bounds and
    /// write it to the container.
    fn apply_view<S: ViewSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        surface.apply_scale(self.view.scale);
        let (Some(content), Some(viewport)) = (surface.content_size(), surface.viewport_size())
        else {
            return false;
        };
        self.view.clamp_scroll(content.overflow(viewport));
        surface.set_scroll_offset(self.view.scroll());
        self.bump_minimap_revision();
        true
    }

    fn bump_minimap_revision(&mut self) {
        self.minimap_revision = self.minimap_revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::geometry::Size;
    use crate::surface::HeadlessSurface;

    fn viewer() -> Viewer {
        Viewer::new(["a.png", "b.png", "c.png"], ZoomLimits::default()).unwrap()
    }

    fn laid_out() -> HeadlessSurface {
        HeadlessSurface::new(Size::new(800.0, 600.0))
            .with_image(Size::new(1600.0, 1200.0))
            .with_minimap_width(200.0)
    }

    #[test]
    fn new_viewer_is_pending_until_applied() {
        let mut v = viewer();
        let mut s = laid_out();
        assert!(v.is_view_pending());
        assert!(v.apply_stored_view(&mut s));
        assert!(!v.is_view_pending());
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let err = Viewer::new(Vec::<ImageSource>::new(), ZoomLimits::default()).unwrap_err();
        assert_eq!(err, CoreError::EmptyImageSet);
    }

    #[test]
    fn apply_waits_for_layout() {
        let mut v = viewer();
        let mut s = HeadlessSurface::new(Size::new(800.0, 600.0));
        assert!(!v.apply_stored_view(&mut s));
        assert!(v.is_view_pending());
        s.load_image(Size::new(1600.0, 1200.0));
        assert!(v.apply_stored_view(&mut s));
    }

    #[test]
    fn bad_select_has_no_side_effects() {
        let mut v = viewer();
        let mut s = laid_out();
        v.apply_stored_view(&mut s);
        s.set_scroll_offset(Point::new(100.0, 100.0));
        assert!(v.select_image(&s, 7).is_err());
        assert_eq!(v.current_index(), 0);
        assert!(!v.is_view_pending());
        assert_eq!(v.view_state().scroll(), Point::ZERO);
    }

    #[test]
    fn switch_cancels_active_drag() {
        let mut v = viewer();
        let mut s = laid_out();
        v.apply_stored_view(&mut s);
        v.pointer_down(&s, Point::new(10.0, 10.0));
        v.next(&s);
        assert_eq!(v.gesture(), GestureState::Idle);
    }

    #[test]
    fn zoom_while_pending_is_applied_later() {
        let mut v = viewer();
        let mut s = HeadlessSurface::new(Size::new(800.0, 600.0));
        assert!(v.zoom_in(&mut s));
        assert!(v.is_view_pending());
        s.load_image(Size::new(1600.0, 1200.0));
        v.apply_stored_view(&mut s);
        assert!((s.display_scale() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn wheel_ignored_during_minimap_drag() {
        let mut v = viewer();
        let mut s = laid_out();
        v.apply_stored_view(&mut s);
        v.minimap_pointer_down(&s, Point::ZERO);
        let input = WheelInput {
            anchor: Point::new(10.0, 10.0),
            delta_y: -1.0,
        };
        assert!(!v.wheel(&mut s, input));
        assert_eq!(v.view_state().scale, 1.0);
    }

    #[test]
    fn drags_do_not_start_while_pending() {
        let mut v = viewer();
        let s = laid_out();
        assert!(!v.pointer_down(&s, Point::new(10.0, 10.0)));
        assert!(!v.minimap_pointer_down(&s, Point::new(10.0, 10.0)));
        assert_eq!(v.gesture(), GestureState::Idle);
        assert!(!v.pointer_up(&s));
        assert!(!v.outer_pointer_up(&s));
    }

    #[test]
    fn release_after_switch_keeps_stored_scroll() {
        let mut v = viewer();
        let mut s = laid_out();
        v.apply_stored_view(&mut s);
        v.pointer_down(&s, Point::new(400.0, 300.0));
        // Switch lands mid-drag; the drag is cancelled and scroll stored.
        v.pointer_move(&mut s, Point::new(100.0, 100.0));
        v.next(&s);
        s.unload_image();
        s.set_scroll_offset(Point::new(5.0, 5.0));
        assert!(!v.pointer_up(&s));
        assert!(!v.outer_pointer_leave(&s));
        assert_eq!(v.view_state().scroll(), Point::new(300.0, 200.0));
    }

    #[test]
    fn drag_ending_after_layout_loss_keeps_stored_scroll() {
        let mut v = viewer();
        let mut s = laid_out();
        v.apply_stored_view(&mut s);
        v.pointer_down(&s, Point::new(400.0, 300.0));
        v.pointer_move(&mut s, Point::new(100.0, 100.0));

        // The image goes away mid-drag and a zoom cannot be applied.
        s.unload_image();
        v.zoom_in(&mut s);
        assert!(v.is_view_pending());
        assert_eq!(s.scroll_offset(), Point::ZERO);

        assert!(v.pointer_up(&s));
        assert_eq!(v.gesture(), GestureState::Idle);
        assert_eq!(v.view_state().scroll(), Point::new(300.0, 200.0));
    }

    #[test]
    fn revision_tracks_indicator_changes() {
        let mut v = viewer();
        let mut s = laid_out();
        v.apply_stored_view(&mut s);
        let r0 = v.minimap_revision();
        v.pointer_down(&s, Point::new(100.0, 100.0));
        v.pointer_move(&mut s, Point::new(90.0, 90.0));
        assert!(v.minimap_revision() > r0);
        let r1 = v.minimap_revision();
        v.pointer_up(&s);
        assert_eq!(v.minimap_revision(), r1);
    }
}
