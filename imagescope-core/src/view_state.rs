use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::{Point, Size};

/// Multiplicative factor applied per zoom step.
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;
/// Smallest allowed scale: the image at its intrinsic size.
pub const DEFAULT_MIN_SCALE: f64 = 1.0;
/// Largest allowed scale.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: scrolling up (negative delta) zooms in.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 {
            Self::In
        } else {
            Self::Out
        }
    }
}

/// Bounds and step size for every scale change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_scale: f64,
    pub max_scale: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl ZoomLimits {
    /// Create zoom limits with explicit parameters.
    pub fn new(min_scale: f64, max_scale: f64, step: f64) -> crate::Result<Self> {
        if !(min_scale.is_finite() && max_scale.is_finite() && step.is_finite()) {
            return Err(CoreError::InvalidZoomLimits {
                reason: format!("values must be finite, got {min_scale}..{max_scale} step {step}"),
            });
        }
        if min_scale <= 0.0 || min_scale > max_scale {
            return Err(CoreError::InvalidZoomLimits {
                reason: format!("need 0 < min <= max, got {min_scale}..{max_scale}"),
            });
        }
        if step <= 1.0 {
            return Err(CoreError::InvalidZoomLimits {
                reason: format!("step must be > 1, got {step}"),
            });
        }
        Ok(Self {
            min_scale,
            max_scale,
            step,
        })
    }

    #[inline]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// The scale one step away from `scale`, clamped to the limits.
    pub fn stepped(&self, scale: f64, direction: ZoomDirection) -> f64 {
        match direction {
            ZoomDirection::In => self.clamp(scale * self.step),
            ZoomDirection::Out => self.clamp(scale / self.step),
        }
    }
}

/// Scale and scroll offsets shared by every image in the set.
///
/// Switching images keeps this value, so the next image opens at the same
/// magnification and position (clamped to its own bounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scale: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: DEFAULT_MIN_SCALE,
            scroll_left: 0.0,
            scroll_top: 0.0,
        }
    }
}

impl ViewState {
    #[inline]
    pub fn scroll(&self) -> Point {
        Point::new(self.scroll_left, self.scroll_top)
    }

    /// Store a scroll offset, flooring negative components at zero.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll_left = scroll.x.max(0.0);
        self.scroll_top = scroll.y.max(0.0);
    }

    /// Clamp the stored scroll into `[0, max]` on both axes.
    pub fn clamp_scroll(&mut self, max: Point) {
        let clamped = self.scroll().clamp_to(max);
        self.scroll_left = clamped.x;
        self.scroll_top = clamped.y;
    }

    /// One zoom step about the top-left corner. Returns whether the scale moved.
    pub fn zoom(&mut self, limits: &ZoomLimits, direction: ZoomDirection) -> bool {
        let old = self.scale;
        self.scale = limits.stepped(old, direction);
        self.scale != old
    }

    /// Wheel zoom keeping the content point under `anchor` fixed.
    ///
    /// `anchor` is in viewport coordinates, `live_scroll` is the container's
    /// current scroll, `content` is the scrolled content size at the current
    /// scale and `viewport` the container's client size. The new scroll is
    /// clamped to both ends of the scroll range at the new scale.
    pub fn zoom_at_point(
        &mut self,
        limits: &ZoomLimits,
        direction: ZoomDirection,
        anchor: Point,
        live_scroll: Point,
        content: Size,
        viewport: Size,
    ) {
        let old = self.scale;
        let new = limits.stepped(old, direction);
        let target = anchored_scroll(anchor, live_scroll, old, new);
        let max = (content * (new / old)).overflow(viewport);
        self.scale = new;
        self.set_scroll(target.clamp_to(max));
    }
}

/// Scroll offset that keeps `anchor + live_scroll` (a content point at
/// `old_scale`) under the same viewport point at `new_scale`. Unclamped.
#[inline]
pub fn anchored_scroll(anchor: Point, live_scroll: Point, old_scale: f64, new_scale: f64) -> Point {
    let anchor_content = anchor + live_scroll;
    anchor_content * (new_scale / old_scale) - anchor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn default_limits_match_viewer_contract() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.min_scale, 1.0);
        assert_eq!(limits.max_scale, 5.0);
        assert!((limits.step - 1.2).abs() < EPSILON);
    }

    #[test]
    fn invalid_limits() {
        assert!(ZoomLimits::new(0.0, 5.0, 1.2).is_err());
        assert!(ZoomLimits::new(3.0, 2.0, 1.2).is_err());
        assert!(ZoomLimits::new(1.0, 5.0, 1.0).is_err());
        assert!(ZoomLimits::new(1.0, f64::INFINITY, 1.2).is_err());
        assert!(ZoomLimits::new(0.5, 8.0, 1.1).is_ok());
    }

    #[test]
    fn repeated_zoom_saturates_at_bounds() {
        let limits = ZoomLimits::default();
        let mut state = ViewState::default();
        for _ in 0..50 {
            state.zoom(&limits, ZoomDirection::In);
            assert!(state.scale <= 5.0);
        }
        assert_eq!(state.scale, 5.0);
        assert!(!state.zoom(&limits, ZoomDirection::In));

        for _ in 0..50 {
            state.zoom(&limits, ZoomDirection::Out);
            assert!(state.scale >= 1.0);
        }
        assert_eq!(state.scale, 1.0);
        assert!(!state.zoom(&limits, ZoomDirection::Out));
    }

    #[test]
    fn wheel_direction_convention() {
        assert_eq!(ZoomDirection::from_wheel_delta(-3.0), ZoomDirection::In);
        assert_eq!(ZoomDirection::from_wheel_delta(3.0), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_wheel_delta(0.0), ZoomDirection::Out);
    }

    #[test]
    fn zoom_at_point_keeps_anchor_content_fixed() {
        let limits = ZoomLimits::default();
        let mut state = ViewState {
            scale: 1.0,
            scroll_left: 200.0,
            scroll_top: 100.0,
        };
        let anchor = Point::new(300.0, 250.0);
        let before_x = (state.scroll_left + anchor.x) / state.scale;
        let before_y = (state.scroll_top + anchor.y) / state.scale;

        state.zoom_at_point(
            &limits,
            ZoomDirection::In,
            anchor,
            state.scroll(),
            Size::new(1600.0, 1200.0),
            Size::new(800.0, 600.0),
        );

        assert!((state.scale - 1.2).abs() < EPSILON);
        assert!(((state.scroll_left + anchor.x) / state.scale - before_x).abs() < EPSILON);
        assert!(((state.scroll_top + anchor.y) / state.scale - before_y).abs() < EPSILON);
    }

    #[test]
    fn zoom_at_point_clamps_both_ends() {
        let limits = ZoomLimits::default();

        // Zooming out near the origin would go negative.
        let mut low = ViewState {
            scale: 1.2,
            scroll_left: 10.0,
            scroll_top: 10.0,
        };
        low.zoom_at_point(
            &limits,
            ZoomDirection::Out,
            Point::new(700.0, 500.0),
            low.scroll(),
            Size::new(1920.0, 1440.0),
            Size::new(800.0, 600.0),
        );
        assert_eq!(low.scroll(), Point::ZERO);

        // Zooming out at the far edge would overshoot the new maximum.
        let mut high = ViewState {
            scale: 1.2,
            scroll_left: 1120.0,
            scroll_top: 840.0,
        };
        high.zoom_at_point(
            &limits,
            ZoomDirection::Out,
            Point::ZERO,
            high.scroll(),
            Size::new(1920.0, 1440.0),
            Size::new(800.0, 600.0),
        );
        assert!((high.scale - 1.0).abs() < EPSILON);
        assert!((high.scroll_left - 800.0).abs() < EPSILON);
        assert!((high.scroll_top - 600.0).abs() < EPSILON);
    }

    #[test]
    fn repeated_wheel_zoom_does_not_drift() {
        let limits = ZoomLimits::default();
        let content_at_1 = Size::new(1600.0, 1200.0);
        let viewport = Size::new(800.0, 600.0);
        let anchor = Point::new(400.0, 300.0);
        let mut state = ViewState {
            scale: 1.0,
            scroll_left: 400.0,
            scroll_top: 300.0,
        };
        let content_point = (state.scroll() + anchor) / state.scale;

        for direction in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
            let content = content_at_1 * state.scale;
            state.zoom_at_point(&limits, direction, anchor, state.scroll(), content, viewport);
            let now = (state.scroll() + anchor) / state.scale;
            assert!((now.x - content_point.x).abs() < EPSILON);
            assert!((now.y - content_point.y).abs() < EPSILON);
        }
    }

    #[test]
    fn set_scroll_floors_at_zero() {
        let mut state = ViewState::default();
        state.set_scroll(Point::new(-5.0, 12.0));
        assert_eq!(state.scroll(), Point::new(0.0, 12.0));
    }

    #[test]
    fn view_state_serde_round_trip() {
        let state = ViewState {
            scale: 2.5,
            scroll_left: 12.5,
            scroll_top: 40.0,
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
