pub mod error;
pub mod geometry;
pub mod gesture;
pub mod image_set;
pub mod minimap;
pub mod surface;
pub mod view_state;
pub mod viewer;

// Re-export primary types for convenience.
pub use error::CoreError;
pub use geometry::{Point, Rect, Size};
pub use gesture::{DragOrigin, GestureController, GestureState};
pub use image_set::{ImageSet, ImageSource};
pub use minimap::MinimapProjector;
pub use surface::{HeadlessSurface, ViewSurface};
pub use view_state::{ViewState, ZoomDirection, ZoomLimits};
pub use viewer::{Viewer, WheelInput};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
