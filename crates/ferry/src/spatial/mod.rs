//! Map projection and port hit testing.

pub mod picker;
pub mod projection;

pub use picker::PortPicker;
pub use projection::{
    map_direct, map_inverted, DisplayPoint, MapBounds, PlaneSize, Projector, LINE_LIFT,
    MARKER_ELEVATION, PLANE_ELEVATION,
};
