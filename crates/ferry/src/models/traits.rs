//! Traits for the collaborators that draw the map and show route details.
//!
//! The crate never talks to a graphics engine directly. A 3D scene, a
//! terminal, or a test double implements these and receives already
//! projected coordinates.

use crate::identifiers::PortName;
use crate::models::types::{FerryError, RouteInfo};
use crate::spatial::projection::DisplayPoint;

// ============================================================================
// Rendering Surface
// ============================================================================

/// Surface that draws port markers and route lines
pub trait RenderSurface {
    /// Put a port marker at its projected position
    fn place_port(&mut self, name: &PortName, at: DisplayPoint);

    /// Draw one line segment between two ports
    fn draw_route_line(
        &mut self,
        origin: &PortName,
        destination: &PortName,
        from: DisplayPoint,
        to: DisplayPoint,
    );

    /// Remove every route line currently drawn
    fn clear_route_lines(&mut self);
}

/// A pointer click reported by the surface.
///
/// `ndc` is the position in normalized device coordinates (-1..1 on both
/// axes, y pointing up). `hit` names the port marker under the pointer when
/// the surface can resolve it itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub ndc: [f32; 2],
    pub hit: Option<String>,
}

impl PointerEvent {
    pub fn on_port(name: impl Into<String>) -> Self {
        Self {
            ndc: [0.0, 0.0],
            hit: Some(name.into()),
        }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            ndc: [x, y],
            hit: None,
        }
    }
}

// ============================================================================
// Display Panel
// ============================================================================

/// Panel that lists the vehicles and timetable of a selected route
pub trait DisplayPanel {
    fn show_route_info(&mut self, info: &RouteInfo);

    fn hide(&mut self);

    /// Surface a non-fatal error to the user
    fn show_error(&mut self, error: &FerryError);

    /// Short informational message, e.g. a port with no departures
    fn show_notice(&mut self, message: &str);
}
