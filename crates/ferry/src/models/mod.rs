//! Ferry data models, types, and collaborator traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::{DisplayPanel, PointerEvent, RenderSurface};
pub use types::{FerryError, Result, RouteInfo, ScheduleEntry};
