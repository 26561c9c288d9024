//! Route index built from the fleet table.

pub mod builder;
pub mod ordered;

pub use builder::{BuildReport, RouteIndex};
pub use ordered::OrderedSet;
