//! Foundation types shared by every layer of the crate.
//!
//! - [`Coordinate`]: 2D geographic point (x = latitude, y = longitude)
//!   with planar, great-circle and fast-approximate distance metrics
//! - [`Waypoint`]: user-supplied control point with optional clearance
//!   and label

mod coordinate;
mod waypoint;

pub use coordinate::Coordinate;
pub use waypoint::Waypoint;
