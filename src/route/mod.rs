//! Route construction and description.
//!
//! A [`Route`] is an ordered list of [`RouteSegment`]s, one per planned
//! leg. Segment construction turns a raw vertex path into a smoothed
//! waypoint sequence (endpoint trimming, clearance-scaled corner
//! displacement, cardinal-spline interpolation); [`corridor_polygon`]
//! derives the clearance outline and [`RouteAnnotation`] packages a
//! renderer-neutral description.

mod corridor;
mod render;
mod route;
mod segment;
mod spline;

pub use corridor::corridor_polygon;
pub use render::{RouteAnnotation, RouteStyle};
pub use route::Route;
pub use segment::RouteSegment;
pub use spline::cardinal_spline;
