//! Geometric object storage and spatial search.
//!
//! - [`Shape`]: closed tagged-variant set of geometric objects
//! - [`SpatialTree`]: adaptive quad-partition tree over inserted objects
//! - [`GeometryCache`]: owns the object list and its tree; radius,
//!   line-proximity and expanding-ring nearest queries; serialization

mod cache;
mod shape;
mod tree;

pub use cache::GeometryCache;
pub use shape::{Shape, ShapeCommon};
pub use tree::SpatialTree;
