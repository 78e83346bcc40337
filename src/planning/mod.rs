//! Pathfinding over the mesh database.
//!
//! - [`SortedIdSet`]: binary-search membership filter mirroring the
//!   open queue, also used for the closed set
//! - [`AStarPathfinder`]: stateless A* search bound to a mesh database
//! - [`EdgeCost`]: pluggable per-edge cost seam ([`UnitCost`] default)

mod astar;
mod filter;

pub use astar::{AStarPathfinder, EdgeCost, UnitCost};
pub use filter::SortedIdSet;
