//! # VarunaNav: Maritime Route Planning over a Navigation Mesh
//!
//! A route-planning library for sea charts: waypoints are snapped onto a
//! precomputed navigable mesh, connected with A* search, smoothed with a
//! cardinal spline, and cached for repeat requests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use varuna_nav::{MeshDatabase, PlannerConfig, RoutePlotter, Waypoint};
//!
//! # fn main() -> varuna_nav::Result<()> {
//! let db = MeshDatabase::load("charts/navmesh.json")?;
//! let mut plotter = RoutePlotter::new(db, PlannerConfig::default());
//!
//! let route = plotter.plot(&[
//!     Waypoint::new(59.44, 24.75),
//!     Waypoint::new(60.17, 24.94),
//! ])?;
//! println!("{:.1} km over {} legs", route.distance(), route.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Coordinate Convention
//!
//! `Coordinate.x` is latitude and `Coordinate.y` is longitude, both in
//! degrees. Distances are kilometers. Planning uses a fast flat-earth
//! approximation; reported route lengths use the haversine formula.
//!
//! ## Architecture
//!
//! The library is organized into modules:
//!
//! - [`core`]: Fundamental types (Coordinate, Waypoint)
//! - [`geometry`]: Shapes, the quad-partition spatial tree, and the
//!   geometry cache with expanding-ring nearest lookup
//! - [`mesh`]: Navmesh dataset loading and the vertex database
//! - [`planning`]: A* pathfinder with pluggable edge cost
//! - [`route`]: Segment smoothing, spline, corridor polygon, render
//!   description
//! - [`cache`]: TTL cache for planned routes
//! - [`plotter`]: Orchestration from waypoint list to finished route
//! - [`voyage`]: Editable waypoint list kept in sync with its legs

pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod planning;
pub mod plotter;
pub mod route;
pub mod voyage;

pub use cache::PathCache;
pub use config::{CacheConfig, PlannerConfig, RouteConfig, SearchConfig};
pub use core::{Coordinate, Waypoint};
pub use error::{Result, SnapTarget, VarunaError};
pub use geometry::{GeometryCache, Shape, ShapeCommon, SpatialTree};
pub use mesh::{MeshDatabase, MeshDataset, Vertex};
pub use planning::{AStarPathfinder, EdgeCost, UnitCost};
pub use route::{corridor_polygon, Route, RouteAnnotation, RouteSegment, RouteStyle};
pub use plotter::RoutePlotter;
pub use voyage::Voyage;
