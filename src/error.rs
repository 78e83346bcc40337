//! Error types for VarunaNav.
//!
//! Every failure in the planning pipeline is returned as a discriminated
//! variant to the immediate caller; nothing in this crate aborts the
//! process. A path-cache miss is not an error and never appears here --
//! cache lookups return `Option` instead.

use thiserror::Error;

/// Which end of a leg failed to snap onto the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Origin,
    Destination,
}

impl std::fmt::Display for SnapTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapTarget::Origin => write!(f, "origin"),
            SnapTarget::Destination => write!(f, "destination"),
        }
    }
}

/// VarunaNav error type.
#[derive(Error, Debug)]
pub enum VarunaError {
    /// Fewer than two waypoints were supplied to the plotter.
    #[error("Need at least 2 waypoints to plot a route, got {0}")]
    TooFewWaypoints(usize),

    /// Could not locate a mesh vertex near a leg endpoint.
    #[error("Could not locate a mesh vertex near the {target} at ({lat:.4}, {lon:.4})")]
    SnapFailed {
        target: SnapTarget,
        lat: f64,
        lon: f64,
    },

    /// The search exhausted its open set without reaching the goal.
    ///
    /// Distinct from [`VarunaError::SnapFailed`]: both endpoints are on
    /// the mesh, but no navigable connection exists between them.
    #[error("No navigable path between mesh vertices {from} and {to}")]
    NoPath { from: u32, to: u32 },

    /// A vertex id outside the loaded mesh was requested.
    #[error("Vertex {0} is not in the mesh")]
    UnknownVertex(u32),

    /// A voyage edit addressed a waypoint position that does not exist.
    #[error("Waypoint index {index} out of range for voyage of {len}")]
    WaypointIndex { index: usize, len: usize },

    /// The mesh database has not loaded the fields required for routing.
    #[error("Navmesh database is not ready: {0}")]
    MeshNotReady(String),

    /// Malformed dataset or serialized geometry.
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for VarunaError {
    fn from(e: serde_json::Error) -> Self {
        VarunaError::Dataset(e.to_string())
    }
}

impl From<toml::de::Error> for VarunaError {
    fn from(e: toml::de::Error) -> Self {
        VarunaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VarunaError>;
