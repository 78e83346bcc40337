//! Runtime mesh database.
//!
//! Owns every vertex and a spatial index over them, built once at load.
//! The database is immutable after construction: per-search A* state
//! lives in the pathfinder's own scratch, never on vertices, so any
//! number of concurrent searches may share one database.

use std::path::Path;

use log::warn;

use crate::core::Coordinate;
use crate::error::Result;
use crate::geometry::{GeometryCache, Shape};
use crate::mesh::MeshDataset;

/// One navigable-water mesh node.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Stable id; equals the vertex's position in the dataset `index`.
    pub id: u32,
    pub coordinate: Coordinate,
    /// Ids of directly reachable neighbor vertices.
    pub adjacent: Vec<u32>,
    /// Clearance per neighbor, aligned with `adjacent`.
    pub clearance: Vec<f64>,
}

impl Vertex {
    /// Fast geographic distance to another vertex.
    #[inline]
    pub fn distance_to(&self, other: &Vertex) -> f64 {
        self.coordinate.fast_geographic_distance(&other.coordinate)
    }
}

/// Static navigable graph with nearest-vertex snapping and per-edge
/// clearance lookup.
#[derive(Debug, Clone)]
pub struct MeshDatabase {
    vertices: Vec<Vertex>,
    index: GeometryCache,
    route_index: Vec<Vec<i32>>,
    route_data: Vec<f64>,
    ready: bool,
}

impl MeshDatabase {
    /// Load a database from a navmesh JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let dataset = MeshDataset::from_file(path)?;
        Ok(Self::from_dataset(dataset))
    }

    /// Build a database from an already-parsed dataset.
    ///
    /// Structural problems are logged and tolerated; the load proceeds
    /// with whatever is usable. Callers must check
    /// [`MeshDatabase::is_ready`] before routing.
    pub fn from_dataset(dataset: MeshDataset) -> Self {
        for problem in dataset.validate() {
            warn!("Navmesh dataset: {problem}");
        }

        let mut vertices = Vec::with_capacity(dataset.index.len());
        let mut index = GeometryCache::new();

        for (i, pair) in dataset.index.iter().enumerate() {
            let coordinate = Coordinate::new(pair[0], pair[1]);
            let adjacent = dataset.adjacent.get(i).cloned().unwrap_or_default();
            let clearance = match dataset.clearance.get(i) {
                Some(c) if c.len() == adjacent.len() => c.clone(),
                Some(c) => {
                    warn!(
                        "Vertex {i}: clearance list has {} entries for {} neighbors, padding with 0",
                        c.len(),
                        adjacent.len()
                    );
                    let mut padded = c.clone();
                    padded.resize(adjacent.len(), 0.0);
                    padded
                }
                None => vec![0.0; adjacent.len()],
            };

            vertices.push(Vertex {
                id: i as u32,
                coordinate,
                adjacent,
                clearance,
            });
            index.add(Shape::point(coordinate));
        }

        let ready = dataset.is_routable();
        Self {
            vertices,
            index,
            route_index: dataset.route_index,
            route_data: dataset.route_data,
            ready,
        }
    }

    /// Whether the fields required for routing were loaded.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_by_index(&self, id: u32) -> Option<&Vertex> {
        self.vertices.get(id as usize)
    }

    pub fn coordinate_of(&self, id: u32) -> Option<Coordinate> {
        self.vertex_by_index(id).map(|v| v.coordinate)
    }

    /// Snap an arbitrary coordinate onto the nearest mesh vertex.
    ///
    /// Uses the object cache's expanding-ring search; see
    /// [`GeometryCache::find_nearest_index`] for its (deliberate)
    /// non-global-nearest behavior.
    pub fn nearest_vertex(&self, at: &Coordinate) -> Option<&Vertex> {
        // Cache indices and vertex ids coincide: vertices are inserted
        // in id order.
        self.index
            .find_nearest_index(at)
            .map(|i| &self.vertices[i])
    }

    /// Directional edge clearance from vertex `a` to vertex `b`.
    ///
    /// Resolves `b`'s position in `a`'s adjacency, follows the signed
    /// entry in the route-index table (sign = direction, magnitude =
    /// slot) into the flat clearance table. Any miss along the way
    /// yields 0.0 -- absent clearance means no sea-room to spend on
    /// smoothing, not an error.
    pub fn edge_clearance(&self, a: u32, b: u32) -> f64 {
        let Some(vertex) = self.vertex_by_index(a) else {
            return 0.0;
        };
        let Some(position) = vertex.adjacent.iter().position(|&n| n == b) else {
            return 0.0;
        };
        let Some(entry) = self.route_index.get(a as usize).and_then(|r| r.get(position)) else {
            return 0.0;
        };
        self.route_data
            .get(entry.unsigned_abs() as usize)
            .copied()
            .unwrap_or(0.0)
    }
}
