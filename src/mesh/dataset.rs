//! On-disk navmesh dataset format.
//!
//! Produced by the offline GeoJSON baking tool. All fields are
//! positionally aligned:
//!
//! - `index[i]` -- `[lat, lon]` of vertex `i`
//! - `adjacent[i]` -- neighbor vertex ids of vertex `i`
//! - `clearance[i]` -- clearance values aligned with `adjacent[i]`
//! - `routeIndex[i][j]` -- signed index into `routeData` for the edge
//!   from vertex `i` to its `j`-th neighbor; the sign encodes direction
//!   and the magnitude the table slot, so the per-edge sample table is
//!   not duplicated per direction
//!
//! Every field is optional at the serde level so a partially baked
//! dataset still parses; [`MeshDataset::validate`] reports what is
//! missing or misaligned and the database decides how much of the load
//! can proceed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw navmesh dataset, straight from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshDataset {
    /// Vertex coordinates as `[lat, lon]`; position = vertex id.
    #[serde(default)]
    pub index: Vec<[f64; 2]>,

    /// Adjacency lists, positionally aligned with `index`.
    #[serde(default)]
    pub adjacent: Vec<Vec<u32>>,

    /// Per-neighbor clearance, positionally aligned with `adjacent`.
    #[serde(default)]
    pub clearance: Vec<Vec<f64>>,

    /// Signed per-(vertex, neighbor-position) indices into `route_data`.
    #[serde(default, rename = "routeIndex")]
    pub route_index: Vec<Vec<i32>>,

    /// Flat clearance-sample table shared by both edge directions.
    #[serde(default, rename = "routeData")]
    pub route_data: Vec<f64>,
}

impl MeshDataset {
    /// Parse a dataset from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Load a dataset from a JSON file.
    ///
    /// A missing file is the one unrecoverable startup error in this
    /// crate; malformed *content* inside an existing file degrades to
    /// partial data instead.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Structural problems with the dataset, one message each.
    ///
    /// Empty result means the dataset is complete. Problems are never
    /// fatal here; the database logs them and loads what it can.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.index.is_empty() {
            problems.push("dataset has no `index` field or it is empty".to_string());
        }
        if self.adjacent.is_empty() {
            problems.push("dataset has no `adjacent` field or it is empty".to_string());
        }
        if !self.adjacent.is_empty() && self.adjacent.len() != self.index.len() {
            problems.push(format!(
                "`adjacent` has {} entries but `index` has {}",
                self.adjacent.len(),
                self.index.len()
            ));
        }
        if !self.clearance.is_empty() && self.clearance.len() != self.index.len() {
            problems.push(format!(
                "`clearance` has {} entries but `index` has {}",
                self.clearance.len(),
                self.index.len()
            ));
        }
        if self.route_index.is_empty() || self.route_data.is_empty() {
            problems.push("edge clearance tables (`routeIndex`/`routeData`) are missing".to_string());
        }

        problems
    }

    /// True when the fields required for pathfinding are present.
    pub fn is_routable(&self) -> bool {
        !self.index.is_empty() && !self.adjacent.is_empty()
    }
}
